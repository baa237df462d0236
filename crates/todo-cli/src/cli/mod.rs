//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use todo_core::config::{self, paths};
use todo_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "todo")]
#[command(version)]
#[command(about = "Terminal todo client with local accounts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the todo service (overrides config; TODO_BASE_URL wins)
    #[arg(long, value_name = "URL", global = true)]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// List registered local accounts
    Users,
    /// Show the signed-in user
    Whoami,
    /// Sign out of the persisted session
    Logout,
    /// Print the signed-in user's todos
    List,
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    // Logging is best effort; a read-only home must not block the client.
    let _log_guard = match logging::init(&config.log, &paths::logs_dir()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            None
        }
    };

    let Cli { command, base_url } = cli;

    // default to interactive mode
    let Some(command) = command else {
        return commands::interactive::run(&config, base_url.as_deref());
    };

    match command {
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
        Commands::Users => {
            commands::session::users();
            Ok(())
        }
        Commands::Whoami => {
            commands::session::whoami();
            Ok(())
        }
        Commands::Logout => commands::session::logout(),
        Commands::List => commands::list::run(&config, base_url.as_deref()).await,
    }
}
