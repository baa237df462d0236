//! Full-screen TUI for the todo client.
//!
//! Elm-style: `update` mutates `AppState` and returns `UiEffect`s, `render`
//! draws it, and `runtime` owns the terminal and executes the effects.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod shell;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::Result;
pub use features::{auth, todos};
pub use runtime::TuiRuntime;
pub use state::Repositories;
use todo_core::config::Config;
use todo_core::remote::TodoClient;

/// Runs the interactive client until the user quits.
///
/// Blocks the calling thread; must be called from within a multi-threaded
/// tokio runtime so spawned remote calls and timers make progress.
///
/// # Errors
/// Returns an error if stdout is not a terminal or terminal I/O fails.
pub fn run_interactive(config: &Config, client: TodoClient, repos: Repositories) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "Interactive mode requires a terminal.\n\
             Use `todo list` for non-interactive output."
        );
    }

    tracing::info!(base_url = %client.base_url(), "starting interactive client");
    let (state, startup) = shell::start(repos, config.auth.clone());
    let mut runtime = TuiRuntime::new(state, startup, client)?;
    runtime.run()
}
