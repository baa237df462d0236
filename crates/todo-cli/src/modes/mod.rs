//! Runtime execution modes.
//!
//! - `tui`: Full-screen interactive terminal UI (optional feature)

use std::sync::Arc;

use anyhow::Result;
use todo_core::config::Config;
use todo_core::remote::TodoClient;
use todo_core::store::{CredentialStore, FileStore};

#[cfg(feature = "tui")]
pub fn run_interactive(
    config: &Config,
    client: TodoClient,
    store: Arc<CredentialStore<FileStore>>,
) -> Result<()> {
    let repos = todo_tui::Repositories::from_store(store);
    todo_tui::run_interactive(config, client, repos)
}

#[cfg(not(feature = "tui"))]
pub fn run_interactive(
    _config: &Config,
    _client: TodoClient,
    _store: Arc<CredentialStore<FileStore>>,
) -> Result<()> {
    anyhow::bail!("TUI support is disabled in this build (feature \"tui\").");
}
