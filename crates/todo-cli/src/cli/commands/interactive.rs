//! Interactive command handler.

use std::sync::Arc;

use anyhow::{Context, Result};
use todo_core::config::Config;
use todo_core::remote::TodoClient;
use todo_core::store::{CredentialStore, FileStore};

use crate::modes;

pub fn run(config: &Config, base_url_override: Option<&str>) -> Result<()> {
    let base_url = config.remote_base_url(base_url_override)?;
    let client = TodoClient::new(base_url, &config.remote)?;
    let store = Arc::new(CredentialStore::new(FileStore::open_default()));

    modes::run_interactive(config, client, store).context("interactive client failed")
}
