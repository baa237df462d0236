//! Non-interactive todo listing.

use anyhow::{Context, Result};
use todo_core::config::Config;
use todo_core::remote::TodoClient;
use todo_core::store::{CredentialStore, FileStore, SessionRepository};

pub async fn run(config: &Config, base_url_override: Option<&str>) -> Result<()> {
    let store = CredentialStore::new(FileStore::open_default());
    let Some(session) = store.load_session() else {
        anyhow::bail!("Not signed in. Run `todo` to sign in first.");
    };

    let base_url = config.remote_base_url(base_url_override)?;
    let client = TodoClient::new(base_url, &config.remote)?;
    let items = client
        .fetch_all(&session.name)
        .await
        .with_context(|| format!("Failed to fetch todos from {}", client.base_url()))?;

    if items.is_empty() {
        println!("No todos.");
        return Ok(());
    }
    for item in items {
        let mark = if item.completed { "x" } else { " " };
        println!("[{mark}] {}", item.title);
    }
    Ok(())
}
