//! Local account and session commands.
//!
//! These read the same store as the interactive client and never touch the
//! network.

use anyhow::Result;
use todo_core::store::{CredentialStore, FileStore, SessionRepository, UserRepository};

fn store() -> CredentialStore<FileStore> {
    CredentialStore::new(FileStore::open_default())
}

pub fn users() {
    let users = store().load_users();
    if users.is_empty() {
        println!("No users registered.");
        return;
    }
    for user in users {
        println!("{}", user.name);
    }
}

pub fn whoami() {
    match store().load_session() {
        Some(session) => println!("{}", session.name),
        None => println!("Not signed in."),
    }
}

pub fn logout() -> Result<()> {
    let store = store();
    let Some(session) = store.load_session() else {
        println!("Not signed in.");
        return Ok(());
    };
    store.clear_session()?;
    tracing::info!(user = %session.name, "signed out from command line");
    println!("Signed out.");
    Ok(())
}
