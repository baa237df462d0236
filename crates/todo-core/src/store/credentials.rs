//! Typed user and session repositories over a `KvStore`.
//!
//! Two fixed keys hold everything:
//! - `todo.users`: JSON array of `{name, password}` records
//! - `todo.user`: JSON object `{name}` for the signed-in user
//!
//! Reads never fail outward. A missing or malformed blob reads as empty/absent
//! and the cause is logged.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::KvStore;

/// Key holding the registered user collection.
pub const USERS_KEY: &str = "todo.users";
/// Key holding the active session.
pub const SESSION_KEY: &str = "todo.user";

/// A registered local account. Passwords are stored as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    pub password: String,
}

impl UserRecord {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
        }
    }
}

/// The currently signed-in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub name: String,
}

impl Session {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Access to the registered user collection.
pub trait UserRepository: Send + Sync {
    /// Returns all users in stored order; empty when absent or unreadable.
    fn load_users(&self) -> Vec<UserRecord>;

    /// Replaces the stored collection.
    ///
    /// # Errors
    /// Returns an error if the store cannot be written.
    fn save_users(&self, users: &[UserRecord]) -> Result<()>;
}

/// Access to the persisted session.
pub trait SessionRepository: Send + Sync {
    /// Returns the stored session, or `None` when absent or unreadable.
    fn load_session(&self) -> Option<Session>;

    /// # Errors
    /// Returns an error if the store cannot be written.
    fn save_session(&self, session: &Session) -> Result<()>;

    /// # Errors
    /// Returns an error if the store cannot be written.
    fn clear_session(&self) -> Result<()>;
}

/// Both repositories backed by one key-value store.
#[derive(Debug)]
pub struct CredentialStore<S> {
    kv: S,
}

impl<S: KvStore> CredentialStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        match self.kv.get(key) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(key, error = %format!("{err:#}"), "store read failed");
                None
            }
        }
    }
}

impl<S: KvStore> UserRepository for CredentialStore<S> {
    fn load_users(&self) -> Vec<UserRecord> {
        let Some(raw) = self.read_raw(USERS_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str::<Option<Vec<UserRecord>>>(&raw) {
            Ok(users) => users.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(key = USERS_KEY, error = %err, "ignoring malformed user list");
                Vec::new()
            }
        }
    }

    fn save_users(&self, users: &[UserRecord]) -> Result<()> {
        let raw = serde_json::to_string(users).context("Failed to serialize users")?;
        self.kv.set(USERS_KEY, &raw).context("Failed to save users")
    }
}

impl<S: KvStore> SessionRepository for CredentialStore<S> {
    fn load_session(&self) -> Option<Session> {
        let raw = self.read_raw(SESSION_KEY)?;
        match serde_json::from_str::<Option<Session>>(&raw) {
            Ok(session) => session.filter(|s| !s.name.is_empty()),
            Err(err) => {
                tracing::warn!(key = SESSION_KEY, error = %err, "ignoring malformed session");
                None
            }
        }
    }

    fn save_session(&self, session: &Session) -> Result<()> {
        let raw = serde_json::to_string(session).context("Failed to serialize session")?;
        self.kv.set(SESSION_KEY, &raw).context("Failed to save session")
    }

    fn clear_session(&self) -> Result<()> {
        self.kv.remove(SESSION_KEY).context("Failed to clear session")
    }
}

fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Finds a user whose name matches `name` case-insensitively.
pub fn find_user<'a>(users: &'a [UserRecord], name: &str) -> Option<&'a UserRecord> {
    users.iter().find(|user| names_match(&user.name, name))
}

/// Finds a user matching `name` case-insensitively and `password` exactly.
pub fn authenticate<'a>(
    users: &'a [UserRecord],
    name: &str,
    password: &str,
) -> Option<&'a UserRecord> {
    users
        .iter()
        .find(|user| names_match(&user.name, name) && user.password == password)
}
