//! Application state.
//!
//! Exactly one of the two views is mounted at a time. The repositories are
//! shared with the runtime and written synchronously from the reducer.

use std::fmt;
use std::sync::Arc;

use todo_core::config::AuthConfig;
use todo_core::store::{SessionRepository, UserRepository};

use crate::auth::AuthState;
use crate::common::GenerationSeq;
use crate::todos::TodoState;

/// Persistent collaborators used by the reducer.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn SessionRepository>,
}

impl Repositories {
    pub fn new(users: Arc<dyn UserRepository>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self { users, sessions }
    }

    /// Uses one store for both users and the session.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: UserRepository + SessionRepository + 'static,
    {
        let users: Arc<dyn UserRepository> = Arc::<S>::clone(&store);
        Self::new(users, store)
    }
}

impl fmt::Debug for Repositories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}

/// Which view is mounted.
#[derive(Debug)]
pub enum Mode {
    /// No session: the sign-in / sign-up view.
    Unauthenticated(AuthState),
    /// A user is signed in: the todo view.
    Authenticated(TodoState),
}

#[derive(Debug)]
pub struct AppState {
    pub mode: Mode,
    pub repos: Repositories,
    pub auth_config: AuthConfig,
    /// Source of auth mount and todo session generations.
    pub seq: GenerationSeq,
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl AppState {
    /// Name of the signed-in user, if any.
    pub fn current_user(&self) -> Option<&str> {
        match &self.mode {
            Mode::Authenticated(todos) => Some(&todos.user),
            Mode::Unauthenticated(_) => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.mode, Mode::Authenticated(_))
    }
}
