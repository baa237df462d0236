//! Session shell.
//!
//! Owns the switch between the auth view and the todo view. Every mount or
//! activation takes a fresh generation so timers and completions issued by
//! the previous view are recognisable as stale.

use todo_core::config::AuthConfig;
use todo_core::store::Session;

use crate::auth::AuthState;
use crate::common::GenerationSeq;
use crate::effects::UiEffect;
use crate::state::{AppState, Mode, Repositories};
use crate::todos::{self, TodoState};

/// Builds the initial state from the persisted session.
///
/// A stored session goes straight to the todo view; otherwise the auth view
/// is mounted in sign-in mode.
pub fn start(repos: Repositories, auth_config: AuthConfig) -> (AppState, Vec<UiEffect>) {
    let mut seq = GenerationSeq::default();
    let (mode, effects) = match repos.sessions.load_session() {
        Some(session) => {
            tracing::info!(user = %session.name, "resuming session");
            activate(&mut seq, session)
        }
        None => {
            let auth = AuthState::new(seq.next_id(), auth_config.clone());
            (Mode::Unauthenticated(auth), Vec::new())
        }
    };

    let app = AppState {
        mode,
        repos,
        auth_config,
        seq,
        spinner_frame: 0,
        should_quit: false,
    };
    (app, effects)
}

/// Persists `session` and replaces the auth view with the todo view.
pub fn on_login(app: &mut AppState, session: Session) -> Vec<UiEffect> {
    if let Err(err) = app.repos.sessions.save_session(&session) {
        tracing::error!(
            user = %session.name,
            error = %format!("{err:#}"),
            "failed to persist session"
        );
    }
    tracing::info!(user = %session.name, "session started");
    let (mode, effects) = activate(&mut app.seq, session);
    app.mode = mode;
    effects
}

/// Clears the persisted session and mounts a fresh auth view.
pub fn on_logout(app: &mut AppState) -> Vec<UiEffect> {
    if let Err(err) = app.repos.sessions.clear_session() {
        tracing::error!(error = %format!("{err:#}"), "failed to clear session");
    }
    if let Some(user) = app.current_user() {
        tracing::info!(user, "signed out");
    }
    let auth = AuthState::new(app.seq.next_id(), app.auth_config.clone());
    app.mode = Mode::Unauthenticated(auth);
    Vec::new()
}

fn activate(seq: &mut GenerationSeq, session: Session) -> (Mode, Vec<UiEffect>) {
    let mut todos = TodoState::new(seq.next_id(), session.name);
    let effects = todos::fetch_all(&mut todos);
    (Mode::Authenticated(todos), effects)
}
