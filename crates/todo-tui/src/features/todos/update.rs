//! Todo feature reducer.
//!
//! Remote calls leave as effects and come back as `RemoteEvent`s. Items only
//! change on a successful completion; there is no optimistic insert or
//! removal. Any failure degrades the session for good.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use todo_core::remote::{RemoteError, TodoId};

use super::state::TodoState;
use crate::effects::UiEffect;
use crate::events::RemoteEvent;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct TodoUpdate {
    pub effects: Vec<UiEffect>,
    pub logout: bool,
}

impl TodoUpdate {
    fn effects(effects: Vec<UiEffect>) -> Self {
        Self {
            effects,
            logout: false,
        }
    }

    fn logout() -> Self {
        Self {
            effects: Vec::new(),
            logout: true,
        }
    }
}

/// Requests the full list for the session user.
pub fn fetch_all(state: &mut TodoState) -> Vec<UiEffect> {
    state.in_flight += 1;
    vec![UiEffect::FetchTodos {
        session: state.session,
        user: state.user.clone(),
    }]
}

/// Requests creation of a todo titled with the add field's contents.
///
/// An empty field is a no-op. The field is cleared once the service confirms.
pub fn add_todo(state: &mut TodoState) -> Vec<UiEffect> {
    if state.input.is_empty() {
        return Vec::new();
    }
    state.in_flight += 1;
    vec![UiEffect::CreateTodo {
        session: state.session,
        user: state.user.clone(),
        title: state.input.text().to_string(),
    }]
}

pub fn delete_todo(state: &mut TodoState, id: TodoId) -> Vec<UiEffect> {
    state.in_flight += 1;
    vec![UiEffect::DeleteTodo {
        session: state.session,
        user: state.user.clone(),
        id,
    }]
}

pub fn delete_selected(state: &mut TodoState) -> Vec<UiEffect> {
    match state.selected_item().map(|item| item.id.clone()) {
        Some(id) => delete_todo(state, id),
        None => Vec::new(),
    }
}

/// Applies a completion issued under this session.
pub fn apply_remote(state: &mut TodoState, event: RemoteEvent) {
    state.in_flight = state.in_flight.saturating_sub(1);
    match event {
        RemoteEvent::Fetched { result, .. } => match result {
            Ok(items) => {
                tracing::debug!(user = %state.user, count = items.len(), "todos loaded");
                state.items = items;
                state.clamp_selection();
            }
            Err(err) => mark_unreachable(state, "fetch", &err),
        },
        RemoteEvent::Created { result, .. } => match result {
            Ok(item) => {
                tracing::debug!(user = %state.user, id = %item.id, "todo created");
                state.items.push(item);
                state.input.clear();
            }
            Err(err) => mark_unreachable(state, "create", &err),
        },
        RemoteEvent::Deleted { id, result, .. } => match result {
            Ok(()) => {
                tracing::debug!(user = %state.user, id = %id, "todo deleted");
                state.items.retain(|item| item.id != id);
                state.clamp_selection();
            }
            Err(err) => mark_unreachable(state, "delete", &err),
        },
    }
}

fn mark_unreachable(state: &mut TodoState, op: &'static str, err: &RemoteError) {
    tracing::warn!(
        user = %state.user,
        op,
        cause = err.kind(),
        error = %err,
        "backend unreachable"
    );
    state.reachable = false;
}

pub fn handle_key(state: &mut TodoState, key: KeyEvent) -> TodoUpdate {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('l') {
        return TodoUpdate::logout();
    }
    if !state.reachable {
        return TodoUpdate::default();
    }

    let effects = match key.code {
        KeyCode::Enter => add_todo(state),
        KeyCode::Up => {
            state.move_selection(-1);
            Vec::new()
        }
        KeyCode::Down => {
            state.move_selection(1);
            Vec::new()
        }
        KeyCode::Char('d') if ctrl => delete_selected(state),
        KeyCode::Delete if state.selected.is_some() => delete_selected(state),
        _ => {
            state.input.input(key);
            Vec::new()
        }
    };
    TodoUpdate::effects(effects)
}

pub fn handle_paste(state: &mut TodoState, text: &str) {
    if state.reachable {
        state.input.insert_str(text);
    }
}
