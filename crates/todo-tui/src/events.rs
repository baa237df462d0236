//! UI event types.
//!
//! Everything the reducer reacts to arrives as a `UiEvent`: terminal input,
//! the render tick, expired timers and completed remote calls.

use crossterm::event::Event;
use todo_core::remote::{RemoteError, TodoId, TodoItem};

use crate::common::Generation;

/// Events consumed by `update::update`.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick; advances the spinner and triggers a render.
    Tick,
    Terminal(Event),
    Timer(TimerEvent),
    Remote(RemoteEvent),
}

/// A timer started through `UiEffect::StartTimer` has fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Clears the auth message numbered `message`, if it is still shown.
    MessageExpired { mount: Generation, message: u64 },
    /// Starts the session queued by a successful sign-up.
    SignUpLogin { mount: Generation },
}

impl TimerEvent {
    /// The auth-view mount that scheduled this timer.
    pub fn mount(&self) -> Generation {
        match self {
            TimerEvent::MessageExpired { mount, .. } | TimerEvent::SignUpLogin { mount } => *mount,
        }
    }
}

/// Completion of a call made through `todo_core::remote::TodoClient`.
#[derive(Debug)]
pub enum RemoteEvent {
    Fetched {
        session: Generation,
        result: Result<Vec<TodoItem>, RemoteError>,
    },
    Created {
        session: Generation,
        result: Result<TodoItem, RemoteError>,
    },
    Deleted {
        session: Generation,
        id: TodoId,
        result: Result<(), RemoteError>,
    },
}

impl RemoteEvent {
    /// The todo session the request was issued under.
    pub fn session(&self) -> Generation {
        match self {
            RemoteEvent::Fetched { session, .. }
            | RemoteEvent::Created { session, .. }
            | RemoteEvent::Deleted { session, .. } => *session,
        }
    }
}
