//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! Local storage is synchronous and happens inside the reducer through the
//! repositories in `AppState`; only remote calls and timers are effects.

use std::time::Duration;

use todo_core::remote::TodoId;

use crate::common::Generation;
use crate::events::TimerEvent;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Load the full list for `user`.
    FetchTodos { session: Generation, user: String },

    /// Create a todo titled `title` for `user`.
    CreateTodo {
        session: Generation,
        user: String,
        title: String,
    },

    /// Delete todo `id` for `user`.
    DeleteTodo {
        session: Generation,
        user: String,
        id: TodoId,
    },

    /// Deliver `timer` as a `UiEvent::Timer` once `after` has elapsed.
    StartTimer { timer: TimerEvent, after: Duration },
}
