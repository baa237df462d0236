//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that return a `UiEvent`; the runtime
//! spawns them and forwards the result to the inbox. They never touch state.

use std::time::Duration;

use todo_core::remote::{TodoClient, TodoId};

use crate::common::Generation;
use crate::events::{RemoteEvent, TimerEvent, UiEvent};

pub async fn fetch_todos(client: TodoClient, session: Generation, user: String) -> UiEvent {
    let result = client.fetch_all(&user).await;
    UiEvent::Remote(RemoteEvent::Fetched { session, result })
}

pub async fn create_todo(
    client: TodoClient,
    session: Generation,
    user: String,
    title: String,
) -> UiEvent {
    let result = client.create(&user, &title).await;
    UiEvent::Remote(RemoteEvent::Created { session, result })
}

pub async fn delete_todo(
    client: TodoClient,
    session: Generation,
    user: String,
    id: TodoId,
) -> UiEvent {
    let result = client.delete(&user, &id).await;
    UiEvent::Remote(RemoteEvent::Deleted {
        session,
        id,
        result,
    })
}

pub async fn timer(timer: TimerEvent, after: Duration) -> UiEvent {
    tokio::time::sleep(after).await;
    UiEvent::Timer(timer)
}
