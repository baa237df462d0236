//! Todo feature slice.
//!
//! The signed-in user's list as last reported by the remote service, plus
//! the add field and selection.

mod render;
mod state;
mod update;

pub use render::render_todos;
pub use state::TodoState;
pub use update::{
    TodoUpdate, add_todo, apply_remote, delete_selected, delete_todo, fetch_all, handle_key,
    handle_paste,
};
