//! Auth feature slice.
//!
//! Sign-in and sign-up against the local user repository. A successful
//! submit yields a `Session` for the shell to start.

mod render;
mod state;
mod update;

pub use render::render_auth;
pub use state::{AuthField, AuthMode, AuthState, StatusMessage};
pub use update::{AuthUpdate, handle_key, handle_paste, handle_timer, submit, switch_mode};
