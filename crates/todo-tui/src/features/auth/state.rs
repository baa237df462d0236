use todo_core::config::AuthConfig;
use todo_core::store::Session;

use crate::common::{Generation, TextField};

/// Which form the auth view is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn title(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign In",
            AuthMode::SignUp => "Sign Up",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthField {
    #[default]
    Username,
    Password,
}

impl AuthField {
    pub fn toggled(self) -> Self {
        match self {
            AuthField::Username => AuthField::Password,
            AuthField::Password => AuthField::Username,
        }
    }
}

/// A transient status line. `id` matches the expiry timer that clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub id: u64,
    pub text: String,
}

/// State of one mount of the auth view.
#[derive(Debug)]
pub struct AuthState {
    /// Timers scheduled by another mount carry a different value.
    pub mount: Generation,
    pub mode: AuthMode,
    pub username: TextField,
    pub password: TextField,
    pub focus: AuthField,
    pub message: Option<StatusMessage>,
    /// Set between a successful sign-up and the delayed login.
    pub pending_login: Option<Session>,
    pub(super) config: AuthConfig,
    pub(super) next_message_id: u64,
}

impl AuthState {
    pub fn new(mount: Generation, config: AuthConfig) -> Self {
        Self {
            mount,
            mode: AuthMode::default(),
            username: TextField::default(),
            password: TextField::default(),
            focus: AuthField::default(),
            message: None,
            pending_login: None,
            config,
            next_message_id: 0,
        }
    }

    pub fn focused_field_mut(&mut self) -> &mut TextField {
        match self.focus {
            AuthField::Username => &mut self.username,
            AuthField::Password => &mut self.password,
        }
    }

    pub fn message_text(&self) -> Option<&str> {
        self.message.as_ref().map(|m| m.text.as_str())
    }
}
