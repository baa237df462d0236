//! Auth feature reducer.
//!
//! Validation, credential checks and transient messages. Persistence goes
//! through the `UserRepository` passed in by the caller.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use todo_core::store::{Session, UserRecord, UserRepository, authenticate, find_user};

use super::state::{AuthField, AuthMode, AuthState, StatusMessage};
use crate::effects::UiEffect;
use crate::events::TimerEvent;

const FILL_ALL_FIELDS: &str = "Please fill all fields";
const USER_EXISTS: &str = "User already exists";
const ACCOUNT_CREATED: &str = "Account created! Signing you in...";
const SAVE_FAILED: &str = "Could not save account";
const ENTER_CREDENTIALS: &str = "Please enter credentials";
const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Outcome of an auth reducer call.
///
/// `login` is set when the view should hand over to an authenticated session.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AuthUpdate {
    pub effects: Vec<UiEffect>,
    pub login: Option<Session>,
}

impl AuthUpdate {
    fn effects(effects: Vec<UiEffect>) -> Self {
        Self {
            effects,
            login: None,
        }
    }

    fn login(session: Session) -> Self {
        Self {
            effects: Vec::new(),
            login: Some(session),
        }
    }
}

/// Switches the form, clearing the message and password.
///
/// The username is only cleared when moving into sign-up.
pub fn switch_mode(auth: &mut AuthState, next: AuthMode) {
    auth.mode = next;
    auth.message = None;
    auth.password.clear();
    if next == AuthMode::SignUp {
        auth.username.clear();
    }
    auth.focus = AuthField::Username;
}

/// Submits the active form.
pub fn submit(auth: &mut AuthState, users: &dyn UserRepository) -> AuthUpdate {
    if auth.pending_login.is_some() {
        tracing::debug!("submit ignored while sign-up login is pending");
        return AuthUpdate::default();
    }
    match auth.mode {
        AuthMode::SignIn => submit_sign_in(auth, users),
        AuthMode::SignUp => submit_sign_up(auth, users),
    }
}

fn submit_sign_up(auth: &mut AuthState, users: &dyn UserRepository) -> AuthUpdate {
    let name = auth.username.text().trim().to_string();
    let password = auth.password.text().to_string();
    let min_username = auth.config.min_username_len;
    let min_password = auth.config.min_password_len;

    if name.is_empty() || password.is_empty() {
        return AuthUpdate::effects(show_message(auth, FILL_ALL_FIELDS));
    }
    if name.chars().count() < min_username {
        let text = format!("Username must be at least {min_username} characters");
        return AuthUpdate::effects(show_message(auth, &text));
    }
    if password.chars().count() < min_password {
        let text = format!("Password must be at least {min_password} characters");
        return AuthUpdate::effects(show_message(auth, &text));
    }

    let mut records = users.load_users();
    if find_user(&records, &name).is_some() {
        tracing::info!(user = %name, "sign-up rejected: name taken");
        return AuthUpdate::effects(show_message(auth, USER_EXISTS));
    }

    records.push(UserRecord::new(name.clone(), password));
    if let Err(err) = users.save_users(&records) {
        tracing::error!(user = %name, error = %format!("{err:#}"), "failed to save new account");
        return AuthUpdate::effects(show_message(auth, SAVE_FAILED));
    }
    tracing::info!(user = %name, "account created");

    let message_timeout = auth.config.signup_message_timeout();
    let mut effects = show_message_for(auth, ACCOUNT_CREATED, message_timeout);
    auth.pending_login = Some(Session::new(name));
    effects.push(UiEffect::StartTimer {
        timer: TimerEvent::SignUpLogin { mount: auth.mount },
        after: auth.config.signup_login_delay(),
    });
    AuthUpdate::effects(effects)
}

fn submit_sign_in(auth: &mut AuthState, users: &dyn UserRepository) -> AuthUpdate {
    let name = auth.username.text().trim().to_string();
    let password = auth.password.text().to_string();

    if name.is_empty() || password.is_empty() {
        return AuthUpdate::effects(show_message(auth, ENTER_CREDENTIALS));
    }

    let records = users.load_users();
    match authenticate(&records, &name, &password) {
        Some(record) => {
            tracing::info!(user = %record.name, "signed in");
            AuthUpdate::login(Session::new(record.name.clone()))
        }
        None => {
            tracing::info!(user = %name, "sign-in rejected");
            auth.password.clear();
            AuthUpdate::effects(show_message(auth, INVALID_CREDENTIALS))
        }
    }
}

fn show_message(auth: &mut AuthState, text: &str) -> Vec<UiEffect> {
    let timeout = auth.config.message_timeout();
    show_message_for(auth, text, timeout)
}

/// Replaces the current message and schedules its expiry.
fn show_message_for(auth: &mut AuthState, text: &str, timeout: Duration) -> Vec<UiEffect> {
    auth.next_message_id += 1;
    let id = auth.next_message_id;
    auth.message = Some(StatusMessage {
        id,
        text: text.to_string(),
    });
    vec![UiEffect::StartTimer {
        timer: TimerEvent::MessageExpired {
            mount: auth.mount,
            message: id,
        },
        after: timeout,
    }]
}

/// Applies a timer scheduled by this mount.
pub fn handle_timer(auth: &mut AuthState, timer: TimerEvent) -> AuthUpdate {
    match timer {
        TimerEvent::MessageExpired { message, .. } => {
            if auth.message.as_ref().is_some_and(|m| m.id == message) {
                auth.message = None;
            }
            AuthUpdate::default()
        }
        TimerEvent::SignUpLogin { .. } => match auth.pending_login.take() {
            Some(session) => AuthUpdate::login(session),
            None => AuthUpdate::default(),
        },
    }
}

pub fn handle_key(auth: &mut AuthState, users: &dyn UserRepository, key: KeyEvent) -> AuthUpdate {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::F(1) => switch_mode(auth, AuthMode::SignIn),
        KeyCode::F(2) => switch_mode(auth, AuthMode::SignUp),
        KeyCode::Char('t') if ctrl => switch_mode(auth, auth.mode.toggled()),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            auth.focus = auth.focus.toggled();
        }
        KeyCode::Enter => return submit(auth, users),
        _ => {
            auth.focused_field_mut().input(key);
        }
    }
    AuthUpdate::default()
}

pub fn handle_paste(auth: &mut AuthState, text: &str) {
    auth.focused_field_mut().insert_str(text);
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use anyhow::bail;
    use todo_core::config::AuthConfig;
    use todo_core::store::{CredentialStore, KvStore, MemoryStore};

    use super::*;
    use crate::common::Generation;

    fn auth() -> AuthState {
        AuthState::new(Generation(7), AuthConfig::default())
    }

    fn fill(auth: &mut AuthState, name: &str, password: &str) {
        auth.username.clear();
        auth.username.insert_str(name);
        auth.password.clear();
        auth.password.insert_str(password);
    }

    fn store_with(users: &[UserRecord]) -> CredentialStore<MemoryStore> {
        let store = CredentialStore::new(MemoryStore::new());
        store.save_users(users).unwrap();
        store
    }

    fn message_expiry(update: &AuthUpdate) -> Option<(u64, Duration)> {
        update.effects.iter().find_map(|effect| match effect {
            UiEffect::StartTimer {
                timer: TimerEvent::MessageExpired { message, .. },
                after,
            } => Some((*message, *after)),
            _ => None,
        })
    }

    /// Repository whose writes always fail.
    struct ReadOnlyUsers(Mutex<Vec<UserRecord>>);

    impl UserRepository for ReadOnlyUsers {
        fn load_users(&self) -> Vec<UserRecord> {
            self.0.lock().unwrap().clone()
        }

        fn save_users(&self, _users: &[UserRecord]) -> anyhow::Result<()> {
            bail!("disk full")
        }
    }

    #[test]
    fn test_switch_mode_clears_username_only_into_sign_up() {
        let mut auth = auth();
        fill(&mut auth, "Jane", "abcd");
        auth.message = Some(StatusMessage {
            id: 1,
            text: "x".into(),
        });

        switch_mode(&mut auth, AuthMode::SignUp);
        assert_eq!(auth.mode, AuthMode::SignUp);
        assert!(auth.username.is_empty());
        assert!(auth.password.is_empty());
        assert!(auth.message.is_none());

        fill(&mut auth, "Jane", "abcd");
        switch_mode(&mut auth, AuthMode::SignIn);
        assert_eq!(auth.username.text(), "Jane");
        assert!(auth.password.is_empty());
    }

    #[test]
    fn test_sign_up_validation_order() {
        let store = store_with(&[]);
        let cases = [
            ("", "abcd", "Please fill all fields"),
            ("   ", "abcd", "Please fill all fields"),
            ("alice", "", "Please fill all fields"),
            (" al ", "1234", "Username must be at least 3 characters"),
            ("alice", "123", "Password must be at least 4 characters"),
        ];
        for (name, password, expected) in cases {
            let mut auth = auth();
            switch_mode(&mut auth, AuthMode::SignUp);
            fill(&mut auth, name, password);
            let update = submit(&mut auth, &store);
            assert_eq!(auth.message_text(), Some(expected), "{name:?}/{password:?}");
            assert!(update.login.is_none());
            assert!(auth.pending_login.is_none());
        }
        assert!(store.load_users().is_empty());
    }

    #[test]
    fn test_sign_up_lengths_count_chars() {
        let store = store_with(&[]);
        let mut auth = auth();
        switch_mode(&mut auth, AuthMode::SignUp);
        // Three scalar values, six bytes.
        fill(&mut auth, "éçà", "ññññ");
        submit(&mut auth, &store);
        assert_eq!(store.load_users(), vec![UserRecord::new("éçà", "ññññ")]);
    }

    #[test]
    fn test_sign_up_rejects_case_insensitive_duplicate() {
        let store = store_with(&[UserRecord::new("Jane", "abcd")]);
        let mut auth = auth();
        switch_mode(&mut auth, AuthMode::SignUp);
        fill(&mut auth, "jane", "zzzz");

        let update = submit(&mut auth, &store);
        assert_eq!(auth.message_text(), Some("User already exists"));
        assert!(update.login.is_none());
        assert_eq!(store.load_users().len(), 1);
    }

    #[test]
    fn test_sign_up_success_schedules_delayed_login() {
        let store = store_with(&[]);
        let mut auth = auth();
        switch_mode(&mut auth, AuthMode::SignUp);
        fill(&mut auth, "  alice ", "1234");

        let update = submit(&mut auth, &store);
        assert!(update.login.is_none(), "login must be delayed");
        assert_eq!(store.load_users(), vec![UserRecord::new("alice", "1234")]);
        assert_eq!(auth.message_text(), Some("Account created! Signing you in..."));
        assert_eq!(
            message_expiry(&update).map(|(_, after)| after),
            Some(Duration::from_millis(1200))
        );
        assert!(update.effects.contains(&UiEffect::StartTimer {
            timer: TimerEvent::SignUpLogin {
                mount: Generation(7)
            },
            after: Duration::from_millis(600),
        }));

        let fired = handle_timer(
            &mut auth,
            TimerEvent::SignUpLogin {
                mount: Generation(7),
            },
        );
        assert_eq!(fired.login, Some(Session::new("alice")));
        assert!(auth.pending_login.is_none());
    }

    #[test]
    fn test_submit_ignored_while_login_pending() {
        let store = store_with(&[]);
        let mut auth = auth();
        switch_mode(&mut auth, AuthMode::SignUp);
        fill(&mut auth, "alice", "1234");
        submit(&mut auth, &store);

        fill(&mut auth, "bobby", "1234");
        let update = submit(&mut auth, &store);
        assert_eq!(update, AuthUpdate::default());
        assert_eq!(store.load_users().len(), 1);
    }

    #[test]
    fn test_sign_up_save_failure_shows_message() {
        let users = ReadOnlyUsers(Mutex::new(Vec::new()));
        let mut auth = auth();
        switch_mode(&mut auth, AuthMode::SignUp);
        fill(&mut auth, "alice", "1234");

        let update = submit(&mut auth, &users);
        assert_eq!(auth.message_text(), Some("Could not save account"));
        assert!(auth.pending_login.is_none());
        let schedules_login = update.effects.iter().any(|effect| {
            matches!(
                effect,
                UiEffect::StartTimer {
                    timer: TimerEvent::SignUpLogin { .. },
                    ..
                }
            )
        });
        assert!(!schedules_login);
    }

    #[test]
    fn test_sign_in_uses_canonical_name() {
        let store = store_with(&[UserRecord::new("Jane", "abcd")]);
        let mut auth = auth();
        fill(&mut auth, " jAnE ", "abcd");

        let update = submit(&mut auth, &store);
        assert_eq!(update.login, Some(Session::new("Jane")));
    }

    #[test]
    fn test_sign_in_wrong_password_clears_password() {
        let store = store_with(&[UserRecord::new("Jane", "abcd")]);
        let before = store.kv().get("todo.users").unwrap();
        let mut auth = auth();
        fill(&mut auth, "Jane", "ABCD");

        let update = submit(&mut auth, &store);
        assert!(update.login.is_none());
        assert_eq!(auth.message_text(), Some("Invalid username or password"));
        assert!(auth.password.is_empty());
        assert_eq!(auth.username.text(), "Jane");
        assert_eq!(store.kv().get("todo.users").unwrap(), before);
    }

    #[test]
    fn test_sign_in_empty_fields() {
        let store = store_with(&[]);
        let mut auth = auth();
        fill(&mut auth, "Jane", "");
        let update = submit(&mut auth, &store);
        assert_eq!(auth.message_text(), Some("Please enter credentials"));
        assert_eq!(
            message_expiry(&update).map(|(_, after)| after),
            Some(Duration::from_millis(1800))
        );
    }

    #[test]
    fn test_older_expiry_does_not_clear_newer_message() {
        let store = store_with(&[]);
        let mut auth = auth();
        let first = message_expiry(&submit(&mut auth, &store)).unwrap().0;
        fill(&mut auth, "Jane", "nope");
        let second = message_expiry(&submit(&mut auth, &store)).unwrap().0;
        assert_ne!(first, second);

        handle_timer(
            &mut auth,
            TimerEvent::MessageExpired {
                mount: Generation(7),
                message: first,
            },
        );
        assert_eq!(auth.message_text(), Some("Invalid username or password"));

        handle_timer(
            &mut auth,
            TimerEvent::MessageExpired {
                mount: Generation(7),
                message: second,
            },
        );
        assert!(auth.message.is_none());
    }

    #[test]
    fn test_keys_move_focus_and_switch_mode() {
        let store = store_with(&[]);
        let mut auth = auth();
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);

        handle_key(&mut auth, &store, key(KeyCode::Char('a')));
        handle_key(&mut auth, &store, key(KeyCode::Tab));
        handle_key(&mut auth, &store, key(KeyCode::Char('b')));
        assert_eq!(auth.username.text(), "a");
        assert_eq!(auth.password.text(), "b");
        assert_eq!(auth.focus, AuthField::Password);

        handle_key(&mut auth, &store, key(KeyCode::F(2)));
        assert_eq!(auth.mode, AuthMode::SignUp);
        assert_eq!(auth.focus, AuthField::Username);

        handle_key(
            &mut auth,
            &store,
            KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL),
        );
        assert_eq!(auth.mode, AuthMode::SignIn);
    }
}
