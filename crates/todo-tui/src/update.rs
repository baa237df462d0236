//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::{RemoteEvent, TimerEvent, UiEvent};
use crate::state::{AppState, Mode};
use crate::{auth, shell, todos};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Timer(timer) => handle_timer(app, timer),
        UiEvent::Remote(remote) => {
            handle_remote(app, remote);
            vec![]
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Paste(text) => {
            match &mut app.mode {
                Mode::Unauthenticated(auth_state) => auth::handle_paste(auth_state, &text),
                Mode::Authenticated(todo_state) => todos::handle_paste(todo_state, &text),
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.kind != KeyEventKind::Press {
        return vec![];
    }
    let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl_c || key.code == KeyCode::Esc {
        return vec![UiEffect::Quit];
    }

    match &mut app.mode {
        Mode::Unauthenticated(auth_state) => {
            let update = auth::handle_key(auth_state, app.repos.users.as_ref(), key);
            finish_auth(app, update)
        }
        Mode::Authenticated(todo_state) => {
            let update = todos::handle_key(todo_state, key);
            if update.logout {
                let mut effects = update.effects;
                effects.extend(shell::on_logout(app));
                effects
            } else {
                update.effects
            }
        }
    }
}

fn finish_auth(app: &mut AppState, update: auth::AuthUpdate) -> Vec<UiEffect> {
    let mut effects = update.effects;
    if let Some(session) = update.login {
        effects.extend(shell::on_login(app, session));
    }
    effects
}

fn handle_timer(app: &mut AppState, timer: TimerEvent) -> Vec<UiEffect> {
    match &mut app.mode {
        Mode::Unauthenticated(auth_state) if auth_state.mount == timer.mount() => {
            let update = auth::handle_timer(auth_state, timer);
            finish_auth(app, update)
        }
        _ => {
            tracing::debug!(?timer, "dropping stale timer");
            vec![]
        }
    }
}

fn handle_remote(app: &mut AppState, event: RemoteEvent) {
    match &mut app.mode {
        Mode::Authenticated(todo_state) if todo_state.session == event.session() => {
            todos::apply_remote(todo_state, event);
        }
        _ => {
            tracing::debug!(session = event.session().0, "dropping stale remote completion");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use reqwest::StatusCode;
    use todo_core::config::AuthConfig;
    use todo_core::remote::{RemoteError, TodoId, TodoItem};
    use todo_core::store::{
        CredentialStore, MemoryStore, Session, SessionRepository, UserRecord, UserRepository,
    };

    use super::*;
    use crate::auth::AuthMode;
    use crate::common::Generation;
    use crate::state::Repositories;

    struct Harness {
        store: Arc<CredentialStore<MemoryStore>>,
        app: AppState,
        effects: Vec<UiEffect>,
    }

    impl Harness {
        fn new(users: &[UserRecord], session: Option<&str>) -> Self {
            let store = Arc::new(CredentialStore::new(MemoryStore::new()));
            store.save_users(users).unwrap();
            if let Some(name) = session {
                store.save_session(&Session::new(name)).unwrap();
            }
            let repos = Repositories::from_store(Arc::clone(&store));
            let (app, effects) = shell::start(repos, AuthConfig::default());
            Self {
                store,
                app,
                effects,
            }
        }

        fn send(&mut self, event: UiEvent) -> Vec<UiEffect> {
            let effects = update(&mut self.app, event);
            self.effects.extend(effects.iter().cloned());
            effects
        }

        fn press(&mut self, code: KeyCode) -> Vec<UiEffect> {
            self.send(UiEvent::Terminal(Event::Key(KeyEvent::new(
                code,
                KeyModifiers::NONE,
            ))))
        }

        fn ctrl(&mut self, ch: char) -> Vec<UiEffect> {
            self.send(UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char(ch),
                KeyModifiers::CONTROL,
            ))))
        }

        fn type_text(&mut self, text: &str) {
            for ch in text.chars() {
                self.press(KeyCode::Char(ch));
            }
        }

        fn auth(&self) -> &auth::AuthState {
            match &self.app.mode {
                Mode::Unauthenticated(auth_state) => auth_state,
                Mode::Authenticated(_) => panic!("expected auth view"),
            }
        }

        fn todos(&self) -> &todos::TodoState {
            match &self.app.mode {
                Mode::Authenticated(todo_state) => todo_state,
                Mode::Unauthenticated(_) => panic!("expected todo view"),
            }
        }

        /// Fires every timer scheduled so far, in order.
        fn fire_timers(&mut self) {
            let timers: Vec<TimerEvent> = self
                .effects
                .drain(..)
                .filter_map(|effect| match effect {
                    UiEffect::StartTimer { timer, .. } => Some(timer),
                    _ => None,
                })
                .collect();
            for timer in timers {
                self.send(UiEvent::Timer(timer));
            }
        }
    }

    fn item(id: i64, title: &str) -> TodoItem {
        TodoItem {
            id: TodoId::Number(id),
            title: title.to_string(),
            completed: false,
        }
    }

    #[test]
    fn test_sign_in_scenario_persists_canonical_session() {
        let mut h = Harness::new(&[UserRecord::new("Jane", "abcd")], None);
        h.type_text("jane");
        h.press(KeyCode::Tab);
        h.type_text("abcd");
        let effects = h.press(KeyCode::Enter);

        assert_eq!(h.store.load_session(), Some(Session::new("Jane")));
        let session = h.todos().session;
        assert_eq!(
            effects,
            vec![UiEffect::FetchTodos {
                session,
                user: "Jane".to_string(),
            }]
        );
    }

    #[test]
    fn test_wrong_password_scenario() {
        let mut h = Harness::new(&[UserRecord::new("Jane", "abcd")], None);
        h.type_text("Jane");
        h.press(KeyCode::Tab);
        h.type_text("ABCD");
        h.press(KeyCode::Enter);

        assert_eq!(h.auth().message_text(), Some("Invalid username or password"));
        assert!(h.auth().password.is_empty());
        assert_eq!(h.store.load_session(), None);
    }

    #[test]
    fn test_sign_up_scenario_logs_in_after_delay() {
        let mut h = Harness::new(&[], None);
        h.press(KeyCode::F(2));
        h.type_text("al");
        h.press(KeyCode::Tab);
        h.type_text("1234");
        h.press(KeyCode::Enter);
        assert_eq!(
            h.auth().message_text(),
            Some("Username must be at least 3 characters")
        );
        assert!(h.store.load_users().is_empty());

        h.press(KeyCode::Tab);
        h.type_text("ice");
        let effects = h.press(KeyCode::Enter);
        assert_eq!(h.store.load_users(), vec![UserRecord::new("alice", "1234")]);
        assert!(effects.contains(&UiEffect::StartTimer {
            timer: TimerEvent::SignUpLogin {
                mount: h.auth().mount
            },
            after: Duration::from_millis(600),
        }));
        assert!(!h.app.is_authenticated(), "transition must be delayed");

        h.fire_timers();
        assert_eq!(h.todos().user, "alice");
        assert_eq!(h.store.load_session(), Some(Session::new("alice")));
    }

    #[test]
    fn test_resumed_session_and_logout() {
        let mut h = Harness::new(&[], Some("Jane"));
        let session = h.todos().session;
        h.send(UiEvent::Remote(RemoteEvent::Fetched {
            session,
            result: Ok(vec![item(1, "milk")]),
        }));
        assert_eq!(h.todos().items.len(), 1);

        h.ctrl('l');
        assert_eq!(h.store.load_session(), None);
        assert_eq!(h.auth().mode, AuthMode::SignIn);
        assert!(h.auth().username.is_empty());
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let mut h = Harness::new(&[UserRecord::new("Jane", "abcd")], Some("Jane"));
        let old_session = h.todos().session;

        h.ctrl('l');
        h.type_text("Jane");
        h.press(KeyCode::Tab);
        h.type_text("abcd");
        h.press(KeyCode::Enter);
        let new_session = h.todos().session;
        assert_ne!(old_session, new_session);

        h.send(UiEvent::Remote(RemoteEvent::Fetched {
            session: old_session,
            result: Err(RemoteError::Status(StatusCode::BAD_GATEWAY)),
        }));
        h.send(UiEvent::Remote(RemoteEvent::Created {
            session: old_session,
            result: Ok(item(4, "ghost")),
        }));
        assert!(h.todos().reachable);
        assert!(h.todos().items.is_empty());
        assert_eq!(h.todos().in_flight, 1);
    }

    #[test]
    fn test_timer_from_torn_down_auth_view_is_dropped() {
        let mut h = Harness::new(&[UserRecord::new("Jane", "abcd")], None);
        h.press(KeyCode::Enter);
        let stale = h.effects.clone();

        h.type_text("Jane");
        h.press(KeyCode::Tab);
        h.type_text("abcd");
        h.press(KeyCode::Enter);
        h.ctrl('l');

        h.press(KeyCode::Enter);
        let fresh_message = h.auth().message.clone();
        assert!(fresh_message.is_some());

        for effect in stale {
            if let UiEffect::StartTimer { timer, .. } = effect {
                h.send(UiEvent::Timer(timer));
            }
        }
        assert_eq!(h.auth().message, fresh_message);
    }

    #[test]
    fn test_sign_up_timer_after_quit_to_other_mount_is_ignored() {
        let mut h = Harness::new(&[], None);
        h.press(KeyCode::F(2));
        h.type_text("alice");
        h.press(KeyCode::Tab);
        h.type_text("1234");
        h.press(KeyCode::Enter);
        let pending: Vec<TimerEvent> = h
            .effects
            .iter()
            .filter_map(|effect| match effect {
                UiEffect::StartTimer {
                    timer: timer @ TimerEvent::SignUpLogin { .. },
                    ..
                } => Some(*timer),
                _ => None,
            })
            .collect();
        assert_eq!(pending.len(), 1);

        // Remount the auth view by cycling a session.
        h.fire_timers();
        h.ctrl('l');

        h.send(UiEvent::Timer(pending[0]));
        assert!(!h.app.is_authenticated());
    }

    #[test]
    fn test_quit_keys() {
        let mut h = Harness::new(&[], None);
        assert_eq!(h.press(KeyCode::Esc), vec![UiEffect::Quit]);
        assert_eq!(h.ctrl('c'), vec![UiEffect::Quit]);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut h = Harness::new(&[], None);
        let mut release = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        h.send(UiEvent::Terminal(Event::Key(release)));
        assert!(h.auth().username.is_empty());
    }

    #[test]
    fn test_paste_goes_to_focused_field() {
        let mut h = Harness::new(&[], None);
        h.press(KeyCode::Tab);
        h.send(UiEvent::Terminal(Event::Paste("hunter2".to_string())));
        assert_eq!(h.auth().password.text(), "hunter2");
        assert!(h.auth().username.is_empty());
    }
}
