//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::state::{AppState, Mode};
use crate::{auth, todos};

const HEADER_HEIGHT: u16 = 1;
const APP_TITLE: &str = "Todo";

/// Spinner frames shown while remote calls are in flight.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let [header, body] =
        Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)])
            .areas(frame.area());

    render_header(frame, app, header);

    match &app.mode {
        Mode::Unauthenticated(auth_state) => auth::render_auth(frame, auth_state, body),
        Mode::Authenticated(todo_state) => {
            let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
            todos::render_todos(frame, todo_state, body, spinner);
        }
    }
}

fn render_header(frame: &mut Frame, app: &AppState, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {APP_TITLE} "),
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(user) = app.current_user() {
        spans.push(Span::raw("  Signed in as "));
        spans.push(Span::styled(
            user.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
