//! Auth feature view.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::state::{AuthField, AuthMode, AuthState};
use crate::common::TextField;
use crate::common::text::{mask, truncate_with_ellipsis};

const CARD_WIDTH: u16 = 48;
const CARD_HEIGHT: u16 = 11;
const LABEL_WIDTH: u16 = 10;
const PASSWORD_MASK: char = '•';

/// Renders the sign-in / sign-up card centered in `area`.
pub fn render_auth(frame: &mut Frame, auth: &AuthState, area: Rect) {
    let card = centered(area, CARD_WIDTH, CARD_HEIGHT);
    frame.render_widget(Clear, card);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", auth.mode.title()))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let field_width = inner.width.saturating_sub(LABEL_WIDTH) as usize;
    let masked = mask(auth.password.text(), PASSWORD_MASK);
    let username = field_line(
        "Username",
        auth.username.text(),
        field_width,
        auth.focus == AuthField::Username,
    );
    let password = field_line(
        "Password",
        &masked,
        field_width,
        auth.focus == AuthField::Password,
    );

    let message = match auth.message_text() {
        Some(text) => Line::from(Span::styled(
            truncate_with_ellipsis(text, inner.width as usize),
            Style::default().fg(Color::Yellow),
        )),
        None => Line::from(""),
    };

    let lines = vec![
        mode_tabs(auth.mode),
        Line::from(""),
        username,
        Line::from(""),
        password,
        Line::from(""),
        message,
        Line::from(""),
        Line::from(Span::styled(
            "Enter submit · Tab field · F1/F2 · Esc quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);

    // The cursor is measured on what is drawn, so the password uses its mask.
    let (shown, field, row) = match auth.focus {
        AuthField::Username => (auth.username.text(), &auth.username, 2),
        AuthField::Password => (masked.as_str(), &auth.password, 4),
    };
    if auth.pending_login.is_none() {
        frame.set_cursor_position(cursor_position(inner, shown, field, row, field_width));
    }
}

fn mode_tabs(active: AuthMode) -> Line<'static> {
    let tab = |mode: AuthMode, key: &str| {
        let label = format!(" {key} {} ", mode.title());
        if mode == active {
            Span::styled(
                label,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(label, Style::default().fg(Color::DarkGray))
        }
    };
    Line::from(vec![
        tab(AuthMode::SignIn, "F1"),
        Span::raw(" "),
        tab(AuthMode::SignUp, "F2"),
    ])
}

fn field_line(label: &str, value: &str, width: usize, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::from(vec![
        Span::styled(
            format!("{label:<width$}", width = LABEL_WIDTH as usize),
            label_style,
        ),
        Span::raw(truncate_with_ellipsis(value, width)),
    ])
}

fn cursor_position(
    inner: Rect,
    shown: &str,
    field: &TextField,
    row: u16,
    field_width: usize,
) -> Position {
    let before: String = shown.chars().take(field.cursor()).collect();
    let offset = before.width().min(field_width);
    Position::new(
        inner.x + LABEL_WIDTH + u16::try_from(offset).unwrap_or(u16::MAX),
        inner.y + row,
    )
}

/// Centers a `width` x `height` rectangle inside `area`, clamped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
