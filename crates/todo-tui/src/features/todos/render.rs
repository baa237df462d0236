//! Todo feature view.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use super::state::TodoState;
use crate::common::text::truncate_with_ellipsis;

const UNREACHABLE: &str = "Cannot connect to backend. Please start the server.";
const INPUT_HEIGHT: u16 = 3;

/// Renders the list, the add field, or the degraded notice.
pub fn render_todos(frame: &mut Frame, state: &TodoState, area: Rect, spinner: &str) {
    if !state.reachable {
        render_unreachable(frame, area);
        return;
    }

    let [list_area, input_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(INPUT_HEIGHT)]).areas(area);

    render_list(frame, state, list_area, spinner);
    render_input(frame, state, input_area);
}

fn render_unreachable(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            UNREACHABLE,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Ctrl+L sign out · Esc quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_list(frame: &mut Frame, state: &TodoState, area: Rect, spinner: &str) {
    let mut title = format!(" Todos ({}) ", state.items.len());
    if state.in_flight > 0 {
        title.push_str(spinner);
        title.push(' ');
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title);

    if state.items.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "Nothing to do yet. Type a title below and press Enter.",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    // Borders plus the checkbox prefix.
    let title_width = area.width.saturating_sub(2 + 4) as usize;
    let items: Vec<ListItem> = state
        .items
        .iter()
        .map(|item| {
            let (mark, style) = if item.completed {
                (
                    "[x] ",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT),
                )
            } else {
                ("[ ] ", Style::default())
            };
            ListItem::new(Line::from(vec![
                Span::raw(mark),
                Span::styled(truncate_with_ellipsis(&item.title, title_width), style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));
    let mut list_state = ListState::default().with_selected(state.selected);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_input(frame: &mut Frame, state: &TodoState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Add a todo ")
        .title_bottom(Line::from(" Enter add · ↑↓ select · Ctrl+D delete · Ctrl+L sign out "));
    let inner = block.inner(area);

    let text = state.input.text();
    let before: String = text.chars().take(state.input.cursor()).collect();
    let cursor_col = before.width();
    let width = inner.width as usize;
    // Keep the cursor visible by scrolling the field horizontally.
    let scroll = cursor_col.saturating_sub(width.saturating_sub(1));

    frame.render_widget(
        Paragraph::new(text.to_string())
            .block(block)
            .scroll((0, u16::try_from(scroll).unwrap_or(u16::MAX))),
        area,
    );

    let visible = u16::try_from(cursor_col - scroll).unwrap_or(inner.width);
    frame.set_cursor_position(Position::new(inner.x + visible, inner.y));
}
