use todo_core::remote::TodoItem;

use crate::common::{Generation, TextField};

/// State of one todo session.
#[derive(Debug)]
pub struct TodoState {
    /// Completions issued under another session carry a different value.
    pub session: Generation,
    pub user: String,
    pub items: Vec<TodoItem>,
    /// Cleared by the first failed remote call; never set again this session.
    pub reachable: bool,
    pub input: TextField,
    pub selected: Option<usize>,
    /// Remote calls issued and not yet completed.
    pub in_flight: usize,
}

impl TodoState {
    pub fn new(session: Generation, user: impl Into<String>) -> Self {
        Self {
            session,
            user: user.into(),
            items: Vec::new(),
            reachable: true,
            input: TextField::default(),
            selected: None,
            in_flight: 0,
        }
    }

    pub fn selected_item(&self) -> Option<&TodoItem> {
        self.selected.and_then(|index| self.items.get(index))
    }

    /// Moves the selection by `delta`, clamped to the list.
    pub fn move_selection(&mut self, delta: isize) {
        if self.items.is_empty() {
            self.selected = None;
            return;
        }
        let last = self.items.len() - 1;
        let next = match self.selected {
            None if delta < 0 => last,
            None => 0,
            Some(current) => current.saturating_add_signed(delta).min(last),
        };
        self.selected = Some(next);
    }

    /// Keeps the selection inside the list after it changed.
    pub(super) fn clamp_selection(&mut self) {
        self.selected = match self.selected {
            _ if self.items.is_empty() => None,
            Some(index) => Some(index.min(self.items.len() - 1)),
            None => None,
        };
    }
}
