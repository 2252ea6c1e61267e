#![forbid(unsafe_code)]

//! Key bindings.
//!
//! | Input | Action |
//! |-------|--------|
//! | printable char (no Ctrl/Alt) | [`Action::Insert`] |
//! | Backspace, Ctrl-H | [`Action::Backspace`] |
//! | Ctrl-W | [`Action::DeleteWord`] |
//! | Ctrl-U | [`Action::ClearQuery`] |
//! | Down, Ctrl-N | [`Action::SelectNext`] |
//! | Up, Ctrl-P | [`Action::SelectPrevious`] |
//! | Enter, Ctrl-J, Ctrl-M | [`Action::Accept`] |
//! | Ctrl-C, Escape | [`Action::Cancel`] |
//! | resize | [`Action::Redraw`] |
//!
//! Key releases and anything not listed map to `None`.

use crate::event::{Event, KeyCode, KeyEvent, KeyEventKind};

/// What an input event asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Append a character to the query.
    Insert(char),
    /// Delete the last query character.
    Backspace,
    /// Delete the last word of the query.
    DeleteWord,
    /// Empty the query.
    ClearQuery,
    /// Move the selection down.
    SelectNext,
    /// Move the selection up.
    SelectPrevious,
    /// Confirm the current selection.
    Accept,
    /// Abort without a selection.
    Cancel,
    /// Repaint without changing state.
    Redraw,
}

impl Action {
    /// Map an input event to an action.
    #[must_use]
    pub fn from_event(event: &Event) -> Option<Self> {
        let action = match event {
            Event::Resize { .. } => Some(Self::Redraw),
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::from_key(key),
            Event::Key(_) => None,
        };
        crate::trace!(?event, ?action, "key mapped");
        action
    }

    fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.ctrl() {
            return match key.code {
                KeyCode::Char(c) => Self::from_ctrl_char(c.to_ascii_lowercase()),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) if key.alt() || c.is_control() => None,
            KeyCode::Char(c) => Some(Self::Insert(c)),
            KeyCode::Backspace => Some(Self::Backspace),
            KeyCode::Enter => Some(Self::Accept),
            KeyCode::Escape => Some(Self::Cancel),
            KeyCode::Down => Some(Self::SelectNext),
            KeyCode::Up => Some(Self::SelectPrevious),
        }
    }

    fn from_ctrl_char(c: char) -> Option<Self> {
        match c {
            'c' => Some(Self::Cancel),
            'h' => Some(Self::Backspace),
            'w' => Some(Self::DeleteWord),
            'u' => Some(Self::ClearQuery),
            'n' => Some(Self::SelectNext),
            'p' => Some(Self::SelectPrevious),
            'j' | 'm' => Some(Self::Accept),
            _ => None,
        }
    }
}
