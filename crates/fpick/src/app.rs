#![forbid(unsafe_code)]

//! The interactive event loop.
//!
//! [`run`] draws the current [`SearchState`] at the bottom of the terminal,
//! folds each input event into a new state, and returns when the operator
//! accepts or cancels. It only sees a [`TerminalPort`], so tests drive it
//! with a scripted port.
//!
//! # Inline layout
//!
//! ```text
//! ┌──────────────────────────┐
//! │ earlier shell output     │  scrolled up by the initial line feeds
//! ├──────────────────────────┤  <- start_row = terminal rows - UI rows
//! │ 3 > o                    │  prompt
//! │ one                      │  match rows
//! │ two                      │
//! └──────────────────────────┘
//! ```
//!
//! A terminal shorter than the requested UI shows fewer match rows, and only
//! rows on screen can be selected. On resize the old rows are blanked before
//! the UI moves.

use std::io;

use fpick_core::event::Event;
use fpick_core::{Action, SearchState, Selection};
use fpick_render::{RenderedFrame, render};
use fpick_tty::TerminalPort;

/// Exit status for a run that failed.
pub const EXIT_ERROR: i32 = 2;

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A line was accepted.
    Selected(String),
    /// Accepted while nothing matched.
    NoSelection,
    /// Cancelled with Ctrl-C or Escape.
    Cancelled,
}

impl Outcome {
    /// Process exit status for this outcome.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Selected(_) => 0,
            Self::NoSelection => 1,
            Self::Cancelled => 130,
        }
    }
}

impl From<Selection> for Outcome {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::Chosen(text) => Self::Selected(text),
            Selection::NoSelection => Self::NoSelection,
        }
    }
}

/// Where the UI sits on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Terminal width in cells.
    pub width: u16,
    /// First UI row.
    pub start_row: u16,
    /// UI rows, prompt included.
    pub rows: u16,
}

impl Layout {
    /// Place `lines` rows at the bottom of a `(columns, rows)` terminal,
    /// clamped to its height.
    #[must_use]
    pub fn compute(lines: usize, (width, height): (u16, u16)) -> Self {
        let rows = u16::try_from(lines).unwrap_or(u16::MAX).min(height);
        Self {
            width,
            start_row: height - rows,
            rows,
        }
    }

    /// Match rows that fit under the prompt.
    #[must_use]
    pub fn match_rows(&self) -> usize {
        usize::from(self.rows.saturating_sub(1))
    }

    /// `state` limited to the match rows on screen, never more than
    /// `requested`.
    #[must_use]
    pub fn fit(&self, state: &SearchState, requested: usize) -> SearchState {
        state.with_visible_limit(requested.min(self.match_rows()))
    }
}

/// Apply one editing or navigation action.
///
/// [`Action::Accept`], [`Action::Cancel`] and [`Action::Redraw`] leave the
/// state as it is; they are handled by the loop.
#[must_use]
pub fn apply(state: &SearchState, action: Action) -> SearchState {
    match action {
        Action::Insert(c) => state.append_search_string(&c.to_string()),
        Action::Backspace => state.backspace(),
        Action::DeleteWord => state.delete_word(),
        Action::ClearQuery => state.clear_query(),
        Action::SelectNext => state.down(),
        Action::SelectPrevious => state.up(),
        Action::Accept | Action::Cancel | Action::Redraw => state.clone(),
    }
}

/// Run the picker on `port` until the operator accepts or cancels.
///
/// Room for the UI is made first by feeding lines. The UI rows are cleared
/// before returning, on errors too.
pub fn run<P: TerminalPort>(port: &mut P, state: SearchState) -> io::Result<Outcome> {
    let requested = state.visible_limit();
    let mut layout = Layout::compute(requested + 1, port.size()?);
    tracing::debug!(?layout, "ui layout");

    port.feed_lines(layout.rows.saturating_sub(1))?;
    let result = event_loop(port, state, requested, &mut layout);
    let cleared = clear(port, layout);

    let outcome = result?;
    cleared?;
    tracing::info!(?outcome, "session finished");
    Ok(outcome)
}

fn event_loop<P: TerminalPort>(
    port: &mut P,
    state: SearchState,
    requested: usize,
    layout: &mut Layout,
) -> io::Result<Outcome> {
    let mut state = layout.fit(&state, requested);
    loop {
        draw_frame(port, &render(&state), *layout)?;

        let action = loop {
            let Some(event) = port.read_event()? else {
                continue;
            };
            if let Event::Resize { width, height } = event {
                clear_rows(port, *layout, height)?;
                *layout = Layout::compute(requested + 1, (width, height));
                state = layout.fit(&state, requested);
                tracing::debug!(?layout, "ui relayout");
            }
            if let Some(action) = Action::from_event(&event) {
                break action;
            }
        };

        match action {
            Action::Accept => return Ok(state.done().into()),
            Action::Cancel => return Ok(Outcome::Cancelled),
            action => state = apply(&state, action),
        }
    }
}

/// Draw `frame` into the rows of `layout` and park the cursor on the prompt.
pub fn draw_frame<P: TerminalPort>(
    port: &mut P,
    frame: &RenderedFrame,
    layout: Layout,
) -> io::Result<()> {
    port.hide_cursor()?;
    for (offset, line) in (0..layout.rows).zip(&frame.lines) {
        port.move_to(layout.start_row + offset, 0)?;
        port.write_line(line, layout.width)?;
    }
    if layout.rows > 0 {
        let last_col = layout.width.saturating_sub(1);
        let col = u16::try_from(frame.cursor_column)
            .unwrap_or(u16::MAX)
            .min(last_col);
        port.move_to(layout.start_row, col)?;
    }
    port.show_cursor()?;
    port.flush()
}

fn clear<P: TerminalPort>(port: &mut P, layout: Layout) -> io::Result<()> {
    clear_rows(port, layout, layout.start_row + layout.rows)?;
    port.move_to(layout.start_row, 0)?;
    port.show_cursor()?;
    port.flush()
}

/// Blank the rows of `layout` that lie above `height`.
fn clear_rows<P: TerminalPort>(port: &mut P, layout: Layout, height: u16) -> io::Result<()> {
    let end = (layout.start_row + layout.rows).min(height);
    for row in layout.start_row..end {
        port.move_to(row, 0)?;
        port.clear_line()?;
    }
    Ok(())
}
