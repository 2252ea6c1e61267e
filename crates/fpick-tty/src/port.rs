#![forbid(unsafe_code)]

//! The terminal seam.
//!
//! The event loop only ever talks to a [`TerminalPort`]. [`TtyPort`] is the
//! real one; tests drive the loop with a scripted port that records what was
//! drawn.

use std::io::{self, Write};

use fpick_core::event::Event;
use fpick_render::Presenter;
use fpick_text::StyledText;

use crate::session::{TerminalSession, open_ui_output};

/// Everything the event loop needs from a terminal.
///
/// Rows and columns are 0-indexed. Output may be buffered until
/// [`flush`](TerminalPort::flush).
pub trait TerminalPort {
    /// Block until the next input event. `Ok(None)` means an event arrived
    /// that has no meaning here and should be skipped.
    fn read_event(&mut self) -> io::Result<Option<Event>>;

    /// Terminal size as `(columns, rows)`.
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Emit `rows` line feeds at the cursor, scrolling earlier output up.
    fn feed_lines(&mut self, rows: u16) -> io::Result<()>;

    /// Move the cursor.
    fn move_to(&mut self, row: u16, col: u16) -> io::Result<()>;

    /// Write `line` at the cursor, clipped and padded to `width` cells.
    fn write_line(&mut self, line: &StyledText, width: u16) -> io::Result<()>;

    /// Clear the row under the cursor.
    fn clear_line(&mut self) -> io::Result<()>;

    /// Hide the cursor.
    fn hide_cursor(&mut self) -> io::Result<()>;

    /// Show the cursor.
    fn show_cursor(&mut self) -> io::Result<()>;

    /// Push buffered output to the device.
    fn flush(&mut self) -> io::Result<()>;
}

/// A [`TerminalPort`] on the controlling terminal.
///
/// Input and size come from crossterm; output goes through a [`Presenter`]
/// on `/dev/tty` (or stderr when there is none).
pub struct TtyPort {
    // Declared first so pending output is flushed before the session restores
    // the terminal.
    presenter: Presenter<Box<dyn Write + Send>>,
    session: TerminalSession,
}

impl TtyPort {
    /// Enter raw mode and open the UI device.
    pub fn open() -> io::Result<Self> {
        let session = TerminalSession::new()?;
        Ok(Self {
            presenter: Presenter::new(open_ui_output()),
            session,
        })
    }

    /// Flush and restore the terminal now instead of at drop.
    pub fn close(mut self) -> io::Result<()> {
        let flushed = self.presenter.flush();
        self.session.restore();
        flushed
    }
}

impl std::fmt::Debug for TtyPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtyPort")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl TerminalPort for TtyPort {
    fn read_event(&mut self) -> io::Result<Option<Event>> {
        self.session.read_event()
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        self.session.size()
    }

    fn feed_lines(&mut self, rows: u16) -> io::Result<()> {
        self.presenter.feed_lines(rows)
    }

    fn move_to(&mut self, row: u16, col: u16) -> io::Result<()> {
        self.presenter.move_to(row, col)
    }

    fn write_line(&mut self, line: &StyledText, width: u16) -> io::Result<()> {
        self.presenter.write_line(line, width)
    }

    fn clear_line(&mut self) -> io::Result<()> {
        self.presenter.clear_line()
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.presenter.hide_cursor()
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.presenter.show_cursor()
    }

    fn flush(&mut self) -> io::Result<()> {
        self.presenter.flush()
    }
}
