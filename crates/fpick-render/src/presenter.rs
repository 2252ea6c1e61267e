#![forbid(unsafe_code)]

//! Presenter: styled lines to ANSI bytes.
//!
//! The presenter owns a buffered writer and knows how to turn one
//! [`StyledText`] into bytes clipped to a given width. Where a line goes and
//! when the frame is flushed is decided by the caller.
//!
//! # Line Contract
//!
//! - Literals are cut on grapheme boundaries so the line never exceeds the
//!   width; style markers are always emitted.
//! - The line ends with an SGR reset, then spaces up to the width, so the
//!   padding is unstyled and overwrites whatever was there before.
//!
//! # Usage
//!
//! ```
//! use fpick_render::Presenter;
//! use fpick_text::{StyleTag, styled_text};
//!
//! let mut presenter = Presenter::new(Vec::new());
//! presenter.move_to(0, 0)?;
//! presenter.write_line(&styled_text![StyleTag::Inverse, "two", StyleTag::Reset], 5)?;
//! let bytes = presenter.into_inner()?;
//! assert_eq!(bytes, b"\x1b[1;1H\x1b[7mtwo\x1b[0m\x1b[0m  ");
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, BufWriter, Write};

use fpick_text::{Segment, StyledText};

use crate::ansi;

/// Size of the internal write buffer (16KB).
const BUFFER_CAPACITY: usize = 16 * 1024;

/// Buffered ANSI writer for styled lines.
#[derive(Debug)]
pub struct Presenter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> Presenter<W> {
    /// Wrap `writer`. Nothing is written until a method is called.
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(BUFFER_CAPACITY, writer),
        }
    }

    /// Move the cursor to a 0-indexed cell.
    pub fn move_to(&mut self, row: u16, col: u16) -> io::Result<()> {
        ansi::cup(&mut self.writer, row, col)
    }

    /// Write `line` clipped and padded to exactly `width` cells.
    pub fn write_line(&mut self, line: &StyledText, width: u16) -> io::Result<()> {
        let width = usize::from(width);
        let clipped = line.truncate_to_width(width);

        for segment in clipped.segments() {
            match segment {
                Segment::Literal(text) => self.writer.write_all(text.as_bytes())?,
                Segment::Style(tag) => ansi::sgr_tag(&mut self.writer, *tag)?,
            }
        }
        ansi::sgr_reset(&mut self.writer)?;

        let padding = width.saturating_sub(clipped.display_width());
        write!(self.writer, "{:padding$}", "")
    }

    /// Scroll the terminal up by emitting `rows` line feeds at the cursor.
    pub fn feed_lines(&mut self, rows: u16) -> io::Result<()> {
        for _ in 0..rows {
            self.writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Hide the cursor.
    pub fn hide_cursor(&mut self) -> io::Result<()> {
        ansi::cursor_hide(&mut self.writer)
    }

    /// Show the cursor.
    pub fn show_cursor(&mut self) -> io::Result<()> {
        ansi::cursor_show(&mut self.writer)
    }

    /// Clear the line under the cursor.
    pub fn clear_line(&mut self) -> io::Result<()> {
        ansi::erase_line(&mut self.writer)
    }

    /// Flush buffered bytes to the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        #[cfg(feature = "tracing")]
        tracing::trace!(buffered = self.writer.buffer().len(), "presenter flush");
        self.writer.flush()
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|err| err.into_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fpick_text::{Color, StyleTag, styled_text};

    fn bytes_of(f: impl FnOnce(&mut Presenter<Vec<u8>>) -> io::Result<()>) -> Vec<u8> {
        let mut presenter = Presenter::new(Vec::new());
        f(&mut presenter).unwrap();
        presenter.into_inner().unwrap()
    }

    #[test]
    fn plain_line_is_padded() {
        let out = bytes_of(|p| p.write_line(&styled_text!["ab"], 4));
        assert_eq!(out, b"ab\x1b[0m  ");
    }

    #[test]
    fn long_line_is_clipped() {
        let out = bytes_of(|p| p.write_line(&styled_text!["this is long"], 6));
        assert_eq!(out, b"this i\x1b[0m");
    }

    #[test]
    fn markers_survive_clipping() {
        let line = styled_text![StyleTag::Inverse, "one", Color::Red, "two", StyleTag::Reset];
        let out = bytes_of(|p| p.write_line(&line, 2));
        assert_eq!(out, b"\x1b[7mon\x1b[31m\x1b[0m\x1b[0m");
    }

    #[test]
    fn highlight_sequence() {
        let line = styled_text!["tw", Color::Red, "o", Color::Default, ""];
        let out = bytes_of(|p| p.write_line(&line, 3));
        assert_eq!(out, b"tw\x1b[31mo\x1b[39m\x1b[0m");
    }

    #[test]
    fn zero_width_writes_reset_only() {
        let out = bytes_of(|p| p.write_line(&styled_text!["abc"], 0));
        assert_eq!(out, b"\x1b[0m");
    }

    #[test]
    fn wide_chars_padded_by_cells() {
        let out = bytes_of(|p| p.write_line(&styled_text!["你"], 3));
        assert_eq!(out, "你\x1b[0m ".as_bytes());
    }

    #[test]
    fn cursor_and_feed() {
        let out = bytes_of(|p| {
            p.feed_lines(2)?;
            p.hide_cursor()?;
            p.move_to(3, 7)?;
            p.clear_line()?;
            p.show_cursor()
        });
        assert_eq!(out, b"\n\n\x1b[?25l\x1b[4;8H\x1b[2K\x1b[?25h");
    }

    #[test]
    fn nothing_written_before_flush() {
        let mut presenter = Presenter::new(Vec::new());
        presenter.write_line(&styled_text!["x"], 1).unwrap();
        assert!(presenter.writer.get_ref().is_empty());
        presenter.flush().unwrap();
        assert_eq!(presenter.writer.get_ref().as_slice(), b"x\x1b[0m");
    }
}
