#![forbid(unsafe_code)]

//! ANSI escape sequence generation helpers.
//!
//! Pure byte writers: no state tracking, no terminal queries.
//!
//! # Sequence Reference
//!
//! | Category | Sequence | Description |
//! |----------|----------|-------------|
//! | CSI | `ESC [ n m` | SGR (Select Graphic Rendition) |
//! | CSI | `ESC [ row ; col H` | CUP (Cursor Position, 1-indexed) |
//! | CSI | `ESC [ n K` | EL (Erase Line) |
//! | CSI | `ESC [ ? 25 h/l` | Cursor show/hide |

use std::io::{self, Write};

use fpick_text::{Color, StyleTag};

// =============================================================================
// SGR (Select Graphic Rendition)
// =============================================================================

/// SGR reset: `CSI 0 m`
pub const SGR_RESET: &[u8] = b"\x1b[0m";

/// Write SGR reset sequence.
#[inline]
pub fn sgr_reset<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SGR_RESET)
}

/// SGR reverse video: `CSI 7 m`
pub const SGR_REVERSE: &[u8] = b"\x1b[7m";

/// Write SGR reverse video sequence.
#[inline]
pub fn sgr_reverse<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SGR_REVERSE)
}

/// Write SGR sequence for one of the eight base foreground colors (30-37).
pub fn sgr_fg_16<W: Write>(w: &mut W, index: u8) -> io::Result<()> {
    write!(w, "\x1b[{}m", 30 + (index & 7))
}

/// Write SGR default foreground: `CSI 39 m`
pub fn sgr_fg_default<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[39m")
}

/// Write the foreground for a palette color.
pub fn sgr_fg<W: Write>(w: &mut W, color: Color) -> io::Result<()> {
    match color.ansi_index() {
        Some(index) => sgr_fg_16(w, index),
        None => sgr_fg_default(w),
    }
}

/// Write the sequence for an in-band style marker.
pub fn sgr_tag<W: Write>(w: &mut W, tag: StyleTag) -> io::Result<()> {
    match tag {
        StyleTag::Inverse => sgr_reverse(w),
        StyleTag::Reset => sgr_reset(w),
        StyleTag::Color(color) => sgr_fg(w, color),
    }
}

// =============================================================================
// Cursor Positioning
// =============================================================================

/// CUP (Cursor Position): `CSI row ; col H` (1-indexed)
///
/// Row and col are 0-indexed input, converted to 1-indexed for ANSI.
pub fn cup<W: Write>(w: &mut W, row: u16, col: u16) -> io::Result<()> {
    write!(
        w,
        "\x1b[{};{}H",
        row.saturating_add(1),
        col.saturating_add(1)
    )
}

/// Hide cursor: `CSI ? 25 l`
pub const CURSOR_HIDE: &[u8] = b"\x1b[?25l";

/// Show cursor: `CSI ? 25 h`
pub const CURSOR_SHOW: &[u8] = b"\x1b[?25h";

/// Write hide cursor.
#[inline]
pub fn cursor_hide<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(CURSOR_HIDE)
}

/// Write show cursor.
#[inline]
pub fn cursor_show<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(CURSOR_SHOW)
}

// =============================================================================
// Erase Operations
// =============================================================================

/// EL (Erase Line), whole line: `CSI 2 K`
pub const ERASE_LINE: &[u8] = b"\x1b[2K";

/// Erase the whole line under the cursor.
#[inline]
pub fn erase_line<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(ERASE_LINE)
}
