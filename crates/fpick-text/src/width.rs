#![forbid(unsafe_code)]

//! Cell-width measurement.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of `text` in terminal cells.
#[inline]
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Longest prefix of `text` that fits in `max_cells` cells.
///
/// Cuts only on grapheme boundaries. A grapheme that would straddle the limit
/// (a wide CJK character in the last cell, say) is left out entirely.
///
/// Returns the prefix and its width.
#[must_use]
pub fn truncate_str(text: &str, max_cells: usize) -> (&str, usize) {
    if max_cells == 0 {
        return ("", 0);
    }

    let mut cells = 0;
    let mut byte_pos = 0;

    for grapheme in text.graphemes(true) {
        let grapheme_width = grapheme.width();
        if cells + grapheme_width > max_cells {
            break;
        }

        cells += grapheme_width;
        byte_pos += grapheme.len();

        if cells >= max_cells {
            break;
        }
    }

    (&text[..byte_pos], cells)
}
