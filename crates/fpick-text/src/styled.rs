#![forbid(unsafe_code)]

//! Segment model for styled lines.
//!
//! Style changes are carried *in band*: a [`Segment::Style`] marker switches
//! the terminal state and every literal after it inherits that state until
//! the next marker.
//!
//! Truncation never removes markers, so a line cut short still ends with its
//! trailing `Reset`.

use std::fmt;
use std::ops::{Add, AddAssign};

use smallvec::SmallVec;

use crate::width::{display_width, truncate_str};

// =============================================================================
// Style markers
// =============================================================================

/// The sixteen-colour foreground palette (normal intensity) plus the
/// terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// The terminal's configured foreground.
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    /// ANSI palette index (0-7), or `None` for [`Color::Default`].
    #[must_use]
    pub const fn ansi_index(self) -> Option<u8> {
        match self {
            Self::Default => None,
            Self::Black => Some(0),
            Self::Red => Some(1),
            Self::Green => Some(2),
            Self::Yellow => Some(3),
            Self::Blue => Some(4),
            Self::Magenta => Some(5),
            Self::Cyan => Some(6),
            Self::White => Some(7),
        }
    }
}

/// A style change embedded in a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    /// Swap foreground and background.
    Inverse,
    /// Drop every active attribute and colour.
    Reset,
    /// Set the foreground colour.
    Color(Color),
}

// =============================================================================
// Segment
// =============================================================================

/// One element of a [`StyledText`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Text shown as-is.
    Literal(String),
    /// A style marker; occupies no cells.
    Style(StyleTag),
}

impl Segment {
    /// Create a literal segment.
    #[inline]
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// The literal text, if this is a literal.
    #[inline]
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(text) => Some(text),
            Self::Style(_) => None,
        }
    }

    /// Whether this is a style marker.
    #[inline]
    #[must_use]
    pub const fn is_style(&self) -> bool {
        matches!(self, Self::Style(_))
    }

    /// Width in terminal cells. Markers are zero-width.
    #[must_use]
    pub fn cell_width(&self) -> usize {
        match self {
            Self::Literal(text) => display_width(text),
            Self::Style(_) => 0,
        }
    }
}

impl From<&str> for Segment {
    fn from(text: &str) -> Self {
        Self::Literal(text.to_owned())
    }
}

impl From<String> for Segment {
    fn from(text: String) -> Self {
        Self::Literal(text)
    }
}

impl From<StyleTag> for Segment {
    fn from(tag: StyleTag) -> Self {
        Self::Style(tag)
    }
}

impl From<Color> for Segment {
    fn from(color: Color) -> Self {
        Self::Style(StyleTag::Color(color))
    }
}

// =============================================================================
// StyledText
// =============================================================================

/// An immutable-by-convention sequence of segments.
///
/// Equality is structural: `["a", "b"]` and `["ab"]` are different values
/// even though they display the same.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StyledText {
    segments: SmallVec<[Segment; 4]>,
}

impl StyledText {
    /// An empty line.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            segments: SmallVec::new(),
        }
    }

    /// A line holding a single literal.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::from_segments([Segment::literal(text)])
    }

    /// Create a line from segments, kept in order.
    #[must_use]
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    /// Append a literal.
    #[inline]
    #[must_use]
    pub fn with_literal(mut self, text: impl Into<String>) -> Self {
        self.segments.push(Segment::literal(text));
        self
    }

    /// Append a style marker.
    #[inline]
    #[must_use]
    pub fn with_style(mut self, tag: StyleTag) -> Self {
        self.segments.push(Segment::Style(tag));
        self
    }

    /// Segments in display order.
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments (markers included).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether there are no segments at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total width of all literals in cells.
    #[must_use]
    pub fn display_width(&self) -> usize {
        self.segments.iter().map(Segment::cell_width).sum()
    }

    /// Concatenation of the literals with markers stripped.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.segments
            .iter()
            .filter_map(Segment::as_literal)
            .collect()
    }

    /// Cut the line so its literals fit in `max_width` cells.
    ///
    /// Literals are consumed left to right. The first literal that does not
    /// fit is cut on a grapheme boundary and every later literal becomes
    /// empty, even if a narrower one would still fit in a leftover cell.
    /// Style markers stay where they were, so the segment count is unchanged.
    #[must_use]
    pub fn truncate_to_width(&self, max_width: usize) -> Self {
        let mut remaining = max_width;
        let mut cut = false;
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Style(tag) => Segment::Style(*tag),
                Segment::Literal(_) if cut => Segment::Literal(String::new()),
                Segment::Literal(text) => {
                    let (kept, used) = truncate_str(text, remaining);
                    remaining -= used;
                    cut = kept.len() < text.len();
                    Segment::Literal(kept.to_owned())
                }
            })
            .collect()
    }
}

impl FromIterator<Segment> for StyledText {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self::from_segments(iter)
    }
}

impl From<&str> for StyledText {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for StyledText {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

impl Add for StyledText {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self.segments.extend(rhs.segments);
        self
    }
}

impl AddAssign for StyledText {
    fn add_assign(&mut self, rhs: Self) {
        self.segments.extend(rhs.segments);
    }
}

impl fmt::Display for StyledText {
    /// Writes the literals only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for text in self.segments.iter().filter_map(Segment::as_literal) {
            f.write_str(text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styled_text;

    // ==========================================================================
    // Construction
    // ==========================================================================

    #[test]
    fn macro_converts_each_element() {
        let text = styled_text![StyleTag::Inverse, "a", Color::Red, String::from("b")];
        assert_eq!(
            text.segments(),
            &[
                Segment::Style(StyleTag::Inverse),
                Segment::Literal("a".into()),
                Segment::Style(StyleTag::Color(Color::Red)),
                Segment::Literal("b".into()),
            ]
        );
    }

    #[test]
    fn empty_macro_is_empty() {
        let text = styled_text![];
        assert!(text.is_empty());
        assert_eq!(text, StyledText::new());
    }

    #[test]
    fn builder_matches_macro() {
        let built = StyledText::new()
            .with_style(StyleTag::Inverse)
            .with_literal("x")
            .with_style(StyleTag::Reset);
        assert_eq!(built, styled_text![StyleTag::Inverse, "x", StyleTag::Reset]);
    }

    #[test]
    fn equality_is_structural() {
        assert_ne!(styled_text!["a", "b"], styled_text!["ab"]);
        assert_eq!(styled_text!["a", "b"].plain_text(), "ab");
    }

    #[test]
    fn concatenation_appends_segments() {
        let joined = styled_text!["3 > "] + styled_text![StyleTag::Inverse, "two"];
        assert_eq!(joined, styled_text!["3 > ", StyleTag::Inverse, "two"]);

        let mut acc = styled_text!["a"];
        acc += styled_text![Color::Green, "b"];
        assert_eq!(acc, styled_text!["a", Color::Green, "b"]);
    }

    #[test]
    fn display_writes_literals_only() {
        let text = styled_text![StyleTag::Inverse, "on", Color::Red, "e", StyleTag::Reset];
        assert_eq!(text.to_string(), "one");
    }

    #[test]
    fn width_ignores_markers() {
        let text = styled_text![Color::Red, "ab", StyleTag::Reset, "你"];
        assert_eq!(text.display_width(), 4);
    }

    #[test]
    fn color_palette_indices() {
        assert_eq!(Color::Default.ansi_index(), None);
        assert_eq!(Color::Black.ansi_index(), Some(0));
        assert_eq!(Color::Red.ansi_index(), Some(1));
        assert_eq!(Color::White.ansi_index(), Some(7));
    }

    // ==========================================================================
    // Truncation
    // ==========================================================================

    #[test]
    fn truncate_single_literal() {
        let text = styled_text!["this is long"];
        assert_eq!(text.truncate_to_width(6), styled_text!["this i"]);
    }

    #[test]
    fn truncate_keeps_markers_and_empties_tail() {
        let text = styled_text![Color::Red, "one", Color::Green, "two", Color::Blue, "three"];
        assert_eq!(
            text.truncate_to_width(2),
            styled_text![Color::Red, "on", Color::Green, "", Color::Blue, ""]
        );
    }

    #[test]
    fn truncate_across_literals() {
        let text = styled_text!["ab", Color::Red, "cd", Color::Default, "ef"];
        assert_eq!(
            text.truncate_to_width(3),
            styled_text!["ab", Color::Red, "c", Color::Default, ""]
        );
    }

    #[test]
    fn truncate_wider_than_text_is_identity() {
        let text = styled_text![StyleTag::Inverse, "two", StyleTag::Reset];
        assert_eq!(text.truncate_to_width(80), text);
    }

    #[test]
    fn truncate_to_zero_empties_every_literal() {
        let text = styled_text!["a", StyleTag::Reset, "b"];
        assert_eq!(
            text.truncate_to_width(0),
            styled_text!["", StyleTag::Reset, ""]
        );
    }

    #[test]
    fn truncate_does_not_split_wide_chars() {
        let text = styled_text!["a你", "b"];
        assert_eq!(text.truncate_to_width(2), styled_text!["a", ""]);
    }
}
