#![forbid(unsafe_code)]

//! Styled text for fpick.
//!
//! A [`StyledText`] is an ordered run of [`Segment`]s: literal strings and
//! style markers. The renderer builds one per screen line and the presenter
//! turns them into escape sequences. Widths are measured in terminal cells,
//! never bytes.
//!
//! # Example
//! ```
//! use fpick_text::{Color, StyleTag, StyledText, styled_text};
//!
//! let line = styled_text![StyleTag::Color(Color::Red), "one", StyleTag::Reset];
//! assert_eq!(line.display_width(), 3);
//! assert_eq!(line.truncate_to_width(2).plain_text(), "on");
//! ```

pub mod styled;
pub mod width;

pub use styled::{Color, Segment, StyleTag, StyledText};
pub use width::{display_width, truncate_str};

/// Build a [`StyledText`] from a list of segment-like values.
///
/// Each element may be anything with a `From` conversion into [`Segment`]:
/// string slices, `String`s, [`StyleTag`]s and [`Color`]s.
#[macro_export]
macro_rules! styled_text {
    () => {
        $crate::StyledText::new()
    };
    ($($segment:expr),+ $(,)?) => {
        $crate::StyledText::from_segments([$($crate::Segment::from($segment)),+])
    };
}
