#![forbid(unsafe_code)]

//! State to frame projection.
//!
//! [`render`] is pure: the same state always yields the same frame, and the
//! frame knows nothing about terminal size. Clipping to the screen happens
//! when the frame is presented.
//!
//! # Layout
//!
//! ```text
//! 3 > o            <- prompt: match count, " > ", query; cursor after it
//! [one]            <- selected row: Inverse ... Reset
//! tw(o)            <- matched span: Color(Red) ... Color(Default)
//!                  <- padding up to visible_limit rows
//! ```

use fpick_core::{Match, SearchState};
use fpick_text::{Color, StyleTag, StyledText, display_width};

/// One frame: the lines to draw and where the text cursor belongs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFrame {
    /// Prompt line followed by exactly `visible_limit` match rows.
    pub lines: Vec<StyledText>,
    /// Column on the prompt line (line 0) where the cursor sits.
    pub cursor_column: usize,
}

/// Project `state` into a frame.
#[must_use]
pub fn render(state: &SearchState) -> RenderedFrame {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("render", query = state.query()).entered();

    let view = state.view();
    let prompt = format!("{} > {}", view.matches.len(), state.query());
    let cursor_column = display_width(&prompt);

    let rows = state.visible_limit();
    let mut lines = Vec::with_capacity(rows + 1);
    lines.push(StyledText::plain(prompt));
    lines.extend((0..rows).map(|row| match view.matches.get(row) {
        Some(m) => render_match(m, view.selected == Some(row)),
        None => StyledText::plain(""),
    }));

    RenderedFrame {
        lines,
        cursor_column,
    }
}

/// One match row, with the matched span highlighted.
#[must_use]
pub fn render_match(m: &Match, selected: bool) -> StyledText {
    let text = m.choice.as_str();
    let content = if m.span.is_empty() {
        StyledText::plain(text)
    } else {
        let bytes = m.byte_span();
        StyledText::plain(&text[..bytes.start])
            .with_style(StyleTag::Color(Color::Red))
            .with_literal(&text[bytes.clone()])
            .with_style(StyleTag::Color(Color::Default))
            .with_literal(&text[bytes.end..])
    };

    if selected {
        StyledText::new().with_style(StyleTag::Inverse)
            + content
            + StyledText::new().with_style(StyleTag::Reset)
    } else {
        content
    }
}
