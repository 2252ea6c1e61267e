//! Property-based invariant tests for frame rendering.
//!
//! 1. A frame has the prompt plus exactly `visible_limit` rows.
//! 2. The prompt starts with the match count and the cursor sits after it.
//! 3. Each row shows its match's text unchanged once markers are stripped.
//! 4. Exactly one row is inverted when something is selected, none otherwise.
//! 5. Presented lines never write more cells than the width.

use fpick_core::SearchState;
use fpick_render::{Presenter, render};
use fpick_text::{Segment, StyleTag, display_width};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn choices_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-d/_ ]{0,10}", 0..8)
}

fn state_strategy() -> impl Strategy<Value = SearchState> {
    (choices_strategy(), "[a-d]{0,3}", 0usize..6, 0usize..4).prop_map(
        |(choices, query, limit, downs)| {
            let mut state = SearchState::new(choices.iter().map(String::as_str), limit)
                .append_search_string(&query);
            for _ in 0..downs {
                state = state.down();
            }
            state
        },
    )
}

fn is_inverted(line: &fpick_text::StyledText) -> bool {
    line.segments().first() == Some(&Segment::Style(StyleTag::Inverse))
}

// ═════════════════════════════════════════════════════════════════════════
// 1 + 2. Shape and prompt
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn frame_shape(state in state_strategy()) {
        let frame = render(&state);
        prop_assert_eq!(frame.lines.len(), state.visible_limit() + 1);

        let prompt = frame.lines[0].plain_text();
        let expected = format!("{} > {}", state.matches().len(), state.query());
        prop_assert_eq!(&prompt, &expected);
        prop_assert_eq!(frame.cursor_column, display_width(&prompt));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3 + 4. Row content and selection
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rows_match_view(state in state_strategy()) {
        let frame = render(&state);
        let view = state.view();

        for (row, line) in frame.lines.iter().skip(1).enumerate() {
            let expected = view.matches.get(row).map_or("", |m| m.choice.as_str());
            prop_assert_eq!(line.plain_text(), expected);
            prop_assert_eq!(is_inverted(line), view.selected == Some(row));
        }

        let inverted = frame.lines.iter().filter(|l| is_inverted(l)).count();
        prop_assert_eq!(inverted, usize::from(view.selected.is_some()));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Presented width
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn presented_line_fits(state in state_strategy(), width in 0u16..12) {
        let frame = render(&state);
        for line in &frame.lines {
            let mut presenter = Presenter::new(Vec::new());
            presenter.write_line(line, width).unwrap();
            let bytes = presenter.into_inner().unwrap();
            let text = String::from_utf8(bytes).unwrap();

            // Strip SGR sequences; what remains is printed cells.
            let mut visible = String::new();
            let mut chars = text.chars();
            while let Some(c) = chars.next() {
                if c == '\x1b' {
                    for c in chars.by_ref() {
                        if c == 'm' {
                            break;
                        }
                    }
                } else {
                    visible.push(c);
                }
            }
            prop_assert_eq!(display_width(&visible), usize::from(width));
        }
    }
}
