#![forbid(unsafe_code)]

//! Fuzzy subsequence scoring.
//!
//! A query matches a choice when its characters appear in the choice in
//! order. Among the ways to place them, the scorer looks for the one with the
//! lowest **cost**; lower is better.
//!
//! # Cost Model
//!
//! Matched positions are grouped into segments. A *boundary* is index 0 or
//! any index whose preceding character is not alphanumeric (`/`, `-`, `_`,
//! `.`, space, ...).
//!
//! | Position | Cost |
//! |----------|------|
//! | on a boundary | 1, opens a word segment |
//! | continuing a word segment | distance from the previous match |
//! | first match, not on a boundary | distance from its word start, plus 1; opens a mid-word segment |
//! | continuing a mid-word segment | characters skipped since the previous match |
//!
//! A word segment therefore costs its width, and a contiguous run inside a
//! mid-word segment rides free after the lead-in.
//!
//! ```text
//! "foo-x-bar" / "foobar"   f o o . . . b a r   -> 1+1+1 + 1+1+1 = 6
//! "fooxbar"   / "foobar"   f o o x b a r       -> width 7       = 7
//! "axyza"     / "xyz"      a[x y z]            -> lead-in 2     = 2
//! ```
//!
//! # Search
//!
//! Every occurrence of the first query character is tried as a start. After
//! that, each query character considers only two placements: the nearest
//! occurrence, and the nearest occurrence on a boundary. Sub-results are
//! memoized on `(position, remaining query length)`; the kind of the open
//! segment is not part of the key, so the first path to reach a position
//! decides its tail. The result is locally greedy and sometimes not optimal:
//! `"x/yaaaz/yz"` against `"xyz"` costs 6, although 3 is possible.
//!
//! Boundaries, word starts, and next-occurrence tables are built up front,
//! so every memo cell is filled in constant time and one call costs
//! `O(len(choice) × len(query))`.
//!
//! # Invariants
//!
//! 1. Empty query: cost 0, empty span at 0.
//! 2. `Some` exactly when the query is a subsequence of the choice.
//! 3. Comparison is case-sensitive; folding is the caller's business.
//! 4. Determinism: same input, same result.
//! 5. Ties keep the earliest start.

use std::ops::Range;

use crate::choice::Choice;

// ---------------------------------------------------------------------------
// Match
// ---------------------------------------------------------------------------

/// A choice that matched a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// The matched choice, as given.
    pub choice: Choice,
    /// Lower is better.
    pub cost: usize,
    /// Matched region in **char** indices, from the first to one past the
    /// last matched character.
    pub span: Range<usize>,
}

impl Match {
    /// The matched span as a byte range into `self.choice`.
    #[must_use]
    pub fn byte_span(&self) -> Range<usize> {
        char_range_to_bytes(self.choice.as_str(), &self.span)
    }
}

/// Convert a char-index range into a byte range of `text`.
///
/// Indices past the end clamp to `text.len()`.
#[must_use]
pub fn char_range_to_bytes(text: &str, span: &Range<usize>) -> Range<usize> {
    let byte_at = |index: usize| {
        text.char_indices()
            .nth(index)
            .map_or(text.len(), |(byte, _)| byte)
    };
    let start = byte_at(span.start);
    let end = byte_at(span.end).max(start);
    start..end
}

/// Score `query` against `choice`.
///
/// Returns `None` when the query is not a subsequence of the choice.
///
/// # Example
///
/// ```
/// use fpick_core::{Choice, score};
///
/// let m = score(&Choice::new("foo-x-bar"), "foobar").unwrap();
/// assert_eq!(m.cost, 6);
/// assert_eq!(m.span, 0..9);
/// assert!(score(&Choice::new("a"), "aa").is_none());
/// ```
#[must_use]
pub fn score(choice: &Choice, query: &str) -> Option<Match> {
    let text: Vec<char> = choice.chars().collect();
    let query: Vec<char> = query.chars().collect();
    score_chars(&text, &query).map(|(cost, span)| Match {
        choice: choice.clone(),
        cost,
        span,
    })
}

/// Score pre-split character slices. Returns `(cost, span)`.
///
/// Used directly by callers that fold case first and need the char indices
/// to stay aligned with the original text.
#[must_use]
pub fn score_chars(text: &[char], query: &[char]) -> Option<(usize, Range<usize>)> {
    if query.is_empty() {
        return Some((0, 0..0));
    }
    if query.len() > text.len() {
        return None;
    }

    let mut search = Search::new(text, query);
    let mut best: Option<(usize, Range<usize>)> = None;

    for start in (0..text.len()).filter(|&i| text[i] == query[0]) {
        let (lead, kind) = if search.is_boundary(start) {
            (1, SegmentKind::Word)
        } else {
            (start - search.word_start(start) + 1, SegmentKind::Mid)
        };

        let Some(tail) = search.tail(start + 1, 1, start, kind) else {
            // Later starts only see a suffix of this one.
            break;
        };

        let cost = lead + tail.cost;
        if best.as_ref().is_none_or(|(best_cost, _)| cost < *best_cost) {
            best = Some((cost, start..tail.last + 1));
        }
    }

    best
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegmentKind {
    /// Opened on a boundary.
    Word,
    /// Opened inside a word.
    Mid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tail {
    cost: usize,
    /// Index of the last matched character.
    last: usize,
}

struct Search<'a> {
    query: &'a [char],
    len: usize,
    boundary: Vec<bool>,
    /// Nearest boundary at or before each index.
    word_start: Vec<usize>,
    /// `next[k * (len + 1) + i]`: first index `>= i` holding `query[k]`,
    /// `len` when there is none.
    next: Vec<usize>,
    /// Same as `next`, restricted to boundaries.
    next_boundary: Vec<usize>,
    /// `memo[from * (query.len() + 1) + remaining]`; outer `None` = unvisited.
    memo: Vec<Option<Option<Tail>>>,
}

impl<'a> Search<'a> {
    /// Precompute every lookup the search needs in `O(len × query)`.
    fn new(text: &[char], query: &'a [char]) -> Self {
        let len = text.len();

        let mut boundary = Vec::with_capacity(len);
        let mut word_start = Vec::with_capacity(len);
        let mut current = 0;
        for i in 0..len {
            let is_boundary = i == 0 || !text[i - 1].is_alphanumeric();
            if is_boundary {
                current = i;
            }
            boundary.push(is_boundary);
            word_start.push(current);
        }

        let stride = len + 1;
        let mut next = vec![len; query.len() * stride];
        let mut next_boundary = vec![len; query.len() * stride];
        for (k, &wanted) in query.iter().enumerate().skip(1) {
            let row = k * stride;
            for i in (0..len).rev() {
                let hit = text[i] == wanted;
                next[row + i] = if hit { i } else { next[row + i + 1] };
                next_boundary[row + i] = if hit && boundary[i] {
                    i
                } else {
                    next_boundary[row + i + 1]
                };
            }
        }

        Self {
            query,
            len,
            boundary,
            word_start,
            next,
            next_boundary,
            memo: vec![None; stride * (query.len() + 1)],
        }
    }

    fn is_boundary(&self, index: usize) -> bool {
        self.boundary[index]
    }

    fn word_start(&self, index: usize) -> usize {
        self.word_start[index]
    }

    /// Best placement of `query[k..]` in `text[from..]`, given the last
    /// match at `prev` inside a segment of `kind`.
    fn tail(&mut self, from: usize, k: usize, prev: usize, kind: SegmentKind) -> Option<Tail> {
        if k == self.query.len() {
            return Some(Tail { cost: 0, last: prev });
        }

        let key = from * (self.query.len() + 1) + (self.query.len() - k);
        if let Some(cached) = self.memo[key] {
            return cached;
        }

        let row = k * (self.len + 1);
        let found = |index: usize| (index < self.len).then_some(index);
        let nearest = found(self.next[row + from]);
        let nearest_boundary = found(self.next_boundary[row + from]);

        let mut best: Option<Tail> = None;
        let candidates = [nearest, nearest_boundary.filter(|&b| Some(b) != nearest)];
        for index in candidates.into_iter().flatten() {
            let (step, next_kind) = if self.is_boundary(index) {
                (1, SegmentKind::Word)
            } else {
                match kind {
                    SegmentKind::Word => (index - prev, SegmentKind::Word),
                    SegmentKind::Mid => (index - prev - 1, SegmentKind::Mid),
                }
            };

            if let Some(rest) = self.tail(index + 1, k + 1, index, next_kind) {
                let cost = step + rest.cost;
                if best.is_none_or(|b| cost < b.cost) {
                    best = Some(Tail {
                        cost,
                        last: rest.last,
                    });
                }
            }
        }

        self.memo[key] = Some(best);
        best
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
