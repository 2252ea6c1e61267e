#![forbid(unsafe_code)]

//! Immutable search state.
//!
//! A [`SearchState`] is a snapshot: the choice list, the query typed so far,
//! the selection cursor, and the [`SearchConfig`] it was built with. Every
//! operation takes `&self` and returns a new state, so an older snapshot can
//! still be rendered or inspected after the operator has moved on.
//!
//! Matches are never stored. [`SearchState::matches`] and
//! [`SearchState::view`] score the whole list each time they are called.
//!
//! # Selection Invariant
//!
//! If nothing matches the selected index is `None`. Otherwise it lies in
//! `0..min(visible_limit, match_count)`. The raw cursor is clamped against
//! the live window whenever it is read.

use std::sync::Arc;

use crate::choice::Choice;
use crate::score::{Match, score_chars};

/// Number of match rows shown under the prompt by default.
pub const DEFAULT_VISIBLE_LIMIT: usize = 20;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Search behaviour fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Match rows shown under the prompt.
    pub visible_limit: usize,
    /// Query the session starts with.
    pub initial_query: String,
    /// Fold choice and query to lowercase before scoring.
    pub ignore_case: bool,
    /// Moving past either end of the window wraps to the other end.
    pub wrap_navigation: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            visible_limit: DEFAULT_VISIBLE_LIMIT,
            initial_query: String::new(),
            ignore_case: false,
            wrap_navigation: false,
        }
    }
}

impl SearchConfig {
    /// Default configuration with the given number of visible rows.
    #[must_use]
    pub fn new(visible_limit: usize) -> Self {
        Self {
            visible_limit,
            ..Self::default()
        }
    }

    /// Set the starting query.
    #[must_use]
    pub fn with_initial_query(mut self, query: impl Into<String>) -> Self {
        self.initial_query = query.into();
        self
    }

    /// Enable or disable case folding.
    #[must_use]
    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    /// Enable or disable wrap-around navigation.
    #[must_use]
    pub fn with_wrap_navigation(mut self, wrap: bool) -> Self {
        self.wrap_navigation = wrap;
        self
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// What the operator picked when the session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The text of the selected choice.
    Chosen(String),
    /// Confirmed while nothing was selected.
    NoSelection,
}

/// Ranked matches plus the selected row, computed in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// All matches, best first.
    pub matches: Vec<Match>,
    /// Index into `matches`, inside the visible window.
    pub selected: Option<usize>,
}

impl View {
    /// The selected match, if any.
    #[must_use]
    pub fn selected_match(&self) -> Option<&Match> {
        self.selected.and_then(|i| self.matches.get(i))
    }
}

// ---------------------------------------------------------------------------
// SearchState
// ---------------------------------------------------------------------------

/// One immutable snapshot of an interactive search.
///
/// # Example
///
/// ```
/// use fpick_core::{SearchState, Selection};
///
/// let state = SearchState::new(["one", "two", "three"], 3);
/// let state = state.append_search_string("t").down();
/// assert_eq!(state.done(), Selection::Chosen("three".into()));
/// ```
#[derive(Debug, Clone)]
pub struct SearchState {
    choices: Arc<[Choice]>,
    query: String,
    index: usize,
    config: SearchConfig,
}

impl SearchState {
    /// Build a state from choices and a configuration.
    ///
    /// The configured initial query is applied immediately; the cursor starts
    /// on the best match.
    #[must_use]
    pub fn from_config<I, C>(choices: I, config: SearchConfig) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Choice>,
    {
        let choices: Arc<[Choice]> = choices.into_iter().map(Into::into).collect();
        crate::debug!(
            choices = choices.len(),
            visible_limit = config.visible_limit,
            "search state created"
        );
        Self {
            choices,
            query: config.initial_query.clone(),
            index: 0,
            config,
        }
    }

    /// Build a state with default configuration and `visible_limit` rows.
    #[must_use]
    pub fn new<I, C>(choices: I, visible_limit: usize) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Choice>,
    {
        Self::from_config(choices, SearchConfig::new(visible_limit))
    }

    // --- Accessors ---

    /// All choices, in input order.
    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// The query typed so far.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The configuration this state was built with.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Match rows shown under the prompt.
    #[must_use]
    pub fn visible_limit(&self) -> usize {
        self.config.visible_limit
    }

    // --- Derived values ---

    /// Every matching choice, lowest cost first; ties keep input order.
    #[must_use]
    pub fn matches(&self) -> Vec<Match> {
        let query = self.fold(&self.query);
        let mut matches: Vec<Match> = self
            .choices
            .iter()
            .filter_map(|choice| {
                let text = self.fold(choice);
                score_chars(&text, &query).map(|(cost, span)| Match {
                    choice: choice.clone(),
                    cost,
                    span,
                })
            })
            .collect();
        matches.sort_by_key(|m| m.cost);
        matches
    }

    /// Matches and the selected row together.
    #[must_use]
    pub fn view(&self) -> View {
        let matches = self.matches();
        let selected = self.clamp_index(matches.len());
        View { matches, selected }
    }

    /// Selected row, or `None` when there is nothing to select.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.view().selected
    }

    /// Final outcome if the operator confirmed now.
    #[must_use]
    pub fn done(&self) -> Selection {
        match self.view().selected_match() {
            Some(m) => Selection::Chosen(m.choice.to_string()),
            None => Selection::NoSelection,
        }
    }

    // --- Transitions ---

    /// Append the printable characters of `text` to the query.
    ///
    /// Control characters are dropped. If nothing printable remains the
    /// state is returned unchanged, cursor included.
    #[must_use]
    pub fn append_search_string(&self, text: &str) -> Self {
        let printable: String = text.chars().filter(|c| !c.is_control()).collect();
        if printable.is_empty() {
            return self.clone();
        }
        let mut query = self.query.clone();
        query.push_str(&printable);
        self.with_query(query, 0)
    }

    /// Remove the last character of the query.
    #[must_use]
    pub fn backspace(&self) -> Self {
        let mut query = self.query.clone();
        query.pop();
        self.with_query(query, 0)
    }

    /// Remove trailing spaces, then the word before them.
    ///
    /// The cursor is left where it was.
    #[must_use]
    pub fn delete_word(&self) -> Self {
        let without_spaces = self.query.trim_end_matches(' ');
        let kept = without_spaces.trim_end_matches(|c| c != ' ');
        self.with_query(kept.to_owned(), self.index)
    }

    /// Empty the query.
    #[must_use]
    pub fn clear_query(&self) -> Self {
        self.with_query(String::new(), 0)
    }

    /// Move the cursor one row down.
    #[must_use]
    pub fn down(&self) -> Self {
        self.step(|index, window, wrap| {
            if index + 1 < window {
                index + 1
            } else if wrap {
                0
            } else {
                window - 1
            }
        })
    }

    /// Move the cursor one row up.
    #[must_use]
    pub fn up(&self) -> Self {
        self.step(|index, window, wrap| {
            if index > 0 {
                index - 1
            } else if wrap {
                window - 1
            } else {
                0
            }
        })
    }

    /// A new state with `more` appended to the choice list.
    ///
    /// The receiver keeps its own list.
    #[must_use]
    pub fn append_new_choices<I, C>(&self, more: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Choice>,
    {
        let choices: Arc<[Choice]> = self
            .choices
            .iter()
            .cloned()
            .chain(more.into_iter().map(Into::into))
            .collect();
        Self {
            choices,
            query: self.query.clone(),
            index: self.index,
            config: self.config.clone(),
        }
    }

    /// The same search shown in `visible_limit` rows.
    ///
    /// The cursor is pulled back into the new window.
    #[must_use]
    pub fn with_visible_limit(&self, visible_limit: usize) -> Self {
        if visible_limit == self.config.visible_limit {
            return self.clone();
        }
        crate::debug!(
            from = self.config.visible_limit,
            to = visible_limit,
            "visible limit changed"
        );
        let mut config = self.config.clone();
        config.visible_limit = visible_limit;
        Self {
            choices: Arc::clone(&self.choices),
            query: self.query.clone(),
            index: self.index.min(visible_limit.saturating_sub(1)),
            config,
        }
    }

    // --- Internals ---

    fn with_query(&self, query: String, index: usize) -> Self {
        crate::trace!(query = %query, index, "query changed");
        Self {
            choices: Arc::clone(&self.choices),
            query,
            index,
            config: self.config.clone(),
        }
    }

    /// Apply `moved(index, window, wrap)` to the clamped cursor.
    fn step(&self, moved: impl FnOnce(usize, usize, bool) -> usize) -> Self {
        let window = self.window(self.matches().len());
        if window == 0 {
            return self.clone();
        }
        let current = self.index.min(window - 1);
        let index = moved(current, window, self.config.wrap_navigation);
        crate::trace!(from = current, to = index, "selection moved");
        Self {
            index,
            ..self.clone()
        }
    }

    fn window(&self, match_count: usize) -> usize {
        match_count.min(self.config.visible_limit)
    }

    fn clamp_index(&self, match_count: usize) -> Option<usize> {
        match self.window(match_count) {
            0 => None,
            window => Some(self.index.min(window - 1)),
        }
    }

    fn fold(&self, text: &str) -> Vec<char> {
        if self.config.ignore_case {
            text.chars().map(fold_char).collect()
        } else {
            text.chars().collect()
        }
    }
}

/// Lowercase one char to one char so indices stay aligned.
fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(state: &SearchState) -> Vec<String> {
        state
            .matches()
            .into_iter()
            .map(|m| m.choice.to_string())
            .collect()
    }

    fn three() -> SearchState {
        SearchState::new(["one", "two", "three"], 3)
    }

    // --- Construction ---

    #[test]
    fn starts_on_first_match() {
        let state = three();
        assert_eq!(state.query(), "");
        assert_eq!(state.selected_index(), Some(0));
        assert_eq!(names(&state), ["one", "two", "three"]);
    }

    #[test]
    fn initial_query_applied() {
        let config = SearchConfig::new(3).with_initial_query("tw");
        let state = SearchState::from_config(["one", "two", "three"], config);
        assert_eq!(state.query(), "tw");
        assert_eq!(names(&state), ["two"]);
    }

    #[test]
    fn no_choices_means_no_selection() {
        let state = SearchState::new(Vec::<Choice>::new(), 3);
        assert_eq!(state.selected_index(), None);
        assert_eq!(state.done(), Selection::NoSelection);
    }

    #[test]
    fn zero_visible_rows_means_no_selection() {
        let state = SearchState::new(["one"], 0);
        assert_eq!(state.selected_index(), None);
        assert_eq!(state.down().selected_index(), None);
    }

    #[test]
    fn choices_are_normalized() {
        let state = SearchState::new(["  padded  "], 3);
        assert_eq!(state.choices()[0].as_str(), "padded");
    }

    // --- Ranking ---

    #[test]
    fn equal_costs_keep_input_order() {
        let state = SearchState::new(["search.rb", "spec/search_spec.rb"], 3)
            .append_search_string("search");
        assert_eq!(names(&state), ["search.rb", "spec/search_spec.rb"]);
    }

    #[test]
    fn better_match_ranks_first() {
        let state = SearchState::new(["fooxbar", "foo-x-bar"], 3).append_search_string("foobar");
        assert_eq!(names(&state), ["foo-x-bar", "fooxbar"]);
    }

    #[test]
    fn ignore_case_folds_both_sides() {
        let config = SearchConfig::new(3).with_ignore_case(true);
        let state = SearchState::from_config(["README.md", "src/main.rs"], config)
            .append_search_string("Read");
        let matches = state.matches();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].choice.as_str(), "README.md");
        assert_eq!(matches[0].span, 0..4);
    }

    #[test]
    fn case_sensitive_by_default() {
        let state = SearchState::new(["README.md"], 3).append_search_string("read");
        assert!(state.matches().is_empty());
    }

    // --- Query editing ---

    #[test]
    fn append_resets_cursor() {
        let state = three().down().down().append_search_string("o");
        assert_eq!(state.query(), "o");
        assert_eq!(state.selected_index(), Some(0));
    }

    #[test]
    fn append_drops_control_characters() {
        let state = three().append_search_string("t\u{7}w\n");
        assert_eq!(state.query(), "tw");
    }

    #[test]
    fn append_nothing_printable_is_a_no_op() {
        let state = three().down();
        let same = state.append_search_string("\u{1b}\r");
        assert_eq!(same.query(), "");
        assert_eq!(same.selected_index(), Some(1));
    }

    #[test]
    fn backspace_removes_last_char() {
        let state = three().append_search_string("tw").down().backspace();
        assert_eq!(state.query(), "t");
        assert_eq!(state.selected_index(), Some(0));
        assert_eq!(three().backspace().query(), "");
    }

    #[test]
    fn backspace_handles_multibyte() {
        let state = three().append_search_string("né").backspace();
        assert_eq!(state.query(), "n");
    }

    #[test]
    fn delete_word_cases() {
        for (before, after) in [
            ("a b", "a "),
            ("a b ", "a "),
            (" a b", " a "),
            ("word", ""),
            ("", ""),
            ("   ", ""),
        ] {
            let state = three().append_search_string(before).delete_word();
            assert_eq!(state.query(), after, "delete_word({before:?})");
        }
    }

    #[test]
    fn delete_word_keeps_cursor() {
        let state = three().down().down().delete_word();
        assert_eq!(state.selected_index(), Some(2));

        let state = three().append_search_string("x").down().delete_word();
        assert_eq!(state.query(), "");
        assert_eq!(state.selected_index(), Some(0));
    }

    #[test]
    fn clear_query_empties() {
        let state = three().append_search_string("thr").clear_query();
        assert_eq!(state.query(), "");
        assert_eq!(names(&state).len(), 3);
    }

    // --- Navigation ---

    #[test]
    fn down_clamps_at_last_match() {
        let state = three().down().down().down().down();
        assert_eq!(state.selected_index(), Some(2));
        assert_eq!(state.done(), Selection::Chosen("three".into()));
    }

    #[test]
    fn up_clamps_at_top() {
        let state = three().up();
        assert_eq!(state.selected_index(), Some(0));
        assert_eq!(three().down().up().up().selected_index(), Some(0));
    }

    #[test]
    fn navigation_limited_to_visible_window() {
        let state = SearchState::new(["a", "b", "c", "d"], 2).down().down().down();
        assert_eq!(state.selected_index(), Some(1));
    }

    #[test]
    fn wrap_navigation() {
        let config = SearchConfig::new(3).with_wrap_navigation(true);
        let state = SearchState::from_config(["one", "two", "three"], config);
        assert_eq!(state.up().selected_index(), Some(2));
        assert_eq!(state.down().down().down().selected_index(), Some(0));
    }

    #[test]
    fn navigation_without_matches_is_a_no_op() {
        let state = three().append_search_string("zzz");
        assert_eq!(state.down().selected_index(), None);
        assert_eq!(state.up().selected_index(), None);
    }

    // --- Immutability ---

    #[test]
    fn transitions_leave_receiver_unchanged() {
        let state = three();
        let _ = state.append_search_string("two").down();
        let _ = state.down();
        assert_eq!(state.query(), "");
        assert_eq!(state.selected_index(), Some(0));
    }

    #[test]
    fn append_new_choices_leaves_receiver_unchanged() {
        let state = three();
        let grown = state.append_new_choices(["four"]);
        assert_eq!(state.choices().len(), 3);
        assert_eq!(grown.choices().len(), 4);
        assert_eq!(grown.choices()[3].as_str(), "four");

        let padded = grown.append_new_choices(["  five \t"]);
        assert_eq!(padded.choices()[4].as_str(), "five");
        assert_eq!(padded.append_search_string("fi").matches().len(), 1);
    }

    #[test]
    fn with_visible_limit_pulls_cursor_into_window() {
        let state = three().down().down();
        assert_eq!(state.selected_index(), Some(2));

        let shrunk = state.with_visible_limit(1);
        assert_eq!(shrunk.visible_limit(), 1);
        assert_eq!(shrunk.selected_index(), Some(0));
        assert_eq!(shrunk.done(), Selection::Chosen("one".into()));

        // Growing again does not bring the old cursor back.
        let grown = shrunk.with_visible_limit(3);
        assert_eq!(grown.selected_index(), Some(0));
        assert_eq!(state.with_visible_limit(3).selected_index(), Some(2));

        assert_eq!(state.with_visible_limit(0).done(), Selection::NoSelection);
    }

    // --- Completion ---

    #[test]
    fn done_returns_selected_choice() {
        let state = three().append_search_string("o").down();
        assert_eq!(names(&state), ["one", "two"]);
        assert_eq!(state.done(), Selection::Chosen("two".into()));
    }

    #[test]
    fn done_without_matches() {
        assert_eq!(
            three().append_search_string("q").done(),
            Selection::NoSelection
        );
    }

    #[test]
    fn view_agrees_with_parts() {
        let state = three().append_search_string("t").down();
        let view = state.view();
        assert_eq!(view.matches, state.matches());
        assert_eq!(view.selected, state.selected_index());
        assert_eq!(
            view.selected_match().map(|m| m.choice.as_str()),
            Some("three")
        );
    }
}
