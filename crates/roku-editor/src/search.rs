//! Incremental search.
//!
//! Search runs inside the prompt: every key typed at the `Search:` prompt
//! is forwarded here together with the current query. Matching is a plain
//! byte substring test against each row's *render* form, so a query typed
//! as spaces can match inside an expanded tab.
//!
//! # Search flow
//!
//! 1. Ctrl-F opens the prompt and creates a [`SearchState`], saving the
//!    cursor and scroll offsets.
//! 2. Each edit of the query restarts the search from the top.
//! 3. Arrow keys step to the next (Right/Down) or previous (Left/Up) match,
//!    wrapping around the document.
//! 4. Enter keeps the cursor on the match. Escape restores the saved view.
//!
//! The state is owned by the active prompt and dropped when it closes.

use roku_term::key::Key;

use crate::position::Position;
use crate::row_store::RowStore;
use crate::viewport::Viewport;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Search direction.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SearchDirection {
    #[default]
    Forward,
    Backward,
}

// ---------------------------------------------------------------------------
// Match
// ---------------------------------------------------------------------------

/// A search hit, in buffer space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    /// Row of the match.
    pub row: usize,
    /// Raw column where the match starts.
    pub col: usize,
}

// ---------------------------------------------------------------------------
// SearchState
// ---------------------------------------------------------------------------

/// State of one search session.
#[derive(Debug, Clone)]
pub struct SearchState {
    /// Row of the most recent hit. `None` until the first hit, and again
    /// after every query edit.
    last_match: Option<usize>,
    direction: SearchDirection,
    saved_cursor: Position,
    saved_row_offset: usize,
    saved_col_offset: usize,
}

impl SearchState {
    /// Start a session, remembering where to return on cancel.
    #[must_use]
    pub const fn new(cursor: Position, viewport: &Viewport) -> Self {
        Self {
            last_match: None,
            direction: SearchDirection::Forward,
            saved_cursor: cursor,
            saved_row_offset: viewport.row_offset(),
            saved_col_offset: viewport.col_offset(),
        }
    }

    /// Row of the most recent hit.
    #[inline]
    #[must_use]
    pub const fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    /// Direction of the next step.
    #[inline]
    #[must_use]
    pub const fn direction(&self) -> SearchDirection {
        self.direction
    }

    /// The cursor position saved when the session started.
    #[inline]
    #[must_use]
    pub const fn saved_cursor(&self) -> Position {
        self.saved_cursor
    }

    /// Handle one prompt keystroke.
    ///
    /// Enter and Escape end the step without searching; Escape also puts
    /// the cursor and viewport back where they were. Any other key runs a
    /// search step with `query`, and on a hit moves the cursor to the match
    /// and forces the viewport to rescroll.
    pub fn on_key(
        &mut self,
        key: Key,
        query: &[u8],
        store: &RowStore,
        cursor: &mut Position,
        viewport: &mut Viewport,
    ) -> Option<Match> {
        match key {
            Key::Enter => {
                self.reset();
                return None;
            }
            Key::Escape => {
                self.reset();
                *cursor = self.saved_cursor;
                viewport.set_offsets(self.saved_row_offset, self.saved_col_offset);
                return None;
            }
            Key::ArrowRight | Key::ArrowDown => self.direction = SearchDirection::Forward,
            Key::ArrowLeft | Key::ArrowUp => self.direction = SearchDirection::Backward,
            _ => self.reset(),
        }

        let found = self.step(query, store);
        match found {
            Some(m) => {
                tracing::debug!(row = m.row, col = m.col, "search hit");
                *cursor = Position::new(m.row, m.col);
                viewport.force_rescroll(store.len());
            }
            None => tracing::debug!(query = %String::from_utf8_lossy(query), "search miss"),
        }
        found
    }

    /// Scan for the next row containing `query`, starting after the last
    /// hit and wrapping around. Each row is visited at most once.
    ///
    /// Without a previous hit the scan always runs forward from row 0. An
    /// empty query matches nothing.
    pub fn step(&mut self, query: &[u8], store: &RowStore) -> Option<Match> {
        let count = store.len();
        if query.is_empty() || count == 0 {
            return None;
        }

        let mut current = self.last_match.filter(|&r| r < count);
        if current.is_none() {
            self.direction = SearchDirection::Forward;
        }

        for _ in 0..count {
            let next = match (current, self.direction) {
                (None, _) => 0,
                (Some(r), SearchDirection::Forward) => (r + 1) % count,
                (Some(0), SearchDirection::Backward) => count - 1,
                (Some(r), SearchDirection::Backward) => r - 1,
            };
            current = Some(next);

            let Some(row) = store.row(next) else {
                continue;
            };
            if let Some(offset) = find_subsequence(row.render(), query) {
                self.last_match = Some(next);
                return Some(Match {
                    row: next,
                    col: row.col_at_render(offset, store.tab_stop()),
                });
            }
        }

        None
    }

    const fn reset(&mut self) {
        self.last_match = None;
        self.direction = SearchDirection::Forward;
    }
}

/// Byte offset of the first occurrence of `needle` in `haystack`.
fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row_store::DEFAULT_TAB_STOP;

    fn store(lines: &[&str]) -> RowStore {
        RowStore::from_lines(lines.iter().copied(), DEFAULT_TAB_STOP)
    }

    /// Drive a key through a fresh cursor/viewport pair.
    struct Session {
        state: SearchState,
        store: RowStore,
        cursor: Position,
        viewport: Viewport,
    }

    impl Session {
        fn new(lines: &[&str]) -> Self {
            let viewport = Viewport::new(10, 40);
            let cursor = Position::ZERO;
            Self {
                state: SearchState::new(cursor, &viewport),
                store: store(lines),
                cursor,
                viewport,
            }
        }

        fn key(&mut self, key: Key, query: &str) -> Option<Match> {
            self.state.on_key(
                key,
                query.as_bytes(),
                &self.store,
                &mut self.cursor,
                &mut self.viewport,
            )
        }
    }

    // -- find_subsequence ---------------------------------------------------

    #[test]
    fn subsequence_basic() {
        assert_eq!(find_subsequence(b"hello world", b"world"), Some(6));
        assert_eq!(find_subsequence(b"hello", b"xyz"), None);
        assert_eq!(find_subsequence(b"ab", b"abc"), None);
        assert_eq!(find_subsequence(b"abc", b""), None);
    }

    // -- Stepping -----------------------------------------------------------

    #[test]
    fn typed_query_finds_first_match() {
        let mut s = Session::new(&["hello", "world", "wow"]);
        let m = s.key(Key::Byte(b'r'), "wor");
        assert_eq!(m, Some(Match { row: 1, col: 0 }));
        assert_eq!(s.cursor, Position::new(1, 0));
        assert_eq!(s.state.last_match(), Some(1));
    }

    #[test]
    fn next_wraps_back_to_only_match() {
        let mut s = Session::new(&["hello", "world", "wow"]);
        s.key(Key::Byte(b'r'), "wor");
        let m = s.key(Key::ArrowDown, "wor");
        assert_eq!(m, Some(Match { row: 1, col: 0 }));
    }

    #[test]
    fn next_cycles_through_matches() {
        let mut s = Session::new(&["hello", "world", "wow"]);
        assert_eq!(s.key(Key::Byte(b'w'), "w").map(|m| m.row), Some(1));
        assert_eq!(s.key(Key::ArrowDown, "w").map(|m| m.row), Some(2));
        assert_eq!(s.key(Key::ArrowRight, "w").map(|m| m.row), Some(1));
    }

    #[test]
    fn previous_wraps_backward() {
        let mut s = Session::new(&["wa", "x", "wb"]);
        assert_eq!(s.key(Key::Byte(b'w'), "w").map(|m| m.row), Some(0));
        assert_eq!(s.key(Key::ArrowUp, "w").map(|m| m.row), Some(2));
        assert_eq!(s.state.direction(), SearchDirection::Backward);
        assert_eq!(s.key(Key::ArrowLeft, "w").map(|m| m.row), Some(0));
    }

    #[test]
    fn arrow_without_previous_match_goes_forward() {
        let mut s = Session::new(&["a", "b", "ab"]);
        assert_eq!(s.key(Key::ArrowUp, "b").map(|m| m.row), Some(1));
        assert_eq!(s.state.direction(), SearchDirection::Forward);
    }

    #[test]
    fn editing_query_restarts_from_top() {
        let mut s = Session::new(&["ab", "ab"]);
        s.key(Key::Byte(b'a'), "a");
        s.key(Key::ArrowDown, "a");
        assert_eq!(s.state.last_match(), Some(1));
        assert_eq!(s.key(Key::Backspace, "a").map(|m| m.row), Some(0));
    }

    #[test]
    fn miss_leaves_cursor() {
        let mut s = Session::new(&["hello"]);
        s.cursor = Position::new(0, 3);
        assert_eq!(s.key(Key::Byte(b'z'), "z"), None);
        assert_eq!(s.cursor, Position::new(0, 3));
    }

    #[test]
    fn empty_query_matches_nothing() {
        let mut s = Session::new(&["hello"]);
        assert_eq!(s.key(Key::Backspace, ""), None);
        assert_eq!(s.state.last_match(), None);
    }

    #[test]
    fn empty_document_matches_nothing() {
        let mut s = Session::new(&[]);
        assert_eq!(s.key(Key::Byte(b'a'), "a"), None);
    }

    #[test]
    fn match_after_tab_maps_to_raw_column() {
        let mut s = Session::new(&["a\tfoo"]);
        assert_eq!(s.key(Key::Byte(b'o'), "foo"), Some(Match { row: 0, col: 2 }));
        assert_eq!(s.cursor, Position::new(0, 2));
    }

    #[test]
    fn hit_forces_rescroll() {
        let lines: Vec<String> = (0..30).map(|i| format!("line {i}")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut s = Session::new(&refs);
        s.key(Key::Byte(b'2'), "line 25");
        assert_eq!(s.viewport.row_offset(), 30);
        s.viewport.recompute(s.cursor, &s.store);
        assert_eq!(s.viewport.row_offset(), 25);
    }

    // -- Leaving ------------------------------------------------------------

    #[test]
    fn enter_keeps_position() {
        let mut s = Session::new(&["abc", "xyz"]);
        s.key(Key::Byte(b'y'), "y");
        assert_eq!(s.key(Key::Enter, "y"), None);
        assert_eq!(s.cursor, Position::new(1, 1));
        assert_eq!(s.state.last_match(), None);
    }

    #[test]
    fn escape_restores_saved_view() {
        let mut s = Session::new(&["abc", "xyz"]);
        s.viewport.set_offsets(0, 0);
        s.key(Key::Byte(b'y'), "y");
        assert_eq!(s.key(Key::Escape, "y"), None);
        assert_eq!(s.cursor, Position::ZERO);
        assert_eq!(s.viewport.row_offset(), 0);
        assert_eq!(s.viewport.col_offset(), 0);
        assert_eq!(s.state.saved_cursor(), Position::ZERO);
    }
}
