//! The document: an ordered list of rows plus a dirty counter.
//!
//! [`RowStore`] owns every [`Row`] and all structural edits: inserting and
//! deleting rows, inserting and deleting bytes, splitting a row at the
//! cursor and joining a row onto its predecessor. Out-of-range indices are
//! silent no-ops or clamps, never panics.
//!
//! # Dirty counting
//!
//! Every mutation bumps a counter. The document is modified when the
//! counter is non-zero. Loading and saving reset it to zero via
//! [`mark_clean`](RowStore::mark_clean).
//!
//! # Cursor results
//!
//! Edits that move the cursor ([`delete_char`](RowStore::delete_char),
//! [`split_row`](RowStore::split_row)) return the new cursor position.
//! The store itself never holds a cursor.

use crate::position::Position;
use crate::row::Row;

/// Default tab stop, in columns.
pub const DEFAULT_TAB_STOP: usize = 8;

/// Ordered rows, index = 0-based line number.
#[derive(Debug, Clone)]
pub struct RowStore {
    rows: Vec<Row>,
    dirty: usize,
    tab_stop: usize,
}

impl Default for RowStore {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_STOP)
    }
}

impl RowStore {
    /// An empty document.
    #[must_use]
    pub fn new(tab_stop: usize) -> Self {
        Self {
            rows: Vec::new(),
            dirty: 0,
            tab_stop: tab_stop.max(1),
        }
    }

    /// A document with one row per line, starting clean.
    #[must_use]
    pub fn from_lines<I, L>(lines: I, tab_stop: usize) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        let tab_stop = tab_stop.max(1);
        Self {
            rows: lines.into_iter().map(|l| Row::new(l, tab_stop)).collect(),
            dirty: 0,
            tab_stop,
        }
    }

    // -- Accessors ----------------------------------------------------------

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row at `idx`, or `None` past the end.
    #[inline]
    #[must_use]
    pub fn row(&self, idx: usize) -> Option<&Row> {
        self.rows.get(idx)
    }

    /// All rows in order.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Raw length of row `idx`, 0 past the end.
    #[inline]
    #[must_use]
    pub fn row_len(&self, idx: usize) -> usize {
        self.rows.get(idx).map_or(0, Row::len)
    }

    /// Tab stop used for rendering.
    #[inline]
    #[must_use]
    pub const fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    /// Change the tab stop and re-render every row. Not a content change.
    pub fn set_tab_stop(&mut self, tab_stop: usize) {
        self.tab_stop = tab_stop.max(1);
        for row in &mut self.rows {
            row.update(self.tab_stop);
        }
    }

    // -- Dirty tracking -----------------------------------------------------

    /// Mutations since the last load or save.
    #[inline]
    #[must_use]
    pub const fn dirty_count(&self) -> usize {
        self.dirty
    }

    /// True if anything changed since the last load or save.
    #[inline]
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    /// Reset the dirty baseline. Called after a successful load or save.
    #[inline]
    pub const fn mark_clean(&mut self) {
        self.dirty = 0;
    }

    // -- Row edits ----------------------------------------------------------

    /// Insert a row at `at`, clamped into `[0, len]`.
    pub fn insert_row(&mut self, at: usize, bytes: impl Into<Vec<u8>>) {
        let at = at.min(self.rows.len());
        self.rows.insert(at, Row::new(bytes, self.tab_stop));
        self.dirty += 1;
    }

    /// Remove the row at `at`. No-op outside `[0, len)`.
    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        self.dirty += 1;
    }

    /// Append bytes to the end of row `row_idx`. No-op past the end.
    pub fn append_string(&mut self, row_idx: usize, bytes: &[u8]) {
        let tab_stop = self.tab_stop;
        if let Some(row) = self.rows.get_mut(row_idx) {
            row.append(bytes, tab_stop);
            self.dirty += 1;
        }
    }

    // -- Byte edits ---------------------------------------------------------

    /// Insert `byte` at `(row_idx, col)`.
    ///
    /// At `row_idx == len` an empty row is appended first, so typing on the
    /// line past the end starts a new line. `col` is clamped to the row.
    /// No-op for `row_idx > len`.
    pub fn insert_char(&mut self, row_idx: usize, col: usize, byte: u8) {
        if row_idx > self.rows.len() {
            return;
        }
        if row_idx == self.rows.len() {
            self.insert_row(row_idx, Vec::new());
        }
        let tab_stop = self.tab_stop;
        if let Some(row) = self.rows.get_mut(row_idx) {
            row.insert(col, byte, tab_stop);
            self.dirty += 1;
        }
    }

    /// Backspace at `(row_idx, col)`.
    ///
    /// - `col > 0`: remove the byte before `col`.
    /// - `col == 0` on a later row: join this row onto the previous one.
    /// - `(0, 0)` or `row_idx >= len`: nothing happens.
    ///
    /// Returns the cursor position after the edit, or `None` if nothing
    /// changed.
    pub fn delete_char(&mut self, row_idx: usize, col: usize) -> Option<Position> {
        if row_idx >= self.rows.len() || (row_idx == 0 && col == 0) {
            return None;
        }

        let tab_stop = self.tab_stop;
        if col > 0 {
            let row = &mut self.rows[row_idx];
            let at = col.min(row.len()).checked_sub(1)?;
            row.remove(at, tab_stop);
            self.dirty += 1;
            return Some(Position::new(row_idx, at));
        }

        let prev_len = self.rows[row_idx - 1].len();
        let moved = self.rows.remove(row_idx);
        self.dirty += 1;
        self.append_string(row_idx - 1, moved.raw());
        Some(Position::new(row_idx - 1, prev_len))
    }

    /// Enter at `(row_idx, col)`: split the row, returning the new cursor.
    ///
    /// At `col == 0` an empty row is inserted above. Otherwise the bytes
    /// from `col` on move to a new row below. `col` is clamped to the row,
    /// so a split at the end inserts an empty row below.
    pub fn split_row(&mut self, row_idx: usize, col: usize) -> Position {
        let col = col.min(self.row_len(row_idx));
        if col == 0 || row_idx >= self.rows.len() {
            self.insert_row(row_idx, Vec::new());
            return Position::new(row_idx + 1, 0);
        }

        let tab_stop = self.tab_stop;
        let tail = self.rows[row_idx].split_off(col, tab_stop);
        self.insert_row(row_idx + 1, tail);
        Position::new(row_idx + 1, 0)
    }

    // -- Serialisation ------------------------------------------------------

    /// Every row followed by `\n`, including the last.
    #[must_use]
    pub fn to_text(&self) -> Vec<u8> {
        let size = self.rows.iter().map(|r| r.len() + 1).sum();
        let mut out = Vec::with_capacity(size);
        for row in &self.rows {
            out.extend_from_slice(row.raw());
            out.push(b'\n');
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
