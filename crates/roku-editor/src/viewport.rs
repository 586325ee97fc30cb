//! Scroll offsets and the visible text window.
//!
//! The viewport covers `rows × cols` cells of render space starting at
//! `(row_offset, col_offset)`. The window excludes the status and message
//! bars. [`Viewport::recompute`] moves the offsets the minimum distance
//! needed to bring the cursor back into the window.

use crate::position::Position;
use crate::row_store::RowStore;

/// Scroll state for the text area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    row_offset: usize,
    col_offset: usize,
    rows: usize,
    cols: usize,
}

impl Viewport {
    /// A viewport at the top-left of the document.
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self {
            row_offset: 0,
            col_offset: 0,
            rows,
            cols,
        }
    }

    // -- Accessors ----------------------------------------------------------

    /// First visible row.
    #[inline]
    #[must_use]
    pub const fn row_offset(&self) -> usize {
        self.row_offset
    }

    /// First visible render column.
    #[inline]
    #[must_use]
    pub const fn col_offset(&self) -> usize {
        self.col_offset
    }

    /// Window height in rows.
    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Window width in render columns.
    #[inline]
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    // -- Configuration ------------------------------------------------------

    /// Change the window size. Offsets are fixed up on the next recompute.
    pub const fn resize(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
    }

    /// Set both offsets directly (used to restore a saved view).
    pub const fn set_offsets(&mut self, row_offset: usize, col_offset: usize) {
        self.row_offset = row_offset;
        self.col_offset = col_offset;
    }

    /// Push the row offset past the last row.
    ///
    /// The next [`recompute`](Self::recompute) snaps the offset back to the
    /// cursor row, so that row ends up at the top of the window.
    pub const fn force_rescroll(&mut self, row_count: usize) {
        self.row_offset = row_count;
    }

    // -- Scrolling ----------------------------------------------------------

    /// Scroll so `cursor` is inside the window and return its render column.
    ///
    /// The render column is 0 on the line past the end of the document. A
    /// zero-sized window leaves the offsets untouched.
    pub fn recompute(&mut self, cursor: Position, store: &RowStore) -> usize {
        let render_col = store
            .row(cursor.row)
            .map_or(0, |row| row.render_col(cursor.col, store.tab_stop()));

        if self.rows == 0 || self.cols == 0 {
            return render_col;
        }

        if cursor.row < self.row_offset {
            self.row_offset = cursor.row;
        }
        if cursor.row >= self.row_offset + self.rows {
            self.row_offset = cursor.row - self.rows + 1;
        }

        if render_col < self.col_offset {
            self.col_offset = render_col;
        }
        if render_col >= self.col_offset + self.cols {
            self.col_offset = render_col - self.cols + 1;
        }

        render_col
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
