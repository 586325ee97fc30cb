//! Cursor position in buffer space.
//!
//! All coordinates are **0-indexed** and count raw bytes: `col` is a byte
//! offset into the row, not a render column. `row` may equal the row count,
//! which is the empty line past the end of the document where typing
//! appends a new row.

use std::fmt;

/// A position in the document: (row, col), both 0-indexed.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// The origin — row 0, column 0.
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new position.
    #[inline]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}:{})", self.row, self.col)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
