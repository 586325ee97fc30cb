//! A single line of the document.
//!
//! A [`Row`] owns its raw bytes (no trailing newline) and a cached render
//! form with tabs expanded. Every mutation goes through a method that
//! rebuilds the render form, so the two never disagree.

use crate::render::{col_to_render_col, render_col_to_col, render_row};

/// One line: raw bytes plus their tab-expanded rendering.
#[derive(Clone, PartialEq, Eq)]
pub struct Row {
    raw: Vec<u8>,
    render: Vec<u8>,
}

impl Row {
    /// Create a row from raw bytes, rendering with `tab_stop`.
    #[must_use]
    pub fn new(raw: impl Into<Vec<u8>>, tab_stop: usize) -> Self {
        let raw = raw.into();
        let render = render_row(&raw, tab_stop);
        Self { raw, render }
    }

    // -- Accessors ----------------------------------------------------------

    /// The stored bytes.
    #[inline]
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// The bytes as drawn, tabs expanded.
    #[inline]
    #[must_use]
    pub fn render(&self) -> &[u8] {
        &self.render
    }

    /// Length in raw bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Render column of raw column `col`.
    #[must_use]
    pub fn render_col(&self, col: usize, tab_stop: usize) -> usize {
        col_to_render_col(&self.raw, col, tab_stop)
    }

    /// Raw column covering render column `render_col`.
    #[must_use]
    pub fn col_at_render(&self, render_col: usize, tab_stop: usize) -> usize {
        render_col_to_col(&self.raw, render_col, tab_stop)
    }

    // -- Mutation -----------------------------------------------------------

    /// Insert `byte` before `col`, clamping `col` to the row length.
    pub(crate) fn insert(&mut self, col: usize, byte: u8, tab_stop: usize) {
        let at = col.min(self.raw.len());
        self.raw.insert(at, byte);
        self.update(tab_stop);
    }

    /// Remove the byte at `col`. Returns `None` if `col` is out of range.
    pub(crate) fn remove(&mut self, col: usize, tab_stop: usize) -> Option<u8> {
        if col >= self.raw.len() {
            return None;
        }
        let byte = self.raw.remove(col);
        self.update(tab_stop);
        Some(byte)
    }

    /// Append bytes to the end of the row.
    pub(crate) fn append(&mut self, bytes: &[u8], tab_stop: usize) {
        self.raw.extend_from_slice(bytes);
        self.update(tab_stop);
    }

    /// Cut the row at `col` and return everything from `col` on.
    pub(crate) fn split_off(&mut self, col: usize, tab_stop: usize) -> Vec<u8> {
        let at = col.min(self.raw.len());
        let tail = self.raw.split_off(at);
        self.update(tab_stop);
        tail
    }

    /// Rebuild the render form from the raw bytes.
    pub(crate) fn update(&mut self, tab_stop: usize) {
        self.render = render_row(&self.raw, tab_stop);
    }
}

impl std::fmt::Debug for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row({:?})", String::from_utf8_lossy(&self.raw))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_renders_tabs() {
        let row = Row::new("a\tb", 8);
        assert_eq!(row.raw(), b"a\tb");
        assert_eq!(row.render(), b"a       b");
        assert_eq!(row.len(), 3);
    }

    #[test]
    fn insert_clamps_and_rerenders() {
        let mut row = Row::new("ab", 8);
        row.insert(99, b'\t', 8);
        assert_eq!(row.raw(), b"ab\t");
        assert_eq!(row.render(), b"ab      ");
    }

    #[test]
    fn remove_in_and_out_of_range() {
        let mut row = Row::new("a\tb", 8);
        assert_eq!(row.remove(1, 8), Some(b'\t'));
        assert_eq!(row.render(), b"ab");
        assert_eq!(row.remove(2, 8), None);
    }

    #[test]
    fn append_rerenders() {
        let mut row = Row::new("x", 4);
        row.append(b"\ty", 4);
        assert_eq!(row.render(), b"x   y");
    }

    #[test]
    fn split_off_keeps_head() {
        let mut row = Row::new("hello", 8);
        assert_eq!(row.split_off(2, 8), b"llo");
        assert_eq!(row.raw(), b"he");
        assert_eq!(row.render(), b"he");
    }

    #[test]
    fn split_off_at_end_is_empty_tail() {
        let mut row = Row::new("hi", 8);
        assert!(row.split_off(2, 8).is_empty());
        assert_eq!(row.raw(), b"hi");
    }

    #[test]
    fn column_mapping_helpers() {
        let row = Row::new("a\tb", 8);
        assert_eq!(row.render_col(2, 8), 8);
        assert_eq!(row.col_at_render(8, 8), 2);
    }

    #[test]
    fn debug_shows_text() {
        assert_eq!(format!("{:?}", Row::new("hi", 8)), "Row(\"hi\")");
    }
}
