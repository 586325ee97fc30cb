//! Tab expansion and the raw ↔ render column mapping.
//!
//! A row is stored as raw bytes. What the terminal shows is the *render*
//! form, where each tab is expanded to spaces up to the next tab stop and
//! every other byte takes exactly one column. The cursor lives in raw
//! space; scrolling and drawing happen in render space. These functions
//! translate between the two.
//!
//! ```text
//! raw:     a \t b
//! col:     0  1 2
//! render:  a · · · · · · · b      (tab stop 8)
//! rcol:    0 1 2 3 4 5 6 7 8
//! ```
//!
//! A tab stop below 1 is treated as 1.

/// Expand tabs in `raw` to spaces, aligning each tab to the next multiple
/// of `tab_stop`. A tab always produces at least one space.
#[must_use]
pub fn render_row(raw: &[u8], tab_stop: usize) -> Vec<u8> {
    let tab = tab_stop.max(1);
    let tabs = raw.iter().filter(|&&b| b == b'\t').count();
    let mut render = Vec::with_capacity(raw.len() + tabs * (tab - 1));

    for &b in raw {
        if b == b'\t' {
            render.push(b' ');
            while render.len() % tab != 0 {
                render.push(b' ');
            }
        } else {
            render.push(b);
        }
    }

    render
}

/// Render column of the raw column `col`.
///
/// Sums the widths of every byte before `col`. `col` past the end of the
/// row counts only the bytes that exist.
#[must_use]
pub fn col_to_render_col(raw: &[u8], col: usize, tab_stop: usize) -> usize {
    let tab = tab_stop.max(1);
    raw.iter()
        .take(col)
        .fold(0, |rx, &b| advance(rx, b, tab))
}

/// Raw column whose rendered span covers `render_col`.
///
/// Walks the row until the accumulated width passes `render_col`. A render
/// column inside a tab's expansion maps to the tab itself. Past the end of
/// the row the result is the row length.
#[must_use]
pub fn render_col_to_col(raw: &[u8], render_col: usize, tab_stop: usize) -> usize {
    let tab = tab_stop.max(1);
    let mut rx = 0;
    for (col, &b) in raw.iter().enumerate() {
        rx = advance(rx, b, tab);
        if rx > render_col {
            return col;
        }
    }
    raw.len()
}

/// Render column after drawing `b` starting at `rx`.
#[inline]
const fn advance(rx: usize, b: u8, tab: usize) -> usize {
    if b == b'\t' {
        rx + (tab - 1) - (rx % tab) + 1
    } else {
        rx + 1
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // -- render_row ---------------------------------------------------------

    #[test]
    fn render_plain_bytes_unchanged() {
        assert_eq!(render_row(b"hello", 8), b"hello");
    }

    #[test]
    fn render_tab_expands_to_next_stop() {
        assert_eq!(render_row(b"a\tb", 8), b"a       b");
        assert_eq!(render_row(b"\tx", 4), b"    x");
    }

    #[test]
    fn render_tab_on_stop_is_full_width() {
        // Tab starting exactly on a stop still produces at least one space.
        assert_eq!(render_row(b"abcd\tx", 4), b"abcd    x");
    }

    #[test]
    fn render_consecutive_tabs() {
        assert_eq!(render_row(b"\t\t", 2), b"    ");
    }

    #[test]
    fn render_is_idempotent_on_tab_free_output() {
        let once = render_row(b"a\tb\tc", 8);
        assert_eq!(render_row(&once, 8), once);
    }

    #[test]
    fn render_zero_tab_stop_is_one() {
        assert_eq!(render_row(b"a\tb", 0), b"a b");
    }

    #[test]
    fn render_keeps_non_ascii_bytes() {
        assert_eq!(render_row("é".as_bytes(), 8), "é".as_bytes());
    }

    // -- col_to_render_col --------------------------------------------------

    #[test]
    fn render_col_ascii() {
        assert_eq!(col_to_render_col(b"hello", 0, 8), 0);
        assert_eq!(col_to_render_col(b"hello", 3, 8), 3);
        assert_eq!(col_to_render_col(b"hello", 5, 8), 5);
    }

    #[test]
    fn render_col_after_tab() {
        assert_eq!(col_to_render_col(b"a\tb", 1, 8), 1);
        assert_eq!(col_to_render_col(b"a\tb", 2, 8), 8);
        assert_eq!(col_to_render_col(b"a\tb", 3, 8), 9);
    }

    #[test]
    fn render_col_past_end_counts_existing_bytes() {
        assert_eq!(col_to_render_col(b"ab", 10, 8), 2);
    }

    #[test]
    fn render_col_is_monotonic() {
        let raw = b"\tab\t\tc d\t";
        let cols: Vec<usize> = (0..=raw.len())
            .map(|c| col_to_render_col(raw, c, 4))
            .collect();
        assert!(cols.windows(2).all(|w| w[0] < w[1]));
    }

    // -- render_col_to_col --------------------------------------------------

    #[test]
    fn col_from_render_col_inside_tab() {
        // Render columns 1..8 all belong to the tab at raw column 1.
        for rx in 1..8 {
            assert_eq!(render_col_to_col(b"a\tb", rx, 8), 1, "rx = {rx}");
        }
        assert_eq!(render_col_to_col(b"a\tb", 8, 8), 2);
    }

    #[test]
    fn col_from_render_col_past_end() {
        assert_eq!(render_col_to_col(b"a\tb", 50, 8), 3);
        assert_eq!(render_col_to_col(b"", 0, 8), 0);
    }

    #[test]
    fn columns_round_trip() {
        let raw = b"x\t\tyz\tw";
        for tab in [1, 2, 4, 8] {
            for c in 0..=raw.len() {
                let rx = col_to_render_col(raw, c, tab);
                assert_eq!(render_col_to_col(raw, rx, tab), c, "tab {tab} col {c}");
            }
        }
    }

    #[test]
    fn render_col_matches_rendered_length() {
        let raw = b"ab\tcdef\tg";
        assert_eq!(col_to_render_col(raw, raw.len(), 8), render_row(raw, 8).len());
    }
}
