// SPDX-License-Identifier: MIT
//
// Frame — one screenful of lines plus a cursor position.
//
// The application fills a Frame top to bottom, one line of bytes per
// screen row, and the event loop writes it out in one go:
//
//   hide cursor → home → for each line: [inverse] text [reset] clear-EOL
//   → place cursor → show cursor
//
// Lines are raw bytes. Anything past the frame width is cut off here so
// callers can hand over a whole row slice without measuring it first.
// Every line ends in clear-to-EOL, so there is no need to clear the screen
// between frames; a shorter line simply erases what the previous one left.

use std::io::{self, Write};

use crate::ansi;

/// A single screen row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    /// Bytes to draw, starting at column 0.
    pub text: Vec<u8>,
    /// Draw with foreground and background swapped.
    pub inverse: bool,
}

/// A full frame ready to be written to the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    lines: Vec<Line>,
    cursor: (u16, u16),
}

impl Frame {
    /// Create an empty frame for a `width × height` screen.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            lines: Vec::with_capacity(usize::from(height)),
            cursor: (0, 0),
        }
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Lines pushed so far.
    #[inline]
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Cursor position as `(x, y)`, 0-indexed.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    /// Change the screen size. Drops all lines.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.clear();
    }

    /// Drop all lines and home the cursor.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.cursor = (0, 0);
    }

    /// Append a line. Lines past the frame height are ignored.
    pub fn push_line(&mut self, text: impl Into<Vec<u8>>) {
        self.push(Line {
            text: text.into(),
            inverse: false,
        });
    }

    /// Append an inverse-video line. Lines past the frame height are ignored.
    pub fn push_inverse(&mut self, text: impl Into<Vec<u8>>) {
        self.push(Line {
            text: text.into(),
            inverse: true,
        });
    }

    fn push(&mut self, mut line: Line) {
        if self.lines.len() >= usize::from(self.height) {
            return;
        }
        line.text.truncate(usize::from(self.width));
        self.lines.push(line);
    }

    /// Set the cursor position, clamped to the frame.
    pub fn set_cursor(&mut self, x: u16, y: u16) {
        self.cursor = (
            x.min(self.width.saturating_sub(1)),
            y.min(self.height.saturating_sub(1)),
        );
    }

    /// Encode the frame as ANSI bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn render(&self, w: &mut impl Write) -> io::Result<()> {
        ansi::cursor_hide(w)?;
        ansi::cursor_home(w)?;

        for (i, line) in self.lines.iter().enumerate() {
            if line.inverse {
                ansi::inverse(w)?;
                w.write_all(&line.text)?;
                ansi::reset(w)?;
            } else {
                w.write_all(&line.text)?;
            }
            ansi::clear_to_eol(w)?;
            if i + 1 < self.lines.len() {
                w.write_all(b"\r\n")?;
            }
        }

        let (x, y) = self.cursor;
        ansi::cursor_to(w, x, y)?;
        ansi::cursor_show(w)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
