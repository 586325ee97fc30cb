// SPDX-License-Identifier: MIT
//
// Frame output.
//
// A frame is a few kilobytes of text and escape codes. It is collected
// here and handed to the terminal in one write, so the screen never shows
// a half-drawn frame.

use std::io::{self, Write};

// ─── OutputBuffer ────────────────────────────────────────────────────────────

/// Bytes of one frame, written out together by [`flush_stdout`](Self::flush_stdout).
pub struct OutputBuffer {
    buf: Vec<u8>,
}

/// An 80×24 frame with every line rewritten fits comfortably.
const FRAME_CAPACITY: usize = 8 * 1024;

impl OutputBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(FRAME_CAPACITY),
        }
    }

    /// Send the frame to stdout.
    ///
    /// # Errors
    ///
    /// Writing to stdout failed.
    pub fn flush_stdout(&mut self) -> io::Result<()> {
        self.flush_to(&mut io::stdout().lock())
    }

    /// Send the frame to `w` and start a new one. The allocation is kept.
    ///
    /// # Errors
    ///
    /// Writing to `w` failed. The frame stays buffered.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        w.write_all(&self.buf)?;
        w.flush()?;
        self.buf.clear();
        Ok(())
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
