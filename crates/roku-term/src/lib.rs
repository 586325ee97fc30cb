// SPDX-License-Identifier: MIT
//
// roku-term — terminal layer for the roku editor.
//
// Raw mode with guaranteed restore, window-size queries, a byte-level key
// parser narrowed to the editor's logical keys, ANSI writers, and a
// single-threaded event loop that writes each frame in one syscall.
//
// Direct termios and ANSI escape sequences, no TUI framework.

pub mod ansi;
pub mod event_loop;
pub mod frame;
pub mod input;
pub mod key;
pub mod output;
pub mod reader;
pub mod terminal;
