// SPDX-License-Identifier: MIT
//
// Logical keys.
//
// The parser in `input` produces rich key events (a key code plus
// modifiers). The editor core only understands a closed set of logical
// keys: a raw byte to insert, the navigation and editing keys, and the
// four Ctrl chords it binds. This module is the narrow waist between the
// two. Anything outside the set is dropped here, so the core never sees
// escape sequences or modifier combinations it has no binding for.

use crate::input::{KeyCode, KeyEvent, Modifiers};

/// A key as the editor core sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A byte to insert. Tab arrives as `Byte(b'\t')`; a multi-byte
    /// character arrives as one `Byte` per UTF-8 byte.
    Byte(u8),
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
    Backspace,
    Enter,
    Escape,
    CtrlQ,
    CtrlS,
    CtrlF,
    CtrlL,
}

impl Key {
    /// Translate a parsed key event into zero or more logical keys.
    ///
    /// Modified navigation keys lose their modifiers. Alt chords and Ctrl
    /// chords without a binding produce nothing. Ctrl+H is Backspace.
    #[must_use]
    pub fn from_event(event: KeyEvent) -> Vec<Self> {
        let key = match event.code {
            KeyCode::Char(ch) if event.modifiers.contains(Modifiers::CTRL) => {
                match ch.to_ascii_lowercase() {
                    'q' => Self::CtrlQ,
                    's' => Self::CtrlS,
                    'f' => Self::CtrlF,
                    'l' => Self::CtrlL,
                    'h' => Self::Backspace,
                    _ => return Vec::new(),
                }
            }
            KeyCode::Char(_) if event.modifiers.contains(Modifiers::ALT) => return Vec::new(),
            KeyCode::Char(ch) => {
                let mut enc = [0u8; 4];
                return ch.encode_utf8(&mut enc).bytes().map(Self::Byte).collect();
            }
            KeyCode::Tab => Self::Byte(b'\t'),
            KeyCode::Enter => Self::Enter,
            KeyCode::Backspace => Self::Backspace,
            KeyCode::Escape => Self::Escape,
            KeyCode::Delete => Self::Delete,
            KeyCode::Up => Self::ArrowUp,
            KeyCode::Down => Self::ArrowDown,
            KeyCode::Left => Self::ArrowLeft,
            KeyCode::Right => Self::ArrowRight,
            KeyCode::Home => Self::Home,
            KeyCode::End => Self::End,
            KeyCode::PageUp => Self::PageUp,
            KeyCode::PageDown => Self::PageDown,
        };
        vec![key]
    }
}
