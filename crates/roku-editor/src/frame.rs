//! Building the screen from editor state.
//!
//! [`draw`] fills a [`Frame`] with everything visible: the text window,
//! the inverse-video status bar and the message bar, and places the
//! cursor. The layout for a `W × H` screen:
//!
//! ```text
//! ┌───────────────────────────────┐
//! │ document rows / ~ filler      │ ← H - 2 rows
//! │                               │
//! ├───────────────────────────────┤
//! │ name - N lines (modified) r/N │ ← status bar, inverted
//! ├───────────────────────────────┤
//! │ message or prompt             │ ← message bar
//! └───────────────────────────────┘
//! ```

use std::time::Instant;

use roku_term::frame::Frame;

use crate::editor::EditorState;

/// Version shown on the welcome screen.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Longest filename shown in the status bar, in bytes.
const STATUS_NAME_MAX: usize = 20;

/// Paint `state` into `frame`. Scrolls first so the cursor is on screen.
pub fn draw(state: &mut EditorState, frame: &mut Frame, now: Instant) {
    state.scroll();
    let width = usize::from(frame.width());

    draw_rows(state, frame, width);
    frame.push_inverse(status_bar(state, width));
    frame.push_line(message_bar(state, now));

    let vp = state.viewport();
    let x = state.render_col().saturating_sub(vp.col_offset());
    let y = state.cursor().row.saturating_sub(vp.row_offset());
    frame.set_cursor(to_u16(x), to_u16(y));
}

fn draw_rows(state: &EditorState, frame: &mut Frame, width: usize) {
    let store = state.store();
    let vp = state.viewport();

    for y in 0..vp.rows() {
        let file_row = y + vp.row_offset();
        match store.row(file_row) {
            Some(row) => {
                let render = row.render();
                let start = vp.col_offset().min(render.len());
                let end = (start + vp.cols()).min(render.len());
                frame.push_line(visible_bytes(&render[start..end]));
            }
            None if store.is_empty() && y == vp.rows() / 3 => {
                frame.push_line(welcome_line(width));
            }
            None => frame.push_line("~"),
        }
    }
}

/// Control bytes in a row would reach the terminal as commands; show them
/// as `?`. Tabs are already expanded in the render form.
fn visible_bytes(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .map(|&b| if b < 0x20 || b == 0x7F { b'?' } else { b })
        .collect()
}

/// `~` followed by the centred welcome message.
fn welcome_line(width: usize) -> Vec<u8> {
    let message = format!("Roku editor -- version {VERSION}");
    let len = message.len().min(width);
    let padding = (width - len) / 2;

    let mut line = Vec::with_capacity(width);
    if padding > 0 {
        line.push(b'~');
        line.resize(padding, b' ');
    }
    line.extend_from_slice(&message.as_bytes()[..len]);
    line
}

/// Filename, line count and modified flag on the left, `row/total` on
/// the right, padded to `width`.
fn status_bar(state: &EditorState, width: usize) -> Vec<u8> {
    let store = state.store();
    let name = state.filename().map_or_else(
        || "[No Name]".to_string(),
        |p| p.display().to_string(),
    );
    let name = &name.as_bytes()[..name.len().min(STATUS_NAME_MAX)];

    let mut left = Vec::with_capacity(width);
    left.extend_from_slice(name);
    left.extend_from_slice(format!(" - {} lines", store.len()).as_bytes());
    if state.is_dirty() {
        left.extend_from_slice(b" (modified)");
    }
    left.truncate(width);

    let right = format!("{}/{}", state.cursor().row + 1, store.len());
    let right = right.as_bytes();

    let mut line = left;
    while line.len() < width {
        if width - line.len() == right.len() {
            line.extend_from_slice(right);
            break;
        }
        line.push(b' ');
    }
    line
}

/// The open prompt, else the status message if it has not expired.
fn message_bar(state: &EditorState, now: Instant) -> Vec<u8> {
    if let Some(prompt) = state.prompt() {
        return prompt.display();
    }
    state
        .status()
        .visible(now, state.options().message_timeout)
        .map_or_else(Vec::new, |text| text.as_bytes().to_vec())
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
