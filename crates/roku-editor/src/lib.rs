//! # roku-editor — Editor core for roku
//!
//! The line buffer, viewport and search engine behind the editor, plus the
//! editor state that ties them to keystrokes:
//!
//! - **[`render`]** — tab expansion and raw ↔ render column mapping
//! - **[`row`]** / **[`row_store`]** — rows and the document's edit operations
//! - **[`position`]** — cursor position in buffer space
//! - **[`viewport`]** — scroll offsets that keep the cursor on screen
//! - **[`search`]** — incremental search with wraparound and cancel-restore
//! - **[`prompt`]** — single-line input for save-as and search
//! - **[`editor`]** — `EditorState` and key dispatch
//! - **[`frame`]** — building a terminal frame from the state
//! - **[`file`]**, **[`options`]**, **[`status`]**, **[`error`]** — the rest

pub mod editor;
pub mod error;
pub mod file;
pub mod frame;
pub mod options;
pub mod position;
pub mod prompt;
pub mod render;
pub mod row;
pub mod row_store;
pub mod search;
pub mod status;
pub mod viewport;

pub use editor::{EditorState, Outcome};
pub use error::EditorError;
pub use options::Options;
