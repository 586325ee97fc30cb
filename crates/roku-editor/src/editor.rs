//! The editor aggregate and its key dispatch.
//!
//! [`EditorState`] owns the document, the viewport, the cursor and the
//! status message, and turns logical keys into edits. It is a plain value
//! owned by the run loop; nothing in here touches the terminal.
//!
//! # Keymap
//!
//! | Key            | Action                                         |
//! |----------------|------------------------------------------------|
//! | printable, Tab | insert byte at cursor                          |
//! | Enter          | split row at cursor                            |
//! | Backspace      | delete byte before cursor / join with previous |
//! | Delete         | move right, then Backspace                     |
//! | arrows         | move, wrapping across line ends                |
//! | Home / End     | start / end of row                             |
//! | PageUp / Down  | jump to window edge, then one window further   |
//! | Ctrl-S         | save (prompt for a name if there is none)      |
//! | Ctrl-F         | incremental search                             |
//! | Ctrl-Q         | quit (confirm when there are unsaved changes)  |
//! | Ctrl-L, Esc    | ignored                                        |
//!
//! While a prompt is open every key goes to the prompt instead.

use std::path::{Path, PathBuf};

use roku_term::key::Key;

use crate::error::Result;
use crate::file;
use crate::options::Options;
use crate::position::Position;
use crate::prompt::{Prompt, PromptEvent, PromptPurpose};
use crate::row_store::RowStore;
use crate::search::SearchState;
use crate::status::StatusMessage;
use crate::viewport::Viewport;

/// Rows taken by the status bar and message bar.
pub const CHROME_ROWS: usize = 2;

const SAVE_PROMPT: &str = "Save as: {} (ESC to cancel)";
const SEARCH_PROMPT: &str = "Search: {} (Use ESC/Arrows/Enter)";

// ---------------------------------------------------------------------------
// Outcome / Direction
// ---------------------------------------------------------------------------

/// What the run loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// Single-step cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

// ---------------------------------------------------------------------------
// EditorState
// ---------------------------------------------------------------------------

/// Everything the editor knows about the open document.
#[derive(Debug)]
pub struct EditorState {
    store: RowStore,
    viewport: Viewport,
    cursor: Position,
    /// Render column of the cursor, refreshed by [`scroll`](Self::scroll).
    render_col: usize,
    filename: Option<PathBuf>,
    status: StatusMessage,
    options: Options,
    /// Ctrl-Q presses left before quitting discards changes.
    quit_times: u32,
    prompt: Option<Prompt>,
    search: Option<SearchState>,
}

impl EditorState {
    /// An empty, unnamed document.
    #[must_use]
    pub fn new(options: Options) -> Self {
        let store = RowStore::new(options.tab_stop);
        Self::with_store(store, None, options)
    }

    /// Open `path`. A file that does not exist yet gives an empty document
    /// that will be saved under that name.
    ///
    /// # Errors
    ///
    /// Any I/O error reading an existing file.
    pub fn open(path: &Path, options: Options) -> Result<Self> {
        let store = file::load(path, options.tab_stop)?;
        Ok(Self::with_store(store, Some(path.to_path_buf()), options))
    }

    /// Wrap an existing document.
    #[must_use]
    pub fn with_store(mut store: RowStore, filename: Option<PathBuf>, options: Options) -> Self {
        store.set_tab_stop(options.tab_stop);
        Self {
            store,
            viewport: Viewport::default(),
            cursor: Position::ZERO,
            render_col: 0,
            filename,
            status: StatusMessage::default(),
            quit_times: options.quit_times,
            options,
            prompt: None,
            search: None,
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn store(&self) -> &RowStore {
        &self.store
    }

    #[inline]
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> Position {
        self.cursor
    }

    /// Render column of the cursor as of the last [`scroll`](Self::scroll).
    #[inline]
    #[must_use]
    pub const fn render_col(&self) -> usize {
        self.render_col
    }

    #[inline]
    #[must_use]
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// True if there are unsaved changes.
    #[inline]
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    #[inline]
    #[must_use]
    pub const fn status(&self) -> &StatusMessage {
        &self.status
    }

    #[inline]
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// The open prompt, if any.
    #[inline]
    #[must_use]
    pub const fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    // -- Configuration ------------------------------------------------------

    /// Fit the text window to a `rows × cols` screen, leaving room for the
    /// status and message bars.
    pub fn resize(&mut self, screen_rows: usize, screen_cols: usize) {
        self.viewport
            .resize(screen_rows.saturating_sub(CHROME_ROWS), screen_cols);
    }

    /// Replace the status message.
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status.set(text);
    }

    /// Place the cursor, clamped to the document.
    pub fn set_cursor(&mut self, pos: Position) {
        let row = pos.row.min(self.store.len());
        self.cursor = Position::new(row, pos.col.min(self.store.row_len(row)));
    }

    /// Bring the cursor into the window and refresh its render column.
    pub fn scroll(&mut self) {
        self.render_col = self.viewport.recompute(self.cursor, &self.store);
    }

    // -- Key dispatch -------------------------------------------------------

    /// Handle one key.
    pub fn process_key(&mut self, key: Key) -> Outcome {
        if self.prompt.is_some() {
            self.prompt_key(key);
            self.quit_times = self.options.quit_times;
            self.scroll();
            return Outcome::Continue;
        }

        match key {
            Key::CtrlQ => {
                if self.store.is_dirty() && self.quit_times > 0 {
                    let times = self.quit_times;
                    self.set_status(format!(
                        "WARNING!!! File has unsaved changes. Press Ctrl-Q {times} more times to quit."
                    ));
                    self.quit_times -= 1;
                    return Outcome::Continue;
                }
                return Outcome::Quit;
            }
            Key::Enter => self.insert_newline(),
            Key::Backspace => self.delete_char(),
            Key::Delete => {
                self.move_cursor(Direction::Right);
                self.delete_char();
            }
            Key::CtrlS => self.save(),
            Key::CtrlF => self.find(),
            Key::ArrowUp => self.move_cursor(Direction::Up),
            Key::ArrowDown => self.move_cursor(Direction::Down),
            Key::ArrowLeft => self.move_cursor(Direction::Left),
            Key::ArrowRight => self.move_cursor(Direction::Right),
            Key::PageUp => self.page(Direction::Up),
            Key::PageDown => self.page(Direction::Down),
            Key::Home => self.cursor.col = 0,
            Key::End => self.cursor.col = self.store.row_len(self.cursor.row),
            Key::CtrlL | Key::Escape => {}
            Key::Byte(b) => self.insert_char(b),
        }

        self.quit_times = self.options.quit_times;
        self.scroll();
        Outcome::Continue
    }

    // -- Editing ------------------------------------------------------------

    /// Insert `byte` at the cursor and step past it.
    pub fn insert_char(&mut self, byte: u8) {
        self.store.insert_char(self.cursor.row, self.cursor.col, byte);
        self.cursor.col += 1;
    }

    /// Split the row at the cursor; the cursor moves to the new row.
    pub fn insert_newline(&mut self) {
        self.cursor = self.store.split_row(self.cursor.row, self.cursor.col);
    }

    /// Backspace at the cursor.
    pub fn delete_char(&mut self) {
        if let Some(pos) = self.store.delete_char(self.cursor.row, self.cursor.col) {
            self.cursor = pos;
        }
    }

    // -- Movement -----------------------------------------------------------

    /// Move one step. Left/Right wrap across line ends; Up/Down keep the
    /// column when it fits and clamp it otherwise.
    pub fn move_cursor(&mut self, dir: Direction) {
        let num_rows = self.store.len();
        let Position { mut row, mut col } = self.cursor;

        match dir {
            Direction::Left => {
                if col > 0 {
                    col -= 1;
                } else if row > 0 {
                    row -= 1;
                    col = self.store.row_len(row);
                }
            }
            Direction::Right => {
                if row < num_rows {
                    if col < self.store.row_len(row) {
                        col += 1;
                    } else {
                        row += 1;
                        col = 0;
                    }
                }
            }
            Direction::Up => row = row.saturating_sub(1),
            Direction::Down => {
                if row < num_rows {
                    row += 1;
                }
            }
        }

        self.cursor = Position::new(row, col.min(self.store.row_len(row)));
    }

    /// Page up/down: jump to the window edge, then one window further.
    fn page(&mut self, dir: Direction) {
        let rows = self.viewport.rows();
        self.cursor.row = match dir {
            Direction::Down => (self.viewport.row_offset() + rows)
                .saturating_sub(1)
                .min(self.store.len()),
            _ => self.viewport.row_offset(),
        };
        for _ in 0..rows {
            self.move_cursor(dir);
        }
    }

    // -- Save ---------------------------------------------------------------

    /// Save to the current filename, or ask for one.
    pub fn save(&mut self) {
        if self.filename.is_none() {
            self.prompt = Some(Prompt::new(PromptPurpose::SaveAs, SAVE_PROMPT));
            return;
        }
        self.write_file();
    }

    fn write_file(&mut self) {
        let Some(path) = self.filename.clone() else {
            return;
        };
        match file::save(&self.store, &path) {
            Ok(written) => {
                self.store.mark_clean();
                self.set_status(format!("{written} bytes written to disk"));
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "save failed");
                self.set_status(format!("Can't save! {err}"));
            }
        }
    }

    // -- Search -------------------------------------------------------------

    /// Open the search prompt.
    pub fn find(&mut self) {
        self.search = Some(SearchState::new(self.cursor, &self.viewport));
        self.prompt = Some(Prompt::new(PromptPurpose::Search, SEARCH_PROMPT));
    }

    // -- Prompt -------------------------------------------------------------

    fn prompt_key(&mut self, key: Key) {
        let Some(mut prompt) = self.prompt.take() else {
            return;
        };
        let event = prompt.handle_key(key);

        match prompt.purpose() {
            PromptPurpose::Search => {
                if let Some(search) = self.search.as_mut() {
                    search.on_key(
                        key,
                        prompt.input(),
                        &self.store,
                        &mut self.cursor,
                        &mut self.viewport,
                    );
                }
                if event != PromptEvent::Pending {
                    tracing::debug!(?event, "search closed");
                    self.search = None;
                    self.status.clear();
                    return;
                }
            }
            PromptPurpose::SaveAs => match event {
                PromptEvent::Pending => {}
                PromptEvent::Cancelled => {
                    tracing::debug!("save cancelled");
                    self.set_status("Save aborted");
                    return;
                }
                PromptEvent::Committed(name) => {
                    let name = String::from_utf8_lossy(&name).into_owned();
                    tracing::debug!(%name, "save as");
                    self.filename = Some(PathBuf::from(name));
                    self.status.clear();
                    self.write_file();
                    return;
                }
            },
        }

        self.prompt = Some(prompt);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
