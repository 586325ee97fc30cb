// SPDX-License-Identifier: MIT
//
// roku — a small terminal text editor.
//
// This is the main binary that wires together the two crates:
//
//   roku-term   → raw mode, key decoding, frame output, event loop
//   roku-editor → rows, viewport, search, editor state
//
// The Editor struct implements roku-term's App trait around an
// EditorState. Each keypress flows through:
//
//   stdin → parser → logical key → on_key → EditorState::process_key
//   paint → frame::draw → Frame → one buffered write → terminal
//
// Layout:
//
//   ┌──────────────────────────────┐
//   │ text rows / ~ filler         │  ← h - 2 rows
//   ├──────────────────────────────┤
//   │ status bar (INVERSE)         │  ← 1 row
//   ├──────────────────────────────┤
//   │ message / prompt             │  ← 1 row
//   └──────────────────────────────┘

mod cli;
mod logging;

use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use roku_editor::editor::{EditorState, Outcome};
use roku_editor::frame;
use roku_term::event_loop::{Action, App, EventLoop};
use roku_term::frame::Frame;
use roku_term::key::Key;
use roku_term::terminal::Size;

use crate::cli::CliArgs;

const HELP: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

// ─── Editor ─────────────────────────────────────────────────────────────────

/// The running editor: state plus what the last paint showed.
struct Editor {
    state: EditorState,
    /// Whether the last paint drew the status message. Lets `on_tick`
    /// repaint exactly once when the message expires.
    message_shown: bool,
}

impl Editor {
    const fn new(state: EditorState) -> Self {
        Self {
            state,
            message_shown: false,
        }
    }

    fn message_visible(&self, now: Instant) -> bool {
        self.state
            .status()
            .visible(now, self.state.options().message_timeout)
            .is_some()
    }
}

impl App for Editor {
    fn on_key(&mut self, key: Key) -> Action {
        match self.state.process_key(key) {
            Outcome::Continue => Action::Continue,
            Outcome::Quit => Action::Quit,
        }
    }

    fn on_resize(&mut self, size: Size) {
        tracing::debug!(cols = size.cols, rows = size.rows, "resize");
        self.state
            .resize(usize::from(size.rows), usize::from(size.cols));
    }

    fn on_tick(&mut self) -> bool {
        self.message_shown && !self.message_visible(Instant::now())
    }

    fn paint(&mut self, frame: &mut Frame) {
        let now = Instant::now();
        frame::draw(&mut self.state, frame, now);
        self.message_shown = self.message_visible(now);
    }
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn run(args: &CliArgs) -> Result<()> {
    let options = args.options().context("invalid option")?;

    let mut state = match &args.file {
        Some(path) => EditorState::open(path, options)
            .with_context(|| format!("could not open {}", path.display()))?,
        None => EditorState::new(options),
    };
    state.set_status(HELP);

    let mut event_loop = EventLoop::new().context("failed to initialize terminal")?;
    let size = event_loop.size();
    state.resize(usize::from(size.rows), usize::from(size.cols));

    let mut editor = Editor::new(state);
    event_loop.run(&mut editor).context("terminal I/O failed")?;
    tracing::info!("exit");
    Ok(())
}

fn main() {
    let args = CliArgs::parse();

    let _log_guard = match logging::init(args.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("roku: {e:#}");
            process::exit(1);
        }
    };

    if let Err(e) = run(&args) {
        tracing::error!(error = %format!("{e:#}"), "fatal");
        eprintln!("roku: {e:#}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
