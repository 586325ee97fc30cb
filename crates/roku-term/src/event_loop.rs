// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Event loop — the heartbeat of the terminal application.
//
// Wires everything together: stdin bytes are read on the main thread,
// parsed into key events, narrowed to logical keys, and handed to the
// application. The application paints a Frame which is encoded into one
// OutputBuffer and written with a single syscall.
//
// # Order of operations
//
// Paint first, then wait for input. The screen always shows the state the
// next key will act on, which is what a one-key-at-a-time editor needs.
//
//   loop:
//     if dirty: paint + write frame
//     poll stdin (tick timeout)
//       data    → parse → keys → app.on_key
//       timeout → flush lone ESC, app.on_tick
//     SIGWINCH → refresh size, app.on_resize
//
// # SIGWINCH Handling
//
// Terminal resize is detected via a SIGWINCH handler that sets an
// `AtomicBool`. The signal also interrupts poll(), so the loop reacts
// immediately rather than at the next tick.
//
// # Escape Sequence Timeout
//
// A lone ESC byte is ambiguous: it could be the Escape key or the start
// of a CSI sequence. The parser holds it as pending. When a poll times
// out with no new bytes we flush pending bytes as literal events.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::frame::Frame;
use crate::input::Parser;
use crate::key::Key;
use crate::output::OutputBuffer;
use crate::reader::{ReadOutcome, StdinReader};
use crate::terminal::{Size, Terminal};

// ─── SIGWINCH ────────────────────────────────────────────────────────────────

/// Global flag set by the SIGWINCH handler. Checked each loop iteration.
static SIGWINCH_RECEIVED: AtomicBool = AtomicBool::new(false);

/// Install a signal handler for SIGWINCH (terminal resize).
///
/// The handler only sets [`SIGWINCH_RECEIVED`]. Writing to an atomic is
/// async-signal-safe. `SA_RESTART` is left off so poll() returns EINTR.
#[cfg(unix)]
fn install_sigwinch_handler() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = sigwinch_handler as *const () as usize;
        sa.sa_flags = 0;
        libc::sigemptyset(&raw mut sa.sa_mask);
        libc::sigaction(libc::SIGWINCH, &raw const sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn sigwinch_handler(_sig: libc::c_int) {
    SIGWINCH_RECEIVED.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
fn install_sigwinch_handler() {
    // No-op on non-unix platforms.
}

// ─── App Trait ───────────────────────────────────────────────────────────────

/// What the application tells the event loop to do after handling a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Continue running.
    Continue,
    /// Exit the event loop cleanly.
    Quit,
}

/// Application interface for the event loop.
///
/// Only [`on_key`](App::on_key) and [`paint`](App::paint) are required.
pub trait App {
    /// Handle one logical key. Return [`Action::Quit`] to exit the loop.
    fn on_key(&mut self, key: Key) -> Action;

    /// Handle terminal resize. Called with the new terminal dimensions.
    fn on_resize(&mut self, _size: Size) {}

    /// Called whenever a poll times out with no input.
    ///
    /// Return `true` if time-based state changed (an expiring status
    /// message, for example) and a repaint is needed.
    fn on_tick(&mut self) -> bool {
        false
    }

    /// Paint the current state into `frame`.
    ///
    /// The frame is cleared before this call. Push one line per screen
    /// row, top to bottom, and set the cursor.
    fn paint(&mut self, frame: &mut Frame);
}

// ─── Loop Config ─────────────────────────────────────────────────────────────

/// Configuration for the event loop timing.
#[derive(Debug, Clone, Copy)]
pub struct LoopConfig {
    /// How long one stdin poll waits before reporting a tick (milliseconds).
    ///
    /// Doubles as the escape sequence timeout. Default: 50 ms.
    pub tick_interval_ms: u64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 50,
        }
    }
}

// ─── EventLoop ───────────────────────────────────────────────────────────────

/// The terminal event loop.
///
/// Owns the terminal, parser, stdin reader and output buffer. Call
/// [`run`](Self::run) to enter the loop — it returns when the application
/// signals [`Action::Quit`] or stdin closes.
pub struct EventLoop {
    terminal: Terminal,
    parser: Parser,
    reader: StdinReader,
    out: OutputBuffer,
    config: LoopConfig,
}

impl EventLoop {
    /// Create a new event loop with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized.
    pub fn new() -> io::Result<Self> {
        Self::with_config(LoopConfig::default())
    }

    /// Create a new event loop with custom timing configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized.
    pub fn with_config(config: LoopConfig) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new()?,
            parser: Parser::new(),
            reader: StdinReader::new(),
            out: OutputBuffer::new(),
            config,
        })
    }

    /// The current terminal size.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.terminal.size()
    }

    /// Run the event loop until the application returns [`Action::Quit`].
    ///
    /// Enters raw mode and the alternate screen, installs the SIGWINCH
    /// handler, runs the loop, and restores the terminal on exit (even on
    /// error).
    ///
    /// # Errors
    ///
    /// Returns an error if terminal enter/leave, reading stdin, or writing
    /// a frame fails.
    pub fn run(&mut self, app: &mut impl App) -> io::Result<()> {
        self.terminal.enter()?;
        install_sigwinch_handler();

        let result = self.run_inner(app);

        // Always clean up, even if the loop errored.
        self.terminal.leave()?;

        result
    }

    /// The inner loop, separated so cleanup runs regardless of outcome.
    fn run_inner(&mut self, app: &mut impl App) -> io::Result<()> {
        let size = self.terminal.size();
        let mut frame = Frame::new(size.cols, size.rows);
        let mut dirty = true; // First frame always renders.
        let timeout = Duration::from_millis(self.config.tick_interval_ms);

        loop {
            // ── Render if dirty ──────────────────────────────────
            if dirty {
                frame.clear();
                app.paint(&mut frame);
                frame.render(&mut self.out)?;
                self.out.flush_stdout()?;
                dirty = false;
            }

            // ── Wait for stdin ───────────────────────────────────
            let events = match self.reader.read_timeout(timeout)? {
                ReadOutcome::Data(bytes) => self.parser.advance(bytes),
                ReadOutcome::Timeout => {
                    if app.on_tick() {
                        dirty = true;
                    }
                    // Flush pending escape sequences (lone ESC → Escape key).
                    if self.parser.has_pending() {
                        self.parser.flush()
                    } else {
                        Vec::new()
                    }
                }
                ReadOutcome::Closed => {
                    tracing::debug!("stdin closed, leaving event loop");
                    return Ok(());
                }
            };

            for key in events.into_iter().flat_map(Key::from_event) {
                dirty = true;
                if app.on_key(key) == Action::Quit {
                    return Ok(());
                }
            }

            // ── Check for terminal resize ────────────────────────
            if SIGWINCH_RECEIVED.swap(false, Ordering::Relaxed) {
                let new_size = self.terminal.refresh_size();
                frame.resize(new_size.cols, new_size.rows);
                app.on_resize(new_size);
                dirty = true;
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── LoopConfig ──────────────────────────────────────────────

    #[test]
    fn default_config_ticks_at_50ms() {
        let config = LoopConfig::default();
        assert_eq!(config.tick_interval_ms, 50);
    }

    // ── Action ──────────────────────────────────────────────────

    #[test]
    fn action_equality() {
        assert_eq!(Action::Continue, Action::Continue);
        assert_ne!(Action::Continue, Action::Quit);
    }

    // ── EventLoop construction ─────────────────────────────────

    #[test]
    fn event_loop_with_custom_config() {
        // Construction fails only on a tty whose size cannot be queried.
        if let Ok(event_loop) = EventLoop::with_config(LoopConfig {
            tick_interval_ms: 10,
        }) {
            assert_eq!(event_loop.config.tick_interval_ms, 10);
            assert!(event_loop.size().cols > 0);
        }
    }

    // ── SIGWINCH flag ──────────────────────────────────────────

    #[test]
    fn sigwinch_flag_swap() {
        SIGWINCH_RECEIVED.store(true, Ordering::Relaxed);
        let was = SIGWINCH_RECEIVED.swap(false, Ordering::Relaxed);
        assert!(was);
        assert!(!SIGWINCH_RECEIVED.load(Ordering::Relaxed));
    }

    // ── App trait defaults ─────────────────────────────────────

    struct MinimalApp {
        keys: Vec<Key>,
    }

    impl App for MinimalApp {
        fn on_key(&mut self, key: Key) -> Action {
            self.keys.push(key);
            if key == Key::CtrlQ {
                Action::Quit
            } else {
                Action::Continue
            }
        }

        fn paint(&mut self, frame: &mut Frame) {
            frame.push_line("hello");
            frame.set_cursor(5, 0);
        }
    }

    #[test]
    fn app_default_on_tick_not_dirty() {
        let mut app = MinimalApp { keys: Vec::new() };
        assert!(!app.on_tick());
    }

    #[test]
    fn app_default_on_resize_is_noop() {
        let mut app = MinimalApp { keys: Vec::new() };
        app.on_resize(Size { cols: 100, rows: 50 });
    }

    #[test]
    fn app_receives_keys_and_quits() {
        let mut app = MinimalApp { keys: Vec::new() };
        assert_eq!(app.on_key(Key::Byte(b'a')), Action::Continue);
        assert_eq!(app.on_key(Key::CtrlQ), Action::Quit);
        assert_eq!(app.keys, vec![Key::Byte(b'a'), Key::CtrlQ]);
    }

    #[test]
    fn paint_fills_frame() {
        let mut app = MinimalApp { keys: Vec::new() };
        let mut frame = Frame::new(80, 24);
        app.paint(&mut frame);
        assert_eq!(frame.lines().len(), 1);
        assert_eq!(frame.cursor(), (5, 0));
    }
}
