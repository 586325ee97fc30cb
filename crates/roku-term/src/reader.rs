// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Stdin reader — collects raw bytes from the terminal.
//
// The editor is strictly one-key-at-a-time, so stdin is read on the main
// thread. Each call polls stdin's file descriptor with a timeout and reads
// whatever is available. The timeout gives the loop its tick: a lone ESC
// is flushed as Escape after one empty poll, and the status message
// expiry is checked between keys.
//
// A signal (SIGWINCH on resize) interrupts poll() with EINTR. That is
// reported as a timeout so the loop can pick up the new size right away.

use std::io;
use std::time::Duration;

/// Byte chunk read from stdin.
///
/// A single keypress is 1-6 bytes, a paste can be kilobytes. 4 KB handles
/// both without waste.
const READ_BUF_SIZE: usize = 4096;

/// Outcome of one [`StdinReader::read_timeout`] call.
#[derive(Debug, PartialEq, Eq)]
pub enum ReadOutcome<'a> {
    /// Bytes arrived. Never empty.
    Data(&'a [u8]),
    /// Nothing arrived before the timeout (or a signal interrupted the wait).
    Timeout,
    /// Stdin reached end of file.
    Closed,
}

/// Synchronous stdin reader with a reusable read buffer.
pub struct StdinReader {
    buf: Box<[u8; READ_BUF_SIZE]>,
}

impl StdinReader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Box::new([0u8; READ_BUF_SIZE]),
        }
    }

    /// Wait up to `timeout` for stdin to become readable, then read once.
    ///
    /// # Errors
    ///
    /// Returns an error if `poll()` or `read()` fail for any reason other
    /// than an interrupted or would-block call.
    #[cfg(unix)]
    pub fn read_timeout(&mut self, timeout: Duration) -> io::Result<ReadOutcome<'_>> {
        use std::os::unix::io::AsRawFd;

        let stdin_fd = io::stdin().as_raw_fd();
        let timeout_ms = i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX);

        let ready = unsafe {
            let mut pfd = libc::pollfd {
                fd: stdin_fd,
                events: libc::POLLIN,
                revents: 0,
            };
            libc::poll(&raw mut pfd, 1, timeout_ms)
        };

        if ready < 0 {
            return retry_or_fail(io::Error::last_os_error());
        }
        if ready == 0 {
            return Ok(ReadOutcome::Timeout);
        }

        let n = unsafe { libc::read(stdin_fd, self.buf.as_mut_ptr().cast(), self.buf.len()) };

        if n < 0 {
            return retry_or_fail(io::Error::last_os_error());
        }
        if n == 0 {
            return Ok(ReadOutcome::Closed);
        }

        #[allow(clippy::cast_sign_loss)] // n > 0 checked above.
        Ok(ReadOutcome::Data(&self.buf[..n as usize]))
    }

    /// Non-unix fallback: a blocking read with no timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if reading stdin fails.
    #[cfg(not(unix))]
    pub fn read_timeout(&mut self, _timeout: Duration) -> io::Result<ReadOutcome<'_>> {
        use std::io::Read;

        match io::stdin().lock().read(&mut self.buf[..]) {
            Ok(0) => Ok(ReadOutcome::Closed),
            Ok(n) => Ok(ReadOutcome::Data(&self.buf[..n])),
            Err(err) => retry_or_fail(err),
        }
    }
}

impl Default for StdinReader {
    fn default() -> Self {
        Self::new()
    }
}

/// EINTR and EAGAIN are not failures; the caller just polls again.
fn retry_or_fail<'a>(err: io::Error) -> io::Result<ReadOutcome<'a>> {
    match err.kind() {
        io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock => Ok(ReadOutcome::Timeout),
        _ => Err(err),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_buf_size_reasonable() {
        assert!(READ_BUF_SIZE >= 1024);
        assert!(READ_BUF_SIZE <= 65536);
    }

    #[test]
    fn interrupted_is_a_timeout() {
        let err = io::Error::from(io::ErrorKind::Interrupted);
        assert_eq!(retry_or_fail(err).unwrap(), ReadOutcome::Timeout);
    }

    #[test]
    fn would_block_is_a_timeout() {
        let err = io::Error::from(io::ErrorKind::WouldBlock);
        assert_eq!(retry_or_fail(err).unwrap(), ReadOutcome::Timeout);
    }

    #[test]
    fn other_errors_propagate() {
        let err = io::Error::from(io::ErrorKind::BrokenPipe);
        assert!(retry_or_fail(err).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn short_poll_does_not_hang() {
        // Under the test harness stdin may be a tty, a pipe or /dev/null.
        // Any outcome is fine as long as the call returns.
        let mut reader = StdinReader::new();
        let _ = reader.read_timeout(Duration::from_millis(1));
    }
}
