//! Timestamped status message.
//!
//! The message bar shows the most recent message until it is older than
//! the configured timeout. Age is checked when drawing, so nothing needs
//! to fire when a message expires.

use std::time::{Duration, Instant};

/// The current status message and when it was set.
#[derive(Debug, Clone, Default)]
pub struct StatusMessage {
    text: String,
    set_at: Option<Instant>,
}

impl StatusMessage {
    /// Replace the message, timestamped now.
    pub fn set(&mut self, text: impl Into<String>) {
        self.set_at(text, Instant::now());
    }

    /// Replace the message with an explicit timestamp.
    pub fn set_at(&mut self, text: impl Into<String>, at: Instant) {
        self.text = text.into();
        self.set_at = Some(at);
    }

    /// Drop the message.
    pub fn clear(&mut self) {
        self.text.clear();
        self.set_at = None;
    }

    /// The message text, expired or not.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The message if it is younger than `timeout` at `now`.
    #[must_use]
    pub fn visible(&self, now: Instant, timeout: Duration) -> Option<&str> {
        let at = self.set_at?;
        if self.text.is_empty() || now.saturating_duration_since(at) >= timeout {
            return None;
        }
        Some(&self.text)
    }
}
