//! Modal single-line input.
//!
//! A [`Prompt`] takes over the message bar to collect one line of text,
//! used for the save-as filename and the search query. The prompt only
//! edits its own input; what happens with each keystroke beyond that is
//! decided by the caller based on the [`PromptPurpose`].
//!
//! The template is shown with `{}` replaced by the current input, e.g.
//! `"Save as: {} (ESC to cancel)"`.

use roku_term::key::Key;

/// What the collected line is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPurpose {
    /// Filename for a buffer that has none.
    SaveAs,
    /// Incremental search query.
    Search,
}

/// Result of feeding one key to a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    /// The prompt is still open (input may or may not have changed).
    Pending,
    /// Escape was pressed.
    Cancelled,
    /// Enter was pressed with non-empty input.
    Committed(Vec<u8>),
}

/// An open prompt.
#[derive(Debug, Clone)]
pub struct Prompt {
    purpose: PromptPurpose,
    template: String,
    input: Vec<u8>,
}

impl Prompt {
    /// Open a prompt with an empty input.
    #[must_use]
    pub fn new(purpose: PromptPurpose, template: impl Into<String>) -> Self {
        Self {
            purpose,
            template: template.into(),
            input: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn purpose(&self) -> PromptPurpose {
        self.purpose
    }

    /// The text typed so far.
    #[inline]
    #[must_use]
    pub fn input(&self) -> &[u8] {
        &self.input
    }

    /// The template with `{}` replaced by the input.
    #[must_use]
    pub fn display(&self) -> Vec<u8> {
        let template = self.template.as_bytes();
        match template.windows(2).position(|w| w == b"{}") {
            Some(at) => {
                let mut out = Vec::with_capacity(template.len() + self.input.len());
                out.extend_from_slice(&template[..at]);
                out.extend_from_slice(&self.input);
                out.extend_from_slice(&template[at + 2..]);
                out
            }
            None => template.to_vec(),
        }
    }

    /// Apply one key to the input line.
    ///
    /// Backspace and Delete remove the last byte. Printable ASCII is
    /// appended. Enter on an empty line does nothing.
    pub fn handle_key(&mut self, key: Key) -> PromptEvent {
        match key {
            Key::Backspace | Key::Delete => {
                self.input.pop();
            }
            Key::Escape => return PromptEvent::Cancelled,
            Key::Enter if !self.input.is_empty() => {
                return PromptEvent::Committed(self.input.clone());
            }
            Key::Byte(b @ 0x20..=0x7E) => self.input.push(b),
            _ => {}
        }
        PromptEvent::Pending
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(prompt: &mut Prompt, text: &str) {
        for b in text.bytes() {
            assert_eq!(prompt.handle_key(Key::Byte(b)), PromptEvent::Pending);
        }
    }

    #[test]
    fn new_is_empty() {
        let p = Prompt::new(PromptPurpose::SaveAs, "Save as: {}");
        assert!(p.input().is_empty());
        assert_eq!(p.purpose(), PromptPurpose::SaveAs);
    }

    #[test]
    fn printable_bytes_are_appended() {
        let mut p = Prompt::new(PromptPurpose::Search, "Search: {}");
        typed(&mut p, "foo bar");
        assert_eq!(p.input(), b"foo bar");
    }

    #[test]
    fn control_and_high_bytes_are_ignored() {
        let mut p = Prompt::new(PromptPurpose::Search, "{}");
        p.handle_key(Key::Byte(b'\t'));
        p.handle_key(Key::Byte(0xC3));
        p.handle_key(Key::ArrowLeft);
        p.handle_key(Key::CtrlS);
        assert!(p.input().is_empty());
    }

    #[test]
    fn backspace_and_delete_remove_last() {
        let mut p = Prompt::new(PromptPurpose::Search, "{}");
        typed(&mut p, "abc");
        p.handle_key(Key::Backspace);
        assert_eq!(p.input(), b"ab");
        p.handle_key(Key::Delete);
        assert_eq!(p.input(), b"a");
        p.handle_key(Key::Backspace);
        p.handle_key(Key::Backspace);
        assert!(p.input().is_empty());
    }

    #[test]
    fn escape_cancels() {
        let mut p = Prompt::new(PromptPurpose::SaveAs, "{}");
        typed(&mut p, "x");
        assert_eq!(p.handle_key(Key::Escape), PromptEvent::Cancelled);
    }

    #[test]
    fn enter_commits_non_empty_input() {
        let mut p = Prompt::new(PromptPurpose::SaveAs, "{}");
        assert_eq!(p.handle_key(Key::Enter), PromptEvent::Pending);
        typed(&mut p, "a.txt");
        assert_eq!(
            p.handle_key(Key::Enter),
            PromptEvent::Committed(b"a.txt".to_vec())
        );
    }

    #[test]
    fn display_substitutes_input() {
        let mut p = Prompt::new(PromptPurpose::SaveAs, "Save as: {} (ESC to cancel)");
        typed(&mut p, "f");
        assert_eq!(p.display(), b"Save as: f (ESC to cancel)");
    }

    #[test]
    fn display_without_placeholder() {
        let p = Prompt::new(PromptPurpose::Search, "plain");
        assert_eq!(p.display(), b"plain");
    }
}
