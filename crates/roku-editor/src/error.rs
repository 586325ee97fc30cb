//! Error types for file I/O and option parsing.
//!
//! None of these are fatal inside the editor: they are turned into status
//! messages where the user triggered them.

use std::io;

use thiserror::Error;

/// Errors raised by the editor core.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// `name` is not an option roku knows.
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// The value could not be parsed for the named option.
    #[error("invalid value for {name}: {value}")]
    InvalidOptionValue { name: String, value: String },
}

/// Result alias used throughout the editor core.
pub type Result<T> = std::result::Result<T, EditorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts_and_displays() {
        let err: EditorError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, EditorError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: denied");
    }

    #[test]
    fn option_errors_display() {
        assert_eq!(
            EditorError::UnknownOption("foo".into()).to_string(),
            "unknown option: foo"
        );
        assert_eq!(
            EditorError::InvalidOptionValue {
                name: "tabstop".into(),
                value: "x".into()
            }
            .to_string(),
            "invalid value for tabstop: x"
        );
    }
}
