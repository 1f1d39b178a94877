//! Error types for markspan library.

use std::io;
use thiserror::Error;

/// Result type alias for markspan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting marked text.
///
/// Only whole-document failures are errors. A mark element whose text cannot
/// be located is recorded as a [`MatchMiss`](crate::model::MatchMiss) instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input bytes could not be decoded as text.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The markup structure is malformed (strict mode only).
    #[error("Markup error at byte {offset}: {message}")]
    Markup {
        /// Byte offset in the (normalized) markup where the problem starts
        offset: usize,
        /// Description of the problem
        message: String,
    },

    /// A language identifier was not recognized.
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    /// A localization catalog or strings file is malformed.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Error during rendering (JSON, annotated text).
    #[error("Rendering error: {0}")]
    Render(String),

    /// The stored language preference is unreadable.
    #[error("Preferences error: {0}")]
    Preferences(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a markup error at the given byte offset.
    pub fn markup(offset: usize, message: impl Into<String>) -> Self {
        Error::Markup {
            offset,
            message: message.into(),
        }
    }

    /// Whether this error is a decoding failure of the whole input.
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode(_))
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownLanguage("fr".to_string());
        assert_eq!(err.to_string(), "Unknown language: fr");

        let err = Error::markup(7, "unclosed mark element");
        assert_eq!(
            err.to_string(),
            "Markup error at byte 7: unclosed mark element"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_utf8_error_is_decode() {
        let err: Error = String::from_utf8(vec![0xff, 0xfe, 0xfd]).unwrap_err().into();
        assert!(err.is_decode());
    }
}
