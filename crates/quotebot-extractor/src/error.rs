//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during field extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// A configured pattern is not a valid regular expression
    #[error("Invalid pattern for '{field}': {message}")]
    InvalidPattern {
        /// Field the pattern extracts
        field: &'static str,
        /// Regex compiler message
        message: String,
    },

    /// A capturing pattern has no capture group
    #[error("Pattern for '{0}' must contain a capture group")]
    MissingCaptureGroup(&'static str),

    /// Text exceeds maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// Text is empty or whitespace only
    #[error("Text is empty")]
    EmptyText,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
