//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A document lacks a value the premium chain needs
    #[error("{document}: required field '{field}' was not found")]
    MissingField {
        /// Document id
        document: String,
        /// Field name
        field: &'static str,
    },

    /// Documents could not be listed
    #[error("Input error: {0}")]
    Input(String),

    /// Extractor error
    #[error("Extractor error: {0}")]
    Extractor(#[from] quotebot_extractor::ExtractorError),

    /// OCR error
    #[error("OCR error: {0}")]
    Ocr(#[from] quotebot_ocr::OcrError),

    /// Sheet output error
    #[error("Output error: {0}")]
    Sheet(#[from] quotebot_sheet::SheetError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
