//! Error types for sheet output

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing a quotation
#[derive(Error, Debug)]
pub enum SheetError {
    /// Spreadsheet could not be read or written
    #[error("Spreadsheet error: {0}")]
    Xlsx(String),

    /// Template has no worksheet to write to
    #[error("Template {0} has no worksheet")]
    NoWorksheet(PathBuf),

    /// Output path is the template itself
    #[error("Refusing to overwrite template {0}")]
    OverwritesTemplate(PathBuf),

    /// Cell reference is not of the form `B8`
    #[error("Invalid cell reference: '{0}'")]
    InvalidCell(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
