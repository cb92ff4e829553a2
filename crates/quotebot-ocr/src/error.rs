//! Error types for OCR operations

use thiserror::Error;

/// Errors that can occur while turning documents into text
#[derive(Error, Debug)]
pub enum OcrError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The OCR service rejected the request
    #[error("OCR service error {code}: {message}")]
    Api {
        /// Status code reported by the service
        code: i32,
        /// Status message reported by the service
        message: String,
    },

    /// Response could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// OCR output was empty
    #[error("{0} is empty or invalid")]
    EmptyPayload(String),

    /// OCR output had no page responses
    #[error("No 'responses' found in {0}")]
    NoResponses(String),

    /// OCR output was not valid JSON
    #[error("Error decoding JSON from {source_name}: {error}")]
    Json {
        /// Where the payload came from
        source_name: String,
        /// Decoder error
        error: serde_json::Error,
    },

    /// No stored OCR result for a document
    #[error("No OCR result found for {0}")]
    ResultNotFound(String),

    /// Invalid provider configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
