//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the quotation logic and the
//! outside world. Implementations live in other crates (quotebot-ocr,
//! quotebot-sheet).

use crate::{CellValue, DocumentRef};
use std::path::Path;

/// Lists the documents to be quoted
///
/// Implemented by the infrastructure layer (quotebot-ocr)
pub trait DocumentSource {
    /// Error type for listing operations
    type Error;

    /// List documents in processing order
    fn list_documents(&self) -> Result<Vec<DocumentRef>, Self::Error>;
}

/// Turns a document into plain text
///
/// Implemented by the infrastructure layer (quotebot-ocr)
pub trait TextExtractor {
    /// Error type for extraction operations
    type Error;

    /// Extract the full text of a document
    fn extract_text(&self, document: &DocumentRef) -> Result<String, Self::Error>;
}

/// Keyed cell-write target
///
/// Implemented by the infrastructure layer (quotebot-sheet). A sink is write
/// only; it is never read back to drive later calculations.
pub trait CellSink {
    /// Error type for sink operations
    type Error;

    /// Write a value to a named cell
    fn write_cell(&mut self, cell: &str, value: CellValue) -> Result<(), Self::Error>;

    /// Persist everything written so far to `path`
    fn persist(&mut self, path: &Path) -> Result<(), Self::Error>;
}
