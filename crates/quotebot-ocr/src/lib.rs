//! quotebot OCR Layer
//!
//! Implementations of the `TextExtractor` and `DocumentSource` traits from
//! `quotebot-domain`.
//!
//! # Providers
//!
//! - `VisionProvider`: Google Cloud Vision `files:annotate` over HTTP
//! - `OcrResultReader`: OCR output already stored on disk
//! - `MockExtractor`: Deterministic in-memory extractor for testing
//! - `DirectorySource`: Documents in a local folder
//!
//! # Examples
//!
//! ```
//! use quotebot_ocr::MockExtractor;
//! use quotebot_domain::traits::TextExtractor;
//! use quotebot_domain::DocumentRef;
//!
//! let extractor = MockExtractor::new("Indemnity: KSH 1,000,000\n");
//! let text = extractor.extract_text(&DocumentRef::from_path("a.pdf")).unwrap();
//! assert_eq!(text, "Indemnity: KSH 1,000,000\n");
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod response;
pub mod results;
pub mod source;
pub mod vision;

use quotebot_domain::traits::TextExtractor;
use quotebot_domain::DocumentRef;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub use error::OcrError;
pub use results::{load_text, OcrResultReader};
pub use source::DirectorySource;
pub use vision::VisionProvider;

/// Mock text extractor for deterministic testing
///
/// Returns pre-configured text without touching the network or disk.
///
/// # Examples
///
/// ```
/// use quotebot_ocr::MockExtractor;
/// use quotebot_domain::traits::TextExtractor;
/// use quotebot_domain::DocumentRef;
///
/// let extractor = MockExtractor::default()
///     .with_response("a.pdf", "text of a")
///     .with_failure("b.pdf");
///
/// assert_eq!(extractor.extract_text(&DocumentRef::from_path("a.pdf")).unwrap(), "text of a");
/// assert!(extractor.extract_text(&DocumentRef::from_path("b.pdf")).is_err());
/// assert_eq!(extractor.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockExtractor {
    default_response: String,
    responses: HashMap<String, String>,
    failures: HashSet<String>,
    call_count: Arc<AtomicUsize>,
}

impl MockExtractor {
    /// Create a new MockExtractor with a fixed text for all documents
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: HashMap::new(),
            failures: HashSet::new(),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Return `text` for the document with this id
    pub fn with_response(mut self, document_id: impl Into<String>, text: impl Into<String>) -> Self {
        self.responses.insert(document_id.into(), text.into());
        self
    }

    /// Fail extraction for the document with this id
    pub fn with_failure(mut self, document_id: impl Into<String>) -> Self {
        self.failures.insert(document_id.into());
        self
    }

    /// Get the number of times extract_text was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }
}

impl Default for MockExtractor {
    fn default() -> Self {
        Self::new("")
    }
}

impl TextExtractor for MockExtractor {
    type Error = OcrError;

    fn extract_text(&self, document: &DocumentRef) -> Result<String, Self::Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if self.failures.contains(&document.id) {
            return Err(OcrError::Communication(format!(
                "Mock failure for {}",
                document.id
            )));
        }

        Ok(self
            .responses
            .get(&document.id)
            .cloned()
            .unwrap_or_else(|| self.default_response.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_extractor_default() {
        let extractor = MockExtractor::new("Test text");
        let result = extractor.extract_text(&DocumentRef::from_path("any.pdf"));
        assert_eq!(result.unwrap(), "Test text");
    }

    #[test]
    fn test_mock_extractor_specific_responses() {
        let extractor = MockExtractor::default()
            .with_response("a.pdf", "alpha")
            .with_response("b.pdf", "beta");

        assert_eq!(extractor.extract_text(&DocumentRef::from_path("a.pdf")).unwrap(), "alpha");
        assert_eq!(extractor.extract_text(&DocumentRef::from_path("b.pdf")).unwrap(), "beta");
        assert_eq!(extractor.extract_text(&DocumentRef::from_path("c.pdf")).unwrap(), "");
    }

    #[test]
    fn test_mock_extractor_call_count() {
        let extractor = MockExtractor::new("x");
        assert_eq!(extractor.call_count(), 0);

        extractor.extract_text(&DocumentRef::from_path("a.pdf")).unwrap();
        extractor.extract_text(&DocumentRef::from_path("b.pdf")).unwrap();
        assert_eq!(extractor.call_count(), 2);

        extractor.reset_call_count();
        assert_eq!(extractor.call_count(), 0);
    }

    #[test]
    fn test_mock_extractor_failure() {
        let extractor = MockExtractor::default().with_failure("bad.pdf");
        let result = extractor.extract_text(&DocumentRef::from_path("bad.pdf"));
        assert!(matches!(result, Err(OcrError::Communication(_))));
    }

    #[test]
    fn test_mock_extractor_clone_shares_count() {
        let first = MockExtractor::new("x");
        let second = first.clone();

        first.extract_text(&DocumentRef::from_path("a.pdf")).unwrap();

        assert_eq!(first.call_count(), 1);
        assert_eq!(second.call_count(), 1);
    }
}
