//! Vision OCR response payloads
//!
//! The same page-response shape appears in two places: the JSON files the
//! asynchronous batch API writes to storage, and the body of the synchronous
//! `files:annotate` call (wrapped in one more `responses` level).

use crate::error::OcrError;
use serde::Deserialize;
use tracing::warn;

/// Annotation result for one file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateFileResponse {
    /// One entry per page
    pub responses: Option<Vec<AnnotateImageResponse>>,
    /// File-level error
    pub error: Option<Status>,
    /// Page count of the source file
    pub total_pages: Option<u32>,
}

/// Annotation result for one page
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateImageResponse {
    /// Detected text, absent for blank or failed pages
    pub full_text_annotation: Option<TextAnnotation>,
    /// Page-level error
    pub error: Option<Status>,
}

/// Detected text of a page
#[derive(Debug, Deserialize)]
pub struct TextAnnotation {
    /// Plain text, line breaks preserved
    #[serde(default)]
    pub text: String,
}

/// Error status reported by the service
#[derive(Debug, Deserialize)]
pub struct Status {
    /// Status code
    #[serde(default)]
    pub code: i32,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
}

/// Body of a synchronous `files:annotate` call
#[derive(Debug, Deserialize)]
pub struct BatchAnnotateFilesResponse {
    /// One entry per requested file
    #[serde(default)]
    pub responses: Vec<AnnotateFileResponse>,
}

impl AnnotateFileResponse {
    /// Concatenate the text of every page
    ///
    /// Pages without a text annotation are skipped with a warning.
    pub fn full_text(&self, source_name: &str) -> Result<String, OcrError> {
        if let Some(status) = &self.error {
            return Err(OcrError::Api {
                code: status.code,
                message: status.message.clone(),
            });
        }

        let pages = self
            .responses
            .as_ref()
            .ok_or_else(|| OcrError::NoResponses(source_name.to_string()))?;

        let mut text = String::new();
        for page in pages {
            match &page.full_text_annotation {
                Some(annotation) => text.push_str(&annotation.text),
                None => {
                    if let Some(status) = &page.error {
                        warn!("Page error in {}: {} {}", source_name, status.code, status.message);
                    }
                    warn!("No 'fullTextAnnotation' found in {}", source_name);
                }
            }
        }
        Ok(text)
    }
}

/// Text from one stored OCR output file
///
/// Empty payloads and undecodable JSON are errors so the caller can skip the
/// file and carry on.
pub fn text_from_output_json(source_name: &str, content: &[u8]) -> Result<String, OcrError> {
    if content.iter().all(u8::is_ascii_whitespace) {
        return Err(OcrError::EmptyPayload(source_name.to_string()));
    }

    let response: AnnotateFileResponse =
        serde_json::from_slice(content).map_err(|error| OcrError::Json {
            source_name: source_name.to_string(),
            error,
        })?;

    response.full_text(source_name)
}

/// Text of one synchronous call and the page count of the source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchText {
    /// Concatenated text of the returned pages
    pub text: String,
    /// Pages in the whole file, when reported
    pub total_pages: Option<u32>,
}

/// Text from a synchronous `files:annotate` response body
pub fn text_from_batch_response(source_name: &str, body: &[u8]) -> Result<BatchText, OcrError> {
    let batch: BatchAnnotateFilesResponse =
        serde_json::from_slice(body).map_err(|error| OcrError::Json {
            source_name: source_name.to_string(),
            error,
        })?;

    let mut text = String::new();
    let mut total_pages = None;
    for file in &batch.responses {
        text.push_str(&file.full_text(source_name)?);
        total_pages = total_pages.max(file.total_pages);
    }
    Ok(BatchText { text, total_pages })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_concatenated_in_order() {
        let json = br#"{
            "inputConfig": {"gcsSource": {"uri": "gs://bucket/input/a.pdf"}},
            "responses": [
                {"fullTextAnnotation": {"text": "Page one\n"}},
                {"fullTextAnnotation": {"text": "Page two\n"}}
            ]
        }"#;
        let text = text_from_output_json("a.json", json).unwrap();
        assert_eq!(text, "Page one\nPage two\n");
    }

    #[test]
    fn test_page_without_annotation_skipped() {
        let json = br#"{"responses": [{}, {"fullTextAnnotation": {"text": "kept"}}]}"#;
        assert_eq!(text_from_output_json("a.json", json).unwrap(), "kept");
    }

    #[test]
    fn test_empty_payload() {
        let result = text_from_output_json("a.json", b"  \n");
        assert!(matches!(result, Err(OcrError::EmptyPayload(_))));
    }

    #[test]
    fn test_invalid_json() {
        let result = text_from_output_json("a.json", b"{not json");
        assert!(matches!(result, Err(OcrError::Json { .. })));
    }

    #[test]
    fn test_missing_responses() {
        let result = text_from_output_json("a.json", br#"{"inputConfig": {}}"#);
        assert!(matches!(result, Err(OcrError::NoResponses(_))));
    }

    #[test]
    fn test_batch_response() {
        let body = br#"{"responses": [{
            "responses": [{"fullTextAnnotation": {"text": "Indemnity: KSH 1,000,000\n"}}],
            "totalPages": 1
        }]}"#;
        let batch = text_from_batch_response("a.pdf", body).unwrap();
        assert_eq!(batch.text, "Indemnity: KSH 1,000,000\n");
        assert_eq!(batch.total_pages, Some(1));
    }

    #[test]
    fn test_batch_file_error() {
        let body = br#"{"responses": [{"error": {"code": 3, "message": "Bad PDF"}}]}"#;
        match text_from_batch_response("a.pdf", body) {
            Err(OcrError::Api { code, message }) => {
                assert_eq!(code, 3);
                assert_eq!(message, "Bad PDF");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }
}
