//! Google Cloud Vision OCR provider
//!
//! Sends a PDF inline to the synchronous `files:annotate` endpoint with
//! `DOCUMENT_TEXT_DETECTION` and returns the concatenated page text. The
//! endpoint takes at most five pages per call, so longer documents are read
//! in further five-page windows until the reported page count is covered.
//!
//! # Examples
//!
//! ```no_run
//! use quotebot_ocr::VisionProvider;
//! use std::time::Duration;
//!
//! let provider = VisionProvider::new(
//!     quotebot_ocr::vision::DEFAULT_ENDPOINT,
//!     "api-key",
//!     Duration::from_secs(300),
//! )
//! .unwrap();
//! let text = provider.annotate_pdf(&std::fs::read("proposal.pdf").unwrap(), "proposal.pdf");
//! ```

use crate::error::OcrError;
use crate::response::{text_from_batch_response, BatchText};
use base64::{engine::general_purpose::STANDARD, Engine};
use quotebot_domain::traits::TextExtractor;
use quotebot_domain::DocumentRef;
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;
use tracing::{debug, info};

/// Default Vision API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com/v1";

/// Default timeout for one OCR request (5 minutes)
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Most pages the synchronous endpoint accepts per request
pub const MAX_PAGES_PER_REQUEST: usize = 5;

const PDF_MIME_TYPE: &str = "application/pdf";
const FEATURE_TYPE: &str = "DOCUMENT_TEXT_DETECTION";

/// Vision API OCR provider
pub struct VisionProvider {
    endpoint: String,
    api_key: String,
    client: reqwest::blocking::Client,
    pages: Vec<u32>,
}

#[derive(Serialize)]
struct BatchAnnotateFilesRequest {
    requests: Vec<AnnotateFileRequest>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateFileRequest {
    input_config: InputConfig,
    features: Vec<Feature>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pages: Vec<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InputConfig {
    content: String,
    mime_type: &'static str,
}

#[derive(Serialize)]
struct Feature {
    #[serde(rename = "type")]
    feature_type: &'static str,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

impl VisionProvider {
    /// Create a new Vision provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL (e.g., "https://vision.googleapis.com/v1")
    /// - `api_key`: API key sent with every request
    /// - `timeout`: upper bound on a single OCR request
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, OcrError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(OcrError::Config("Vision API key is empty".to_string()));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OcrError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key,
            client,
            pages: (1..=MAX_PAGES_PER_REQUEST as u32).collect(),
        })
    }

    /// Set the 1-based pages of the first request
    ///
    /// An empty list lets the service pick its default pages. Pages after the
    /// highest one listed are still read when the document is longer.
    pub fn with_pages(mut self, pages: Vec<u32>) -> Result<Self, OcrError> {
        if pages.len() > MAX_PAGES_PER_REQUEST {
            return Err(OcrError::Config(format!(
                "At most {} pages can be annotated per request, got {}",
                MAX_PAGES_PER_REQUEST,
                pages.len()
            )));
        }
        if pages.contains(&0) {
            return Err(OcrError::Config("Page numbers start at 1".to_string()));
        }
        self.pages = pages;
        Ok(self)
    }

    /// Pages of the first request
    pub fn pages(&self) -> &[u32] {
        &self.pages
    }

    /// Run OCR over PDF bytes
    ///
    /// The configured pages make up the first request. When the service
    /// reports more pages than that, the rest are requested in windows of
    /// [`MAX_PAGES_PER_REQUEST`].
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The service cannot be reached or the request times out
    /// - The service rejects the request or the document
    /// - The response body is not a valid annotation response
    pub fn annotate_pdf(&self, pdf: &[u8], source_name: &str) -> Result<String, OcrError> {
        info!("Processing file: {}", source_name);
        let content = STANDARD.encode(pdf);

        let mut pages = self.pages.clone();
        let mut text = String::new();
        loop {
            let batch = self.annotate_window(&content, &pages, source_name)?;
            text.push_str(&batch.text);

            let Some(total_pages) = batch.total_pages else {
                break;
            };
            match next_window(&pages, total_pages) {
                Some(next) => {
                    debug!(
                        "{} has {} pages, requesting pages {:?}",
                        source_name, total_pages, next
                    );
                    pages = next;
                }
                None => break,
            }
        }

        info!("OCR complete for {}: {} chars", source_name, text.len());
        Ok(text)
    }

    fn annotate_window(
        &self,
        content: &str,
        pages: &[u32],
        source_name: &str,
    ) -> Result<BatchText, OcrError> {
        let url = format!("{}/files:annotate", self.endpoint);
        debug!("Sending {} base64 bytes to {}", content.len(), url);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body(content, pages))
            .send()
            .map_err(|e| OcrError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .map_err(|e| OcrError::Communication(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(match serde_json::from_slice::<ErrorEnvelope>(&body) {
                Ok(envelope) => OcrError::Api {
                    code: envelope.error.code,
                    message: envelope.error.message,
                },
                Err(_) => OcrError::Communication(format!(
                    "HTTP {}: {}",
                    status,
                    String::from_utf8_lossy(&body)
                )),
            });
        }

        text_from_batch_response(source_name, &body)
    }
}

fn request_body(content: &str, pages: &[u32]) -> BatchAnnotateFilesRequest {
    BatchAnnotateFilesRequest {
        requests: vec![AnnotateFileRequest {
            input_config: InputConfig {
                content: content.to_string(),
                mime_type: PDF_MIME_TYPE,
            },
            features: vec![Feature {
                feature_type: FEATURE_TYPE,
            }],
            pages: pages.to_vec(),
        }],
    }
}

/// Pages of the next request, or `None` once `total_pages` is covered
///
/// An empty `requested` list stands for the service default of the first
/// five pages.
fn next_window(requested: &[u32], total_pages: u32) -> Option<Vec<u32>> {
    let last = requested
        .iter()
        .copied()
        .max()
        .unwrap_or(MAX_PAGES_PER_REQUEST as u32);
    if last >= total_pages {
        return None;
    }
    let end = total_pages.min(last + MAX_PAGES_PER_REQUEST as u32);
    Some((last + 1..=end).collect())
}

impl TextExtractor for VisionProvider {
    type Error = OcrError;

    fn extract_text(&self, document: &DocumentRef) -> Result<String, Self::Error> {
        let pdf = fs::read(&document.path)?;
        self.annotate_pdf(&pdf, &document.id)
    }
}
