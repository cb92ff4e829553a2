//! Reader for OCR results already on disk
//!
//! The asynchronous Vision batch API writes one JSON file per output batch,
//! named after the destination prefix (`<stem>.json` followed by
//! `output-1-to-1.json` and so on). A local mirror of that folder, or plain
//! `.txt` transcripts, can be fed to the pipeline without calling the
//! service again.

use crate::error::OcrError;
use crate::response::text_from_output_json;
use quotebot_domain::traits::TextExtractor;
use quotebot_domain::DocumentRef;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads stored OCR output for each document
#[derive(Debug, Clone)]
pub struct OcrResultReader {
    results_dir: PathBuf,
}

impl OcrResultReader {
    /// Reader over a results directory
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
        }
    }

    /// Directory holding the results
    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Result files for a document, in name order
    fn result_files(&self, stem: &str) -> Result<Vec<PathBuf>, OcrError> {
        let json_prefix = format!("{}.json", stem);
        let mut files = Vec::new();

        for entry in fs::read_dir(&self.results_dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let name = match path.file_name() {
                Some(name) => name.to_string_lossy().into_owned(),
                None => continue,
            };
            if name.starts_with(&json_prefix) && name.ends_with(".json") {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }
}

impl TextExtractor for OcrResultReader {
    type Error = OcrError;

    fn extract_text(&self, document: &DocumentRef) -> Result<String, Self::Error> {
        let stem = document.stem();

        let transcript = self.results_dir.join(format!("{}.txt", stem));
        if transcript.is_file() {
            debug!("Using transcript {}", transcript.display());
            let text = fs::read_to_string(&transcript)?;
            if text.trim().is_empty() {
                return Err(OcrError::EmptyPayload(transcript.display().to_string()));
            }
            return Ok(text);
        }

        let files = self.result_files(&stem)?;
        if files.is_empty() {
            return Err(OcrError::ResultNotFound(document.id.clone()));
        }

        let mut full_text = String::new();
        for path in &files {
            let name = path.display().to_string();
            debug!("Processing result: {}", name);
            let content = fs::read(path)?;
            match text_from_output_json(&name, &content) {
                Ok(text) => full_text.push_str(&text),
                Err(e) => warn!("Skipping {}: {}", name, e),
            }
        }

        if full_text.trim().is_empty() {
            return Err(OcrError::EmptyPayload(document.id.clone()));
        }
        Ok(full_text)
    }
}

/// Load text from a single file
///
/// `.json` files are read as Vision OCR output; anything else is read as
/// plain UTF-8 text.
pub fn load_text(path: &Path) -> Result<String, OcrError> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let content = fs::read(path)?;
        text_from_output_json(&path.display().to_string(), &content)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}
