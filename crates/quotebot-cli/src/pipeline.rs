//! Quotation pipeline
//!
//! Lists documents, obtains their text, extracts fields, computes the
//! premium workbook and writes it out, one document at a time. Documents
//! whose text cannot be obtained are skipped. A document lacking a required
//! field, or any output failure, stops the run.

use crate::error::{CliError, Result};
use quotebot_domain::traits::{CellSink, DocumentSource, TextExtractor};
use quotebot_domain::{compute, DocumentRef, ExtractedRecord};
use quotebot_extractor::FieldExtractor;
use quotebot_sheet::{write_quote, CellLayout};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::Display;
use std::path::PathBuf;
use tracing::{info, warn};

/// Id given to the single quotation of a combined run
pub const COMBINED_ID: &str = "combined";

/// How documents map to quotations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// One quotation per document
    PerDocument,
    /// One quotation from the text of every document
    Combined,
}

/// Where quotations are written
#[derive(Debug, Clone)]
pub struct OutputPlan {
    /// Folder for outputs named after their document
    pub output_dir: PathBuf,
    /// Extension of output files
    pub extension: &'static str,
    /// Explicit path for the combined quotation
    pub combined_output: Option<PathBuf>,
}

impl OutputPlan {
    fn path_for(&self, stem: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{}", stem, self.extension))
    }

    /// Output path for a document not already claimed in this run
    ///
    /// Named after the stem, or after the full file name when another
    /// document already took the stem. Paths compare without case.
    fn claim_path(&self, document: &DocumentRef, claimed: &mut HashSet<String>) -> Option<PathBuf> {
        [document.stem(), document.id.clone()]
            .into_iter()
            .map(|name| self.path_for(&name))
            .find(|path| claimed.insert(path.to_string_lossy().to_lowercase()))
    }

    fn combined_path(&self) -> PathBuf {
        self.combined_output
            .clone()
            .unwrap_or_else(|| self.path_for(COMBINED_ID))
    }
}

/// A document that produced a quotation
#[derive(Debug, Clone, Serialize)]
pub struct QuotedDocument {
    /// Document id, or `combined`
    pub id: String,
    /// Saved output
    pub output: PathBuf,
    /// Extracted fields
    pub record: ExtractedRecord,
    /// Grand total of the quotation
    pub grand_total: Decimal,
}

/// A document left out of the run
#[derive(Debug, Clone, Serialize)]
pub struct SkippedDocument {
    /// Document id
    pub id: String,
    /// Why it was skipped
    pub reason: String,
}

/// Outcome of a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Quotations written
    pub quoted: Vec<QuotedDocument>,
    /// Documents skipped
    pub skipped: Vec<SkippedDocument>,
}

impl RunSummary {
    fn skip(&mut self, id: impl Into<String>, reason: impl Into<String>) {
        let (id, reason) = (id.into(), reason.into());
        warn!("Skipping {}: {}", id, reason);
        self.skipped.push(SkippedDocument { id, reason });
    }
}

/// Sequences the collaborators of a run
pub struct Pipeline<'a, S, T> {
    source: &'a S,
    extractor: &'a T,
    fields: &'a FieldExtractor,
    layout: &'a CellLayout,
}

impl<'a, S, T> Pipeline<'a, S, T>
where
    S: DocumentSource,
    S::Error: Display,
    T: TextExtractor,
    T::Error: Display,
{
    /// Create a pipeline
    pub fn new(
        source: &'a S,
        extractor: &'a T,
        fields: &'a FieldExtractor,
        layout: &'a CellLayout,
    ) -> Self {
        Self {
            source,
            extractor,
            fields,
            layout,
        }
    }

    /// Run over every listed document
    ///
    /// `open_sink` is called once per quotation to get a fresh sink.
    ///
    /// # Errors
    ///
    /// Returns error if the documents cannot be listed, a quoted text lacks
    /// the indemnity amount, or a sink fails.
    pub fn run<K, F>(&self, mode: RunMode, plan: &OutputPlan, mut open_sink: F) -> Result<RunSummary>
    where
        K: CellSink,
        CliError: From<K::Error>,
        F: FnMut() -> Result<K>,
    {
        let documents = self
            .source
            .list_documents()
            .map_err(|e| CliError::Input(e.to_string()))?;
        info!("Found {} document(s)", documents.len());

        let mut summary = RunSummary::default();

        match mode {
            RunMode::PerDocument => {
                let mut claimed = HashSet::new();
                for document in &documents {
                    let Some(text) = self.text_of(document, &mut summary) else {
                        continue;
                    };
                    let Some(output) = plan.claim_path(document, &mut claimed) else {
                        summary.skip(&document.id, "output file name already used in this run");
                        continue;
                    };
                    let quoted =
                        self.quote_text(&document.id, &text, output, &mut summary, &mut open_sink)?;
                    summary.quoted.extend(quoted);
                }
            }
            RunMode::Combined => {
                let mut combined = String::new();
                for document in &documents {
                    if let Some(text) = self.text_of(document, &mut summary) {
                        combined.push_str(&text);
                    }
                }
                if !documents.is_empty() {
                    let quoted = self.quote_text(
                        COMBINED_ID,
                        &combined,
                        plan.combined_path(),
                        &mut summary,
                        &mut open_sink,
                    )?;
                    summary.quoted.extend(quoted);
                }
            }
        }

        info!(
            "Run complete: {} quoted, {} skipped",
            summary.quoted.len(),
            summary.skipped.len()
        );
        Ok(summary)
    }

    fn text_of(&self, document: &DocumentRef, summary: &mut RunSummary) -> Option<String> {
        info!("Processing {}", document.id);
        match self.extractor.extract_text(document) {
            Ok(text) if text.trim().is_empty() => {
                summary.skip(&document.id, "no text extracted");
                None
            }
            Ok(text) => Some(text),
            Err(e) => {
                summary.skip(&document.id, e.to_string());
                None
            }
        }
    }

    fn quote_text<K, F>(
        &self,
        id: &str,
        text: &str,
        output: PathBuf,
        summary: &mut RunSummary,
        open_sink: &mut F,
    ) -> Result<Option<QuotedDocument>>
    where
        K: CellSink,
        CliError: From<K::Error>,
        F: FnMut() -> Result<K>,
    {
        let record = match self.fields.extract_checked(text) {
            Ok(record) => record,
            Err(e) => {
                summary.skip(id, e.to_string());
                return Ok(None);
            }
        };

        let workbook = compute(&record).map_err(|e| CliError::MissingField {
            document: id.to_string(),
            field: e.field,
        })?;

        let mut sink = open_sink()?;
        write_quote(&mut sink, &record, &workbook, self.layout)?;
        sink.persist(&output)?;

        info!("Quoted {} -> {}", id, output.display());
        Ok(Some(QuotedDocument {
            id: id.to_string(),
            output,
            record,
            grand_total: workbook.grand_total.normalize(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotebot_ocr::MockExtractor;
    use quotebot_sheet::JsonSink;
    use std::convert::Infallible;

    struct FixedSource(Vec<&'static str>);

    impl DocumentSource for FixedSource {
        type Error = Infallible;

        fn list_documents(&self) -> std::result::Result<Vec<DocumentRef>, Self::Error> {
            Ok(self.0.iter().map(|p| DocumentRef::from_path(*p)).collect())
        }
    }

    const TEXT: &str = "Indemnity: KSH 1,000,000\n";

    fn plan(dir: &std::path::Path) -> OutputPlan {
        OutputPlan {
            output_dir: dir.to_path_buf(),
            extension: "json",
            combined_output: None,
        }
    }

    #[test]
    fn test_output_paths() {
        let plan = plan(std::path::Path::new("out"));
        assert_eq!(plan.path_for("a"), PathBuf::from("out/a.json"));
        assert_eq!(plan.combined_path(), PathBuf::from("out/combined.json"));
    }

    #[test]
    fn test_claimed_paths_fall_back_to_file_name() {
        let plan = plan(std::path::Path::new("out"));
        let mut claimed = HashSet::new();

        let first = plan.claim_path(&DocumentRef::from_path("a.pdf"), &mut claimed);
        let second = plan.claim_path(&DocumentRef::from_path("A.PDF"), &mut claimed);
        let third = plan.claim_path(&DocumentRef::from_path("in/a.pdf"), &mut claimed);

        assert_eq!(first, Some(PathBuf::from("out/a.json")));
        assert_eq!(second, Some(PathBuf::from("out/A.PDF.json")));
        assert_eq!(third, None);
    }

    #[test]
    fn test_blank_text_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let source = FixedSource(vec!["a.pdf", "b.pdf"]);
        let extractor = MockExtractor::new(TEXT).with_response("a.pdf", "  \n");
        let fields = FieldExtractor::standard();
        let layout = CellLayout::default();

        let summary = Pipeline::new(&source, &extractor, &fields, &layout)
            .run(RunMode::PerDocument, &plan(dir.path()), || Ok(JsonSink::new()))
            .unwrap();

        assert_eq!(summary.quoted.len(), 1);
        assert_eq!(summary.quoted[0].id, "b.pdf");
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].id, "a.pdf");
    }

    #[test]
    fn test_missing_indemnity_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let source = FixedSource(vec!["a.pdf"]);
        let extractor = MockExtractor::new("Name of Proposer: X LLP\n");
        let fields = FieldExtractor::standard();
        let layout = CellLayout::default();

        let result = Pipeline::new(&source, &extractor, &fields, &layout).run(
            RunMode::PerDocument,
            &plan(dir.path()),
            || Ok(JsonSink::new()),
        );

        match result {
            Err(CliError::MissingField { document, field }) => {
                assert_eq!(document, "a.pdf");
                assert_eq!(field, "indemnity_amount");
            }
            other => panic!("Expected MissingField, got {:?}", other.map(|s| s.quoted.len())),
        }
    }

    #[test]
    fn test_combined_with_no_documents() {
        let dir = tempfile::tempdir().unwrap();
        let source = FixedSource(Vec::new());
        let extractor = MockExtractor::new(TEXT);
        let fields = FieldExtractor::standard();
        let layout = CellLayout::default();

        let summary = Pipeline::new(&source, &extractor, &fields, &layout)
            .run(RunMode::Combined, &plan(dir.path()), || Ok(JsonSink::new()))
            .unwrap();

        assert!(summary.quoted.is_empty());
        assert_eq!(extractor.call_count(), 0);
    }
}
