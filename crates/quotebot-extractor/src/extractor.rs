//! Core field extraction

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::patterns::{first_capture, CompiledPatterns};
use once_cell::sync::Lazy;
use quotebot_domain::{display_field, ExtractedRecord};
use tracing::{debug, info, warn};

static STANDARD: Lazy<FieldExtractor> = Lazy::new(|| {
    FieldExtractor::new(ExtractorConfig::default()).expect("default patterns compile")
});

/// Extract fields from text with the standard proposal-form patterns
///
/// Never fails: fields that are not found are `None`.
pub fn extract(text: &str) -> ExtractedRecord {
    STANDARD.extract(text)
}

/// Applies the pattern battery to OCR text
///
/// Each field is searched independently over the full text and the first
/// match wins. Extraction has no state, so the same text always yields the
/// same record.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    patterns: CompiledPatterns,
    config: ExtractorConfig,
}

impl FieldExtractor {
    /// Create an extractor, compiling the configured patterns
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate()?;
        let patterns = CompiledPatterns::compile(&config.patterns)?;
        Ok(Self { patterns, config })
    }

    /// Extractor with the standard patterns
    pub fn standard() -> Self {
        STANDARD.clone()
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract a record, rejecting blank or oversized text first
    pub fn extract_checked(&self, text: &str) -> Result<ExtractedRecord, ExtractorError> {
        if text.trim().is_empty() {
            return Err(ExtractorError::EmptyText);
        }
        let length = text.chars().count();
        if length > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(length, self.config.max_text_length));
        }
        Ok(self.extract(text))
    }

    /// Extract a record; absent fields are `None`
    pub fn extract(&self, text: &str) -> ExtractedRecord {
        let record = ExtractedRecord {
            insured_name: self.insured_name(text),
            partner_count: self.partner_count(text),
            qualified_assistants: self.qualified_assistants(text),
            indemnity_amount: self.amount("indemnity", &self.patterns.indemnity, text),
            excess_amount: self.amount("excess", &self.patterns.excess, text),
            profession: self.profession(text),
        };

        debug!("Name of Insured: {}", record.insured_name_or_not_found());
        debug!("Number of Directors/Partners: {}", record.partner_count);
        debug!("Qualified Assistants: {}", display_field(&record.qualified_assistants));
        debug!("Indemnity: {}", display_field(&record.indemnity_amount));
        debug!("Excess: {}", display_field(&record.excess_amount));
        debug!("Profession: {}", record.profession_or_not_found());

        let missing = record.missing_fields();
        if missing.is_empty() {
            info!("Extracted all fields from {} chars of text", text.len());
        } else {
            info!(
                "Extracted fields from {} chars of text; not found: {}",
                text.len(),
                missing.join(", ")
            );
        }

        record
    }

    fn insured_name(&self, text: &str) -> Option<String> {
        first_capture(&self.patterns.insured_name, text).map(str::to_string)
    }

    fn partner_count(&self, text: &str) -> u32 {
        match first_capture(&self.patterns.partner_section, text) {
            Some(section) => {
                let count = self.patterns.partner_keyword.find_iter(section).count();
                u32::try_from(count).unwrap_or(u32::MAX)
            }
            None => {
                debug!("Partner section not found, counting 0 partners");
                0
            }
        }
    }

    fn qualified_assistants(&self, text: &str) -> Option<u32> {
        let digits = first_capture(&self.patterns.qualified_assistants, text)?;
        match digits.parse::<u32>() {
            Ok(count) => Some(count),
            Err(e) => {
                warn!("Ignoring qualified assistants value '{}': {}", digits, e);
                None
            }
        }
    }

    fn amount(&self, field: &str, regex: &regex::Regex, text: &str) -> Option<u64> {
        let raw = first_capture(regex, text)?;
        let digits: String = raw.chars().filter(|c| *c != ',').collect();
        match digits.parse::<u64>() {
            Ok(amount) => Some(amount),
            Err(e) => {
                warn!("Ignoring {} value '{}': {}", field, raw, e);
                None
            }
        }
    }

    fn profession(&self, text: &str) -> Option<String> {
        let raw = first_capture(&self.patterns.profession, text)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            warn!("Profession answer is blank");
            return None;
        }
        Some(trimmed.to_string())
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::standard()
    }
}
