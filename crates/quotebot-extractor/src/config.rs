//! Configuration for the Extractor

use crate::error::ExtractorError;
use crate::patterns::CompiledPatterns;
use serde::{Deserialize, Serialize};

/// Regular expressions anchored on the proposal form's label text
///
/// The defaults match the current proposal form layout exactly. Matching is
/// case sensitive; multi-line behavior is whatever the pattern asks for
/// (`(?s)` where a span must cross line breaks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Proposer label followed by the firm name on the next line
    pub insured_name: String,

    /// Section listing partner positions; group 1 is searched for the keyword
    pub partner_section: String,

    /// Role keyword counted inside the partner section
    pub partner_keyword: String,

    /// Staff count label followed by the count on the next line
    pub qualified_assistants: String,

    /// Indemnity label and amount (thousands separators allowed)
    pub indemnity: String,

    /// Excess label and amount (thousands separators allowed)
    pub excess: String,

    /// Business activity question followed by the upper-case answer
    pub profession: String,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            insured_name: r"Full title of Proposer[^:]*?\n([A-Za-z\s]+LLP)".to_string(),
            partner_section: r"(?s)PATRICK MMRIGI\nPosition(.+?)Qualifications".to_string(),
            partner_keyword: r"\bPARTNER\b".to_string(),
            qualified_assistants: r"Number of staff[^:]*?\n(\d+)\n".to_string(),
            indemnity: r"Indemnity:\s?KSHs?,?\s?([\d,]+)".to_string(),
            excess: r"Excess:\s?KSHS\.\s?([\d,]+)".to_string(),
            profession: concat!(
                r"give a detailed description of the activities of the business to be covered\.\n",
                r"([A-Z\s]+)\s"
            )
            .to_string(),
        }
    }
}

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Field patterns
    pub patterns: PatternConfig,
}

impl ExtractorConfig {
    /// Validate the configuration
    ///
    /// Checks limits and that every pattern compiles with the capture groups
    /// it needs.
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.max_text_length == 0 {
            return Err(ExtractorError::Config(
                "max_text_length must be greater than 0".to_string(),
            ));
        }
        CompiledPatterns::compile(&self.patterns).map(|_| ())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        toml::from_str(toml_str)
            .map_err(|e| ExtractorError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_text_length: 2_000_000,
            patterns: PatternConfig::default(),
        }
    }
}
