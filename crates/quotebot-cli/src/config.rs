//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use quotebot_extractor::ExtractorConfig;
use quotebot_ocr::vision::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS, MAX_PAGES_PER_REQUEST};
use quotebot_sheet::CellLayout;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input and output locations
    pub paths: PathsConfig,

    /// OCR service settings
    pub ocr: OcrConfig,

    /// Field extraction settings
    pub extractor: ExtractorConfig,

    /// Template cell coordinates
    pub layout: CellLayout,

    /// Global settings
    pub settings: Settings,
}

/// Input and output locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Folder holding the proposal PDFs
    pub input_dir: PathBuf,

    /// Folder of stored OCR output; OCR runs live when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_results_dir: Option<PathBuf>,

    /// Quotation template
    pub template: PathBuf,

    /// Folder for finished quotations
    pub output_dir: PathBuf,
}

/// OCR service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Vision API base URL
    pub endpoint: String,

    /// Vision API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Timeout for one OCR request
    pub timeout_secs: u64,

    /// 1-based pages of the first OCR request; later pages follow in windows
    pub pages: Vec<u32>,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".quotebot").join("config.toml"))
    }

    /// Resolve an explicit path or fall back to the default one.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. A missing default file yields the
    /// defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_path(explicit)?;

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config = Self::from_toml(&contents)?;
            tracing::debug!("Loaded configuration from {}", path.display());
            Ok(config)
        } else if explicit.is_some() {
            Err(CliError::Config(format!(
                "Configuration file {} does not exist",
                path.display()
            )))
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Check patterns, cell references and OCR limits.
    pub fn validate(&self) -> Result<()> {
        self.extractor.validate()?;
        self.layout.validate()?;

        if self.ocr.timeout_secs == 0 {
            return Err(CliError::Config("ocr.timeout_secs must be > 0".into()));
        }
        if self.ocr.pages.len() > MAX_PAGES_PER_REQUEST || self.ocr.pages.contains(&0) {
            return Err(CliError::Config(format!(
                "ocr.pages must hold at most {} page numbers starting at 1",
                MAX_PAGES_PER_REQUEST
            )));
        }
        Ok(())
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            ocr_results_dir: None,
            template: PathBuf::from("template.xlsx"),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            pages: (1..=MAX_PAGES_PER_REQUEST as u32).collect(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
