//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// quotebot - Quote professional indemnity cover from scanned proposals.
#[derive(Debug, Parser)]
#[command(name = "quotebot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (totals only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Quote every proposal in the input folder
    Run(RunArgs),

    /// Extract fields from a text or Vision JSON file
    Extract(ExtractArgs),

    /// Compute a quotation from explicit values
    Quote(QuoteArgs),

    /// Print the rate tables
    Rates,

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// Folder holding the proposal PDFs
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Read stored OCR output from this folder instead of calling the service
    #[arg(long)]
    pub ocr_results: Option<PathBuf>,

    /// Quotation template (.xlsx)
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Folder for finished quotations
    #[arg(short = 'd', long)]
    pub output_dir: Option<PathBuf>,

    /// Output file (combined mode only)
    #[arg(short, long, requires = "combined")]
    pub output: Option<PathBuf>,

    /// Concatenate every document into a single quotation
    #[arg(long)]
    pub combined: bool,

    /// Output kind
    #[arg(long, value_enum, default_value = "xlsx")]
    pub sink: SinkArg,

    /// Vision API key
    #[arg(long, env = "QUOTEBOT_VISION_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Text transcript or Vision OCR output (.json)
    pub file: PathBuf,
}

/// Arguments for the quote command.
#[derive(Debug, Parser)]
pub struct QuoteArgs {
    /// Indemnity limit
    #[arg(short, long)]
    pub indemnity: u64,

    /// Number of partners
    #[arg(short, long, default_value = "0")]
    pub partners: u32,

    /// Number of qualified assistants
    #[arg(short = 'a', long)]
    pub qualified_assistants: Option<u32>,

    /// Profession, matched exactly against the fee table
    #[arg(long)]
    pub profession: Option<String>,

    /// Insured name
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

/// Output sink argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SinkArg {
    /// Fill a copy of the spreadsheet template
    Xlsx,
    /// Write cells as a JSON object
    Json,
}

impl SinkArg {
    /// File extension for outputs of this kind
    pub fn extension(&self) -> &'static str {
        match self {
            SinkArg::Xlsx => "xlsx",
            SinkArg::Json => "json",
        }
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
