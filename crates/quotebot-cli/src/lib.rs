//! quotebot CLI library.
//!
//! Configuration, the quotation pipeline, command execution and output
//! formatting for the `quotebot` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use pipeline::{Pipeline, RunMode, RunSummary};
