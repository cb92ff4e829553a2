//! Quote command implementation.

use crate::cli::QuoteArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use quotebot_domain::{compute, ExtractedRecord};

/// Build the record a quote is computed from.
pub fn record_from_args(args: QuoteArgs) -> ExtractedRecord {
    ExtractedRecord {
        insured_name: args.name,
        partner_count: args.partners,
        qualified_assistants: args.qualified_assistants,
        indemnity_amount: Some(args.indemnity),
        excess_amount: None,
        profession: args.profession.filter(|p| !p.trim().is_empty()),
    }
}

/// Execute the quote command.
pub fn execute_quote(args: QuoteArgs, formatter: &Formatter) -> Result<()> {
    let record = record_from_args(args);
    let workbook = compute(&record).map_err(|e| CliError::MissingField {
        document: "command line".to_string(),
        field: e.field,
    })?;

    println!("{}", formatter.format_workbook(&workbook)?);
    Ok(())
}
