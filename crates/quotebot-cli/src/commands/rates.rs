//! Rates command implementation.

use crate::error::Result;
use crate::output::Formatter;

/// Execute the rates command.
pub fn execute_rates(formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_rates()?);
    Ok(())
}
