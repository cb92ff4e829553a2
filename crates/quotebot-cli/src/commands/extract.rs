//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use quotebot_extractor::FieldExtractor;
use quotebot_ocr::load_text;

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let text = load_text(&args.file)?;
    let fields = FieldExtractor::new(config.extractor.clone())?;
    let record = fields.extract_checked(&text)?;

    println!("{}", formatter.format_record(&record)?);
    Ok(())
}
