//! Run command implementation.

use crate::cli::{RunArgs, SinkArg};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::pipeline::{OutputPlan, Pipeline, RunMode, RunSummary};
use quotebot_domain::traits::{DocumentSource, TextExtractor};
use quotebot_extractor::FieldExtractor;
use quotebot_ocr::{DirectorySource, OcrResultReader, VisionProvider};
use quotebot_sheet::{JsonSink, XlsxTemplateSink};
use std::fmt::Display;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Execute the run command.
pub fn execute_run(args: RunArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let input = args.input.unwrap_or_else(|| config.paths.input_dir.clone());
    let template = args.template.unwrap_or_else(|| config.paths.template.clone());
    let ocr_results = args.ocr_results.or_else(|| config.paths.ocr_results_dir.clone());

    if !input.is_dir() {
        return Err(CliError::InvalidInput(format!(
            "Input folder {} does not exist",
            input.display()
        )));
    }

    let plan = OutputPlan {
        output_dir: args.output_dir.unwrap_or_else(|| config.paths.output_dir.clone()),
        extension: args.sink.extension(),
        combined_output: args.output,
    };
    let mode = if args.combined {
        RunMode::Combined
    } else {
        RunMode::PerDocument
    };

    let source = DirectorySource::new(&input);
    let fields = FieldExtractor::new(config.extractor.clone())?;

    let summary = match ocr_results {
        Some(dir) => {
            info!("Reading stored OCR output from {}", dir.display());
            let reader = OcrResultReader::new(dir);
            run_with(&source, &reader, &fields, config, mode, &plan, args.sink, &template)?
        }
        None => {
            let api_key = args
                .api_key
                .or_else(|| config.ocr.api_key.clone())
                .ok_or_else(|| {
                    CliError::Config(
                        "No Vision API key. Set QUOTEBOT_VISION_API_KEY or ocr.api_key, \
                         or pass --ocr-results"
                            .to_string(),
                    )
                })?;
            let provider = VisionProvider::new(
                config.ocr.endpoint.as_str(),
                api_key,
                Duration::from_secs(config.ocr.timeout_secs),
            )?
            .with_pages(config.ocr.pages.clone())?;
            run_with(&source, &provider, &fields, config, mode, &plan, args.sink, &template)?
        }
    };

    println!("{}", formatter.format_summary(&summary)?);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_with<S, T>(
    source: &S,
    extractor: &T,
    fields: &FieldExtractor,
    config: &Config,
    mode: RunMode,
    plan: &OutputPlan,
    sink: SinkArg,
    template: &Path,
) -> Result<RunSummary>
where
    S: DocumentSource,
    S::Error: Display,
    T: TextExtractor,
    T::Error: Display,
{
    let pipeline = Pipeline::new(source, extractor, fields, &config.layout);

    match sink {
        SinkArg::Xlsx => pipeline.run(mode, plan, || Ok(XlsxTemplateSink::open(template)?)),
        SinkArg::Json => pipeline.run(mode, plan, || Ok(JsonSink::new())),
    }
}
