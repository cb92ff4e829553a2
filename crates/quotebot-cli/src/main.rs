//! quotebot CLI - Quote professional indemnity cover from scanned proposals.

use clap::Parser;
use quotebot_cli::commands;
use quotebot_cli::{Cli, Command, Config, Formatter};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the flag-derived level.
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run() -> quotebot_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config_path = cli.config.as_deref();

    // A broken file must not block `config init --force`
    let config = match &cli.command {
        Command::Config(_) => Config::load(config_path).unwrap_or_else(|e| {
            warn!("Ignoring configuration: {}", e);
            Config::default()
        }),
        _ => Config::load(config_path)?,
    };

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Run(args) => commands::execute_run(args, &config, &formatter)?,
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter)?,
        Command::Quote(args) => commands::execute_quote(args, &formatter)?,
        Command::Rates => commands::execute_rates(&formatter)?,
        Command::Config(args) => {
            commands::execute_config(args, &config, config_path, &formatter)?
        }
    }

    Ok(())
}
