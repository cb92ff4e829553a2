//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    explicit_path: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            print!("{}", redacted(config).to_toml()?);
        }
        ConfigAction::Path => {
            println!("{}", Config::resolve_path(explicit_path)?.display());
        }
        ConfigAction::Init { force } => {
            let path = Config::resolve_path(explicit_path)?;
            if path.exists() && !force {
                return Err(CliError::Config(format!(
                    "{} already exists; use --force to replace it",
                    path.display()
                )));
            }
            Config::default().save(&path)?;
            println!(
                "{}",
                formatter.success(&format!("Wrote default configuration to {}", path.display()))
            );
        }
    }
    Ok(())
}

/// Copy of the configuration with secrets masked.
fn redacted(config: &Config) -> Config {
    let mut shown = config.clone();
    if shown.ocr.api_key.is_some() {
        shown.ocr.api_key = Some("********".to_string());
    }
    shown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    #[test]
    fn test_api_key_masked() {
        let mut config = Config::default();
        config.ocr.api_key = Some("secret".to_string());
        assert_eq!(redacted(&config).ocr.api_key.as_deref(), Some("********"));
        assert_eq!(redacted(&Config::default()).ocr.api_key, None);
    }

    #[test]
    fn test_init_refuses_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let init = |force| ConfigArgs {
            action: ConfigAction::Init { force },
        };

        execute_config(init(false), &Config::default(), Some(path.as_path()), &formatter).unwrap();
        assert!(path.exists());

        let again = execute_config(init(false), &Config::default(), Some(path.as_path()), &formatter);
        assert!(matches!(again, Err(CliError::Config(_))));

        execute_config(init(true), &Config::default(), Some(path.as_path()), &formatter).unwrap();
        assert_eq!(Config::load(Some(path.as_path())).unwrap(), Config::default());
    }
}
