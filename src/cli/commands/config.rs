//! Config command implementation.

use serde_json::json;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::FocuslogError;
use crate::output::{format_config, to_json};

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written, or if
/// `init` would overwrite an existing file without `force`.
pub fn config(
    paths: &Paths,
    cmd: ConfigCommands,
    format: OutputFormat,
) -> Result<String, FocuslogError> {
    let path = &paths.config_file;
    match cmd {
        ConfigCommands::Show => {
            let config = Config::load_from_path(path)?;
            format_config(&config, format)
        }
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                return Err(FocuslogError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            Config::default().save_to_path(path)?;
            tracing::info!(path = %path.display(), "wrote default config");
            match format {
                OutputFormat::Pretty => Ok(format!("Wrote default config to {}", path.display())),
                OutputFormat::Json => to_json(&json!({ "path": path })),
            }
        }
        ConfigCommands::Path => match format {
            OutputFormat::Pretty => Ok(path.display().to_string()),
            OutputFormat::Json => to_json(&json!({ "path": path })),
        },
    }
}
