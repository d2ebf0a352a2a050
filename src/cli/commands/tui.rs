//! Interactive tracker command.

use crate::cli::args::{OutputFormat, TuiArgs};
use crate::config::{Config, Paths};
use crate::error::FocuslogError;
use crate::features::report::Collaborators;
use crate::features::session::SessionOrchestrator;
use crate::features::timer::{parse_duration, Durations};
use crate::output::{format_entries, format_report};

/// Resolve countdown lengths from config and command-line overrides.
///
/// # Errors
///
/// Returns an error if an override is not a valid positive duration.
pub fn resolve_durations(config: &Config, args: &TuiArgs) -> Result<Durations, FocuslogError> {
    let mut durations = Durations::from(config.timer);
    if let Some(focus) = &args.focus {
        durations.focus_seconds = parse_override("focus", focus)?;
    }
    if let Some(length) = &args.break_length {
        durations.break_seconds = parse_override("break", length)?;
    }
    Ok(durations)
}

fn parse_override(name: &str, value: &str) -> Result<u64, FocuslogError> {
    parse_duration(value).ok_or_else(|| {
        FocuslogError::Config(format!(
            "Invalid {name} duration: {value}. Use e.g. 25m, 1h30m, 90s or plain minutes"
        ))
    })
}

/// Run the interactive tracker, then print what was logged.
///
/// # Errors
///
/// Returns an error if the config is invalid, the collaborator backend
/// cannot be built, or the terminal fails.
pub fn tui(
    paths: &Paths,
    config: &Config,
    args: &TuiArgs,
    format: OutputFormat,
) -> Result<String, FocuslogError> {
    let durations = resolve_durations(config, args)?;
    let collaborators = Collaborators::from_config(&config.collaborator).map_err(|e| {
        FocuslogError::Config(format!("Failed to set up {:?} backend: {e}", config.collaborator.backend))
    })?;
    let orchestrator = SessionOrchestrator::new(durations, config.labels.clone());

    let summary = crate::tui::run(
        orchestrator,
        collaborators,
        config.export.target(paths),
        args.pomodoro,
    )?;

    if summary.entries.is_empty() {
        return Ok(String::new());
    }
    let mut output = format_entries(&summary.entries, format)?;
    if let (Some(report), OutputFormat::Pretty) = (&summary.report, format) {
        output.push_str("\n\n");
        output.push_str(&format_report(report, format)?);
    }
    Ok(output)
}
