//! Output formatting for focuslog.
//!
//! This module provides formatters for displaying sessions, reports and
//! configuration in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::FocuslogError;
use crate::features::report::Report;
use crate::features::session::LogEntry;

pub use json::*;
pub use pretty::*;

/// Format the session log based on output format
///
/// # Errors
///
/// Returns `FocuslogError::Json` if JSON serialization fails.
pub fn format_entries(entries: &[LogEntry], format: OutputFormat) -> Result<String, FocuslogError> {
    match format {
        OutputFormat::Pretty => Ok(format_entries_pretty(entries)),
        OutputFormat::Json => format_entries_json(entries),
    }
}

/// Format a report based on output format
///
/// # Errors
///
/// Returns `FocuslogError::Json` if JSON serialization fails.
pub fn format_report(report: &Report, format: OutputFormat) -> Result<String, FocuslogError> {
    match format {
        OutputFormat::Pretty => Ok(format_report_pretty(report)),
        OutputFormat::Json => to_json(report),
    }
}

/// Format the configuration based on output format
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn format_config(config: &Config, format: OutputFormat) -> Result<String, FocuslogError> {
    match format {
        OutputFormat::Pretty => format_config_pretty(config),
        OutputFormat::Json => to_json(config),
    }
}
