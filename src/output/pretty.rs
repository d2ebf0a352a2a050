use colored::Colorize;

use crate::config::Config;
use crate::error::FocuslogError;
use crate::features::report::Report;
use crate::features::session::LogEntry;
use crate::features::timer::{format_clock, format_duration};

/// Format the session log as a pretty table
pub fn format_entries_pretty(entries: &[LogEntry]) -> String {
    if entries.is_empty() {
        return "Task Log (0 entries)\n  No tasks logged yet".to_string();
    }

    let mut output = format!("Task Log ({} entries)\n", entries.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for entry in entries {
        let time = entry.created_at_local().format("%H:%M");
        output.push_str(&format!(
            "{}  {}  {}  {}\n",
            time.to_string().dimmed(),
            format_clock(entry.duration()).yellow(),
            entry.task_name().bold(),
            entry.category().cyan()
        ));
    }

    let total: u64 = entries.iter().map(LogEntry::duration).sum();
    output.push_str(&"─".repeat(60));
    output.push('\n');
    output.push_str(&format!("{}: {}", "Total".dimmed(), format_duration(total)));

    output
}

/// Format a productivity report
pub fn format_report_pretty(report: &Report) -> String {
    let mut output = format!("{}\n", "Productivity Report".bold());
    output.push_str(&"─".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  {}: {}h {}m\n",
        "Total Time".dimmed(),
        report.total_hours,
        report.total_minutes
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Top Category".dimmed(),
        report.top_category.cyan()
    ));
    output.push_str(&format!("  {}", report.summary.italic()));
    output
}

/// Format the configuration as YAML
///
/// # Errors
///
/// Returns `FocuslogError::Yaml` if serialization fails.
pub fn format_config_pretty(config: &Config) -> Result<String, FocuslogError> {
    let yaml = serde_yaml::to_string(config)?;
    Ok(yaml.trim_end().to_string())
}
