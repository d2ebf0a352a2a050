//! Collaborator request and response shapes.

use chrono::{NaiveDate, NaiveTime, SecondsFormat};
use serde::{Deserialize, Serialize};

use crate::error::CollaboratorError;
use crate::features::session::LogEntry;

/// One log entry as handed to the summarizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryInput {
    pub task_name: String,
    pub category: String,
    pub duration_in_seconds: u64,
}

impl From<&LogEntry> for SummaryInput {
    fn from(entry: &LogEntry) -> Self {
        Self {
            task_name: entry.task_name().to_string(),
            category: entry.category().to_string(),
            duration_in_seconds: entry.duration(),
        }
    }
}

/// One log entry as handed to the exporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportInput {
    pub task_name: String,
    pub category: String,
    pub duration_in_seconds: u64,
    /// ISO-8601 creation time, UTC.
    pub timestamp: String,
}

impl From<&LogEntry> for ExportInput {
    fn from(entry: &LogEntry) -> Self {
        Self {
            task_name: entry.task_name().to_string(),
            category: entry.category().to_string(),
            duration_in_seconds: entry.duration(),
            timestamp: entry
                .created_at()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Aggregate productivity report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub total_hours: u64,
    pub total_minutes: u64,
    pub top_category: String,
    pub summary: String,
}

impl Report {
    /// Check the report has the advertised shape.
    ///
    /// # Errors
    ///
    /// Returns `CollaboratorError::InvalidResponse` when minutes fall outside
    /// 0..=59 or a text field is blank.
    pub fn validate(&self) -> Result<(), CollaboratorError> {
        if self.total_minutes > 59 {
            return Err(CollaboratorError::InvalidResponse(format!(
                "totalMinutes out of range: {}",
                self.total_minutes
            )));
        }
        if self.top_category.trim().is_empty() {
            return Err(CollaboratorError::InvalidResponse(
                "topCategory is empty".to_string(),
            ));
        }
        if self.summary.trim().is_empty() {
            return Err(CollaboratorError::InvalidResponse(
                "summary is empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// One spreadsheet row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub task_name: String,
    pub category: String,
    pub duration_in_minutes: f64,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM:SS`
    pub time: String,
}

impl ExportRow {
    /// Check the row has the advertised shape.
    ///
    /// # Errors
    ///
    /// Returns `CollaboratorError::InvalidResponse` for a negative or
    /// non-finite duration, or a malformed date or time.
    pub fn validate(&self) -> Result<(), CollaboratorError> {
        if !self.duration_in_minutes.is_finite() || self.duration_in_minutes < 0.0 {
            return Err(CollaboratorError::InvalidResponse(format!(
                "durationInMinutes is not a valid duration: {}",
                self.duration_in_minutes
            )));
        }
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|e| {
            CollaboratorError::InvalidResponse(format!("bad date {:?}: {e}", self.date))
        })?;
        NaiveTime::parse_from_str(&self.time, "%H:%M:%S").map_err(|e| {
            CollaboratorError::InvalidResponse(format!("bad time {:?}: {e}", self.time))
        })?;
        Ok(())
    }
}

/// Convert seconds to minutes rounded to two decimals.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn seconds_to_minutes(seconds: u64) -> f64 {
    (seconds as f64 / 60.0 * 100.0).round() / 100.0
}
