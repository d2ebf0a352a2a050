//! In-process summarizer and exporter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::types::{seconds_to_minutes, ExportInput, ExportRow, Report, SummaryInput};
use super::{Exporter, Summarizer};
use crate::error::CollaboratorError;
use crate::features::timer::format_duration;

/// Sessions shorter than this in total get the "keep going" remark.
const WARM_UP_SECONDS: u64 = 25 * 60;

/// Deterministic collaborator computing reports and rows locally.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalCollaborator;

impl LocalCollaborator {
    /// Build a report from the sessions.
    ///
    /// # Errors
    ///
    /// Returns `CollaboratorError::InvalidResponse` when `tasks` is empty.
    pub fn build_report(tasks: &[SummaryInput]) -> Result<Report, CollaboratorError> {
        let top_category = top_category(tasks).ok_or_else(|| {
            CollaboratorError::InvalidResponse("no sessions to summarize".to_string())
        })?;
        let total: u64 = tasks.iter().map(|t| t.duration_in_seconds).sum();

        let summary = if total < WARM_UP_SECONDS {
            format!(
                "Every minute counts: {} logged so far, mostly on {top_category}. Keep building momentum!",
                format_duration(total)
            )
        } else {
            format!(
                "Great focus! You put in {} across {} session{}, with {top_category} leading the way.",
                format_duration(total),
                tasks.len(),
                if tasks.len() == 1 { "" } else { "s" }
            )
        };

        Ok(Report {
            total_hours: total / 3600,
            total_minutes: (total % 3600) / 60,
            top_category,
            summary,
        })
    }

    /// Build spreadsheet rows from the sessions.
    ///
    /// # Errors
    ///
    /// Returns `CollaboratorError::InvalidResponse` for a timestamp that is
    /// not RFC 3339.
    pub fn build_rows(tasks: &[ExportInput]) -> Result<Vec<ExportRow>, CollaboratorError> {
        tasks
            .iter()
            .map(|task| {
                let at = DateTime::parse_from_rfc3339(&task.timestamp)
                    .map_err(|e| {
                        CollaboratorError::InvalidResponse(format!(
                            "bad timestamp {:?}: {e}",
                            task.timestamp
                        ))
                    })?
                    .with_timezone(&Utc);

                Ok(ExportRow {
                    task_name: task.task_name.clone(),
                    category: task.category.clone(),
                    duration_in_minutes: seconds_to_minutes(task.duration_in_seconds),
                    date: at.format("%Y-%m-%d").to_string(),
                    time: at.format("%H:%M:%S").to_string(),
                })
            })
            .collect()
    }
}

/// Category with the most time. Ties go to the one seen first.
fn top_category(tasks: &[SummaryInput]) -> Option<String> {
    let mut totals: Vec<(&str, u64)> = Vec::new();
    for task in tasks {
        match totals.iter_mut().find(|(name, _)| *name == task.category) {
            Some((_, seconds)) => *seconds += task.duration_in_seconds,
            None => totals.push((task.category.as_str(), task.duration_in_seconds)),
        }
    }

    let mut best: Option<(&str, u64)> = None;
    for (name, seconds) in totals {
        if best.map_or(true, |(_, top)| seconds > top) {
            best = Some((name, seconds));
        }
    }
    best.map(|(name, _)| name.to_string())
}

#[async_trait]
impl Summarizer for LocalCollaborator {
    async fn summarize(&self, tasks: Vec<SummaryInput>) -> Result<Report, CollaboratorError> {
        Self::build_report(&tasks)
    }
}

#[async_trait]
impl Exporter for LocalCollaborator {
    async fn export(&self, tasks: Vec<ExportInput>) -> Result<Vec<ExportRow>, CollaboratorError> {
        Self::build_rows(&tasks)
    }
}
