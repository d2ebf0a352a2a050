//! Error types for focuslog.

use std::fmt;

use thiserror::Error;

/// Action that reads the session log through a collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogAction {
    /// Narrative productivity report.
    Report,
    /// Spreadsheet export.
    Export,
}

impl LogAction {
    /// Verb phrase used in user-facing messages.
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::Report => "generate a report",
            Self::Export => "download",
        }
    }
}

impl fmt::Display for LogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Report => write!(f, "Report generation"),
            Self::Export => write!(f, "Export"),
        }
    }
}

/// Required freeform fields missing at stop time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Task Name and Category are required to log an entry.")]
pub struct ValidationError {
    /// Task name was empty after trimming.
    pub missing_task_name: bool,
    /// Category was empty after trimming.
    pub missing_category: bool,
}

impl ValidationError {
    /// Check the freeform inputs, returning the error if any is blank.
    #[must_use]
    pub fn check(task_name: &str, category: &str) -> Option<Self> {
        let missing_task_name = task_name.trim().is_empty();
        let missing_category = category.trim().is_empty();
        (missing_task_name || missing_category).then_some(Self {
            missing_task_name,
            missing_category,
        })
    }
}

/// Failure of a report/export collaborator.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// No API key was available for a remote backend.
    #[error("missing API key: set the {0} environment variable")]
    MissingApiKey(String),
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Remote service answered with an error.
    #[error("API error: {0}")]
    Api(String),
    /// Response did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// The background task running the call died.
    #[error("task failed: {0}")]
    Task(String),
}

/// Main error type for focuslog operations.
#[derive(Debug, Error)]
pub enum FocuslogError {
    /// Freeform stop without the required fields.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Report or export requested on an empty log.
    #[error("There are no tasks logged to {}.", .0.verb())]
    EmptyLog(LogAction),

    /// A call for the same action is still outstanding.
    #[error("{0} is already in progress.")]
    InFlight(LogAction),

    /// Report or export collaborator failed.
    #[error("{}", collaborator_message(.action))]
    Collaborator {
        /// Which action failed.
        action: LogAction,
        /// Underlying cause, kept for logs.
        #[source]
        source: CollaboratorError,
    },

    /// Configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal setup or drawing failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// CSV writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

const fn collaborator_message(action: &LogAction) -> &'static str {
    match action {
        LogAction::Report => {
            "Failed to generate report. Please check your API key and try again."
        }
        LogAction::Export => "Failed to generate spreadsheet data. Please try again.",
    }
}

impl FocuslogError {
    /// Wrap a collaborator failure for `action`.
    #[must_use]
    pub const fn collaborator(action: LogAction, source: CollaboratorError) -> Self {
        Self::Collaborator { action, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_check() {
        assert!(ValidationError::check("Draft chapter", "Docs").is_none());

        let err = ValidationError::check("  ", "Docs").unwrap();
        assert!(err.missing_task_name);
        assert!(!err.missing_category);

        let err = ValidationError::check("Draft chapter", "").unwrap();
        assert!(!err.missing_task_name);
        assert!(err.missing_category);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            FocuslogError::EmptyLog(LogAction::Report).to_string(),
            "There are no tasks logged to generate a report."
        );
        assert_eq!(
            FocuslogError::EmptyLog(LogAction::Export).to_string(),
            "There are no tasks logged to download."
        );
        assert_eq!(
            FocuslogError::InFlight(LogAction::Export).to_string(),
            "Export is already in progress."
        );
        let err = FocuslogError::collaborator(
            LogAction::Report,
            CollaboratorError::InvalidResponse("bad".to_string()),
        );
        assert!(err.to_string().starts_with("Failed to generate report"));
    }
}
