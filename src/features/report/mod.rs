//! Report and export collaborators.
//!
//! The session log is handed to two best-effort services:
//! - a summarizer producing totals, top category and a short remark
//! - an exporter producing one spreadsheet row per entry
//!
//! Both are asynchronous and may fail or answer with malformed data. Results
//! are validated by the session orchestrator before use.

mod gemini;
mod local;
mod spreadsheet;
mod types;

use std::sync::Arc;

use async_trait::async_trait;

pub use gemini::{GeminiCollaborator, GEMINI_API_URL};
pub use local::LocalCollaborator;
pub use spreadsheet::{save_csv, to_csv_string, write_csv, HEADERS};
pub use types::{seconds_to_minutes, ExportInput, ExportRow, Report, SummaryInput};

use crate::config::{Backend, CollaboratorConfig};
use crate::error::CollaboratorError;

/// Produces an aggregate report from logged sessions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize the given sessions.
    async fn summarize(&self, tasks: Vec<SummaryInput>) -> Result<Report, CollaboratorError>;
}

/// Produces spreadsheet rows from logged sessions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Exporter: Send + Sync {
    /// Convert the given sessions into rows.
    async fn export(&self, tasks: Vec<ExportInput>) -> Result<Vec<ExportRow>, CollaboratorError>;
}

/// The pair of collaborators used by the application.
#[derive(Clone)]
pub struct Collaborators {
    pub summarizer: Arc<dyn Summarizer>,
    pub exporter: Arc<dyn Exporter>,
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

impl Collaborators {
    /// Build collaborators for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client for a remote backend cannot be built.
    pub fn from_config(config: &CollaboratorConfig) -> Result<Self, CollaboratorError> {
        match config.backend {
            Backend::Local => Ok(Self::local()),
            Backend::Gemini => {
                let gemini = Arc::new(GeminiCollaborator::from_config(config)?);
                Ok(Self {
                    summarizer: gemini.clone(),
                    exporter: gemini,
                })
            }
        }
    }

    /// In-process collaborators.
    #[must_use]
    pub fn local() -> Self {
        let local = Arc::new(LocalCollaborator);
        Self {
            summarizer: local.clone(),
            exporter: local,
        }
    }
}
