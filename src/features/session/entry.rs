//! Committed log entries.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a log entry: creation time in milliseconds since the epoch,
/// bumped when needed so that ids in one log strictly increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(i64);

impl EntryId {
    /// Raw millisecond value.
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EntryId {
    fn from(millis: i64) -> Self {
        Self(millis)
    }
}

/// One completed, immutable tracked interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    id: EntryId,
    task_name: String,
    category: String,
    /// Whole seconds measured by the timer.
    duration: u64,
    created_at: DateTime<Utc>,
}

impl LogEntry {
    /// Create an entry.
    #[must_use]
    pub fn new(
        id: EntryId,
        task_name: impl Into<String>,
        category: impl Into<String>,
        duration: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            task_name: task_name.into(),
            category: category.into(),
            duration,
            created_at,
        }
    }

    #[must_use]
    pub const fn id(&self) -> EntryId {
        self.id
    }

    #[must_use]
    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Duration in whole seconds.
    #[must_use]
    pub const fn duration(&self) -> u64 {
        self.duration
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Get creation time in local timezone.
    #[must_use]
    pub fn created_at_local(&self) -> DateTime<Local> {
        self.created_at.with_timezone(&Local)
    }
}
