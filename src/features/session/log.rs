//! Append-only, in-memory session log.

use chrono::{DateTime, Utc};

use super::entry::{EntryId, LogEntry};

/// Ordered log of committed entries. Entries are never removed or changed.
#[derive(Debug, Clone, Default)]
pub struct TaskLog {
    entries: Vec<LogEntry>,
}

impl TaskLog {
    /// Create an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a new entry created at `at` and return it.
    pub fn commit(
        &mut self,
        task_name: impl Into<String>,
        category: impl Into<String>,
        duration: u64,
        at: DateTime<Utc>,
    ) -> &LogEntry {
        let id = self.next_id(at);
        self.entries
            .push(LogEntry::new(id, task_name, category, duration, at));
        let entry = &self.entries[self.entries.len() - 1];
        tracing::info!(
            id = %entry.id(),
            task = entry.task_name(),
            category = entry.category(),
            duration = entry.duration(),
            "entry committed"
        );
        entry
    }

    fn next_id(&self, at: DateTime<Utc>) -> EntryId {
        let millis = at.timestamp_millis();
        match self.entries.last() {
            Some(last) if last.id().as_millis() >= millis => {
                EntryId::from(last.id().as_millis() + 1)
            }
            _ => EntryId::from(millis),
        }
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Frozen copy of the entries as of now.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all entry durations in seconds.
    #[must_use]
    pub fn total_seconds(&self) -> u64 {
        self.entries.iter().map(LogEntry::duration).sum()
    }
}
