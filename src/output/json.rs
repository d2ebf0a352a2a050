//! JSON output formatting for focuslog.

use serde::Serialize;
use serde_json::json;

use crate::error::FocuslogError;
use crate::features::session::LogEntry;

/// Format the session log as JSON
///
/// # Errors
///
/// Returns `FocuslogError::Json` if JSON serialization fails.
pub fn format_entries_json(entries: &[LogEntry]) -> Result<String, FocuslogError> {
    let total: u64 = entries.iter().map(LogEntry::duration).sum();
    let output = json!({
        "count": entries.len(),
        "total_seconds": total,
        "items": entries
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Serialize any value as pretty JSON
///
/// # Errors
///
/// Returns `FocuslogError::Json` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, FocuslogError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::session::EntryId;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_entries_json() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let entries = vec![
            LogEntry::new(EntryId::from(1), "Draft chapter", "Docs", 125, at),
            LogEntry::new(EntryId::from(2), "Review", "Code", 60, at),
        ];

        let output = format_entries_json(&entries).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["count"], 2);
        assert_eq!(value["total_seconds"], 185);
        assert_eq!(value["items"][0]["task_name"], "Draft chapter");
        assert_eq!(value["items"][1]["id"], 2);
    }

    #[test]
    fn test_empty_entries_json() {
        let output = format_entries_json(&[]).unwrap();
        assert!(output.contains("\"count\": 0"));
    }
}
