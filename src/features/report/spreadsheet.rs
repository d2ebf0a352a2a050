//! CSV rendering of exported rows.

use std::io::Write;
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use super::types::ExportRow;
use crate::error::FocuslogError;

/// Header row of the spreadsheet.
pub const HEADERS: [&str; 5] = ["Task Name", "Category", "Duration (Minutes)", "Date", "Time"];

/// Render rows as CSV: header first, every cell quoted, lines joined by
/// `\n` with no newline after the last one.
///
/// # Errors
///
/// Returns an error if CSV encoding fails.
pub fn to_csv_string(rows: &[ExportRow]) -> Result<String, FocuslogError> {
    // Header cells are written bare; data cells are always quoted.
    let mut buf = HEADERS.join(",").into_bytes();
    buf.push(b'\n');

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buf);

    for row in rows {
        let minutes = row.duration_in_minutes.to_string();
        writer.write_record([
            row.task_name.as_str(),
            row.category.as_str(),
            minutes.as_str(),
            row.date.as_str(),
            row.time.as_str(),
        ])?;
    }

    let mut buf = writer
        .into_inner()
        .map_err(|e| FocuslogError::Io(std::io::Error::other(e.to_string())))?;
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    String::from_utf8(buf).map_err(|e| FocuslogError::Io(std::io::Error::other(e)))
}

/// Write rows as CSV to `out`.
///
/// # Errors
///
/// Returns an error if encoding or writing to `out` fails.
pub fn write_csv<W: Write>(mut out: W, rows: &[ExportRow]) -> Result<(), FocuslogError> {
    out.write_all(to_csv_string(rows)?.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Write rows to a CSV file, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_csv(path: &Path, rows: &[ExportRow]) -> Result<(), FocuslogError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_csv(std::io::BufWriter::new(file), rows)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "spreadsheet written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn row(task_name: &str, minutes: f64) -> ExportRow {
        ExportRow {
            task_name: task_name.to_string(),
            category: "X".to_string(),
            duration_in_minutes: minutes,
            date: "2024-01-01".to_string(),
            time: "09:00:00".to_string(),
        }
    }

    #[test]
    fn test_header_and_comma_cell() {
        let csv = to_csv_string(&[row("A,B", 1.5)]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Task Name,Category,Duration (Minutes),Date,Time");
        assert_eq!(lines[1], r#""A,B","X","1.5","2024-01-01","09:00:00""#);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_quotes_are_doubled() {
        let csv = to_csv_string(&[row(r#"say "hi""#, 25.0)]).unwrap();
        let data = csv.lines().nth(1).unwrap();
        assert_eq!(data, r#""say ""hi""","X","25","2024-01-01","09:00:00""#);
    }

    #[test]
    fn test_empty_rows_only_header() {
        let csv = to_csv_string(&[]).unwrap();
        assert_eq!(csv, "Task Name,Category,Duration (Minutes),Date,Time");
    }

    #[test]
    fn test_no_newline_after_last_row() {
        let csv = to_csv_string(&[row("A", 1.0), row("B", 2.0)]).unwrap();
        assert!(csv.ends_with(r#""B","X","2","2024-01-01","09:00:00""#));
        assert_eq!(csv.matches('\n').count(), 2);
    }

    #[test]
    fn test_save_csv_creates_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("exports").join("log.csv");

        save_csv(&path, &[row("Write", 2.08)]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains(r#""Write","X","2.08""#));
    }
}
