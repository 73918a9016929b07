//! Log command for appending manual work sessions.
//!
//! Entries are display-oriented lines in a plain-text file; the dashboard
//! prints them verbatim and nothing parses them back.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use fs2::FileExt;

pub fn run<W: Write>(writer: &mut W, note: &str, hours: Option<f64>, work_log: &Path) -> Result<()> {
    let line = append_entry(work_log, note, hours, Local::now())?;
    writeln!(writer, "✅ Logged: {line}")?;
    tracing::info!(path = ?work_log, "work log entry added");
    Ok(())
}

/// Appends one entry under an exclusive lock and returns the written line.
fn append_entry(
    work_log: &Path,
    note: &str,
    hours: Option<f64>,
    now: DateTime<Local>,
) -> Result<String> {
    if note.trim().is_empty() {
        anyhow::bail!("note cannot be empty");
    }
    if let Some(hours) = hours {
        if !hours.is_finite() || hours < 0.0 {
            anyhow::bail!("hours must be a non-negative number");
        }
    }

    if let Some(parent) = work_log.parent() {
        fs::create_dir_all(parent).context("failed to create work log directory")?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(work_log)
        .with_context(|| format!("failed to open {}", work_log.display()))?;
    file.lock_exclusive().context("failed to lock work log")?;

    let stamp = now.format("%Y-%m-%d %H:%M");
    let line = match hours {
        Some(hours) => format!("{stamp}  [{hours:.1}h]  {note}"),
        None => format!("{stamp}  {note}"),
    };
    writeln!(file, "{line}").context("failed to write work log entry")?;

    Ok(line)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 1, 15, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_append_entry_with_hours() {
        let temp = tempfile::tempdir().unwrap();
        let work_log = temp.path().join("work-log.txt");

        let line = append_entry(&work_log, "reviewed the parser", Some(1.5), noon()).unwrap();

        assert_eq!(line, "2025-01-15 12:30  [1.5h]  reviewed the parser");
        let contents = fs::read_to_string(&work_log).unwrap();
        assert_eq!(contents, "2025-01-15 12:30  [1.5h]  reviewed the parser\n");
    }

    #[test]
    fn test_append_entry_without_hours() {
        let temp = tempfile::tempdir().unwrap();
        let work_log = temp.path().join("work-log.txt");

        let line = append_entry(&work_log, "standup", None, noon()).unwrap();

        assert_eq!(line, "2025-01-15 12:30  standup");
    }

    #[test]
    fn test_append_entry_accumulates_lines() {
        let temp = tempfile::tempdir().unwrap();
        let work_log = temp.path().join("work-log.txt");

        append_entry(&work_log, "first", Some(0.5), noon()).unwrap();
        append_entry(&work_log, "second", None, noon()).unwrap();

        let contents = fs::read_to_string(&work_log).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn test_append_entry_creates_parent_directories() {
        let temp = tempfile::tempdir().unwrap();
        let work_log = temp.path().join("nested/dir/work-log.txt");

        append_entry(&work_log, "note", None, noon()).unwrap();

        assert!(work_log.exists());
    }

    #[test]
    fn test_append_entry_rejects_empty_note() {
        let temp = tempfile::tempdir().unwrap();
        let work_log = temp.path().join("work-log.txt");

        let err = append_entry(&work_log, "   ", None, noon()).unwrap_err();
        assert!(err.to_string().contains("note cannot be empty"));
        assert!(!work_log.exists());
    }

    #[test]
    fn test_append_entry_rejects_negative_hours() {
        let temp = tempfile::tempdir().unwrap();
        let work_log = temp.path().join("work-log.txt");

        let err = append_entry(&work_log, "note", Some(-1.0), noon()).unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn test_run_echoes_written_line() {
        let temp = tempfile::tempdir().unwrap();
        let work_log = temp.path().join("work-log.txt");

        let mut output = Vec::new();
        run(&mut output, "fixed the build", Some(0.5), &work_log).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("✅ Logged: "));
        assert!(output.contains("[0.5h]  fixed the build"));
    }
}
