//! Dashboard command combining git analysis, the manual work log, and
//! recent file activity into one view.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use chrono::{DateTime, Local};
use rayon::prelude::*;

use hourglass_git::LogFilter;

use crate::Config;
use crate::commands::report;

/// How many file activity lines are shown before truncating.
const MAX_ACTIVITY_LINES: usize = 20;

/// A file touched within the activity window.
struct RecentFile {
    modified: SystemTime,
    path: PathBuf,
}

pub fn run<W: Write>(writer: &mut W, repo: &Path, config: &Config) -> Result<()> {
    render(writer, repo, config, Local::now())
}

fn render<W: Write>(
    writer: &mut W,
    repo: &Path,
    config: &Config,
    generated: DateTime<Local>,
) -> Result<()> {
    writeln!(writer, "🕐 Project Time Tracking Dashboard")?;
    writeln!(writer, "{}", "=".repeat(60))?;
    writeln!(writer, "📅 Generated: {}", generated.format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(writer)?;

    git_section(writer, repo, config)?;
    writeln!(writer)?;

    work_log_section(writer, &config.dashboard.work_log)?;
    writeln!(writer)?;

    file_activity_section(writer, repo, config)?;

    Ok(())
}

/// The detailed git report, or a fallback line when the repo is unreadable.
fn git_section<W: Write>(writer: &mut W, repo: &Path, config: &Config) -> Result<()> {
    writeln!(writer, "📊 Git-Based Time Analysis:")?;
    writeln!(writer, "{}", "-".repeat(30))?;

    let filter = LogFilter {
        author: config.report.author.clone(),
        since: config.report.since.clone(),
        until: None,
    };

    if let Err(err) = report::run(writer, repo, &filter, &config.session, true, false) {
        tracing::warn!(repo = ?repo, error = %err, "git analysis failed");
        writeln!(writer, "Git analysis not available")?;
    }

    Ok(())
}

/// Prints the manual work log verbatim, or a hint when none exists yet.
fn work_log_section<W: Write>(writer: &mut W, work_log: &Path) -> Result<()> {
    writeln!(writer, "✋ Manual Work Sessions:")?;
    writeln!(writer, "{}", "-".repeat(24))?;

    match fs::read_to_string(work_log) {
        Ok(contents) => {
            write!(writer, "{contents}")?;
        }
        Err(err) => {
            tracing::debug!(path = ?work_log, error = %err, "no work log to display");
            writeln!(writer, "💡 Start tracking with: hourglass log \"what you did\"")?;
        }
    }

    Ok(())
}

fn file_activity_section<W: Write>(writer: &mut W, repo: &Path, config: &Config) -> Result<()> {
    let days = config.dashboard.activity_days;
    writeln!(writer, "📁 Recent File Activity (Last {days} Days):")?;
    writeln!(writer, "{}", "-".repeat(35))?;

    let recent = match recent_files(repo, days, &config.dashboard.activity_extensions) {
        Ok(recent) => recent,
        Err(err) => {
            tracing::warn!(repo = ?repo, error = %err, "file activity scan failed");
            writeln!(writer, "  File activity analysis failed")?;
            return Ok(());
        }
    };

    if recent.is_empty() {
        writeln!(writer, "  No recent file activity detected")?;
        return Ok(());
    }

    for file in recent.iter().take(MAX_ACTIVITY_LINES) {
        let stamp = DateTime::<Local>::from(file.modified).format("%Y-%m-%d %H:%M");
        let display = file.path.strip_prefix(repo).unwrap_or(&file.path);
        writeln!(writer, "  {stamp}  {}", display.display())?;
    }
    if recent.len() > MAX_ACTIVITY_LINES {
        writeln!(writer, "  ... and {} more files", recent.len() - MAX_ACTIVITY_LINES)?;
    }

    Ok(())
}

/// Files under `repo` with a matching extension modified within the window,
/// newest first. Hidden directories are not descended into.
fn recent_files(repo: &Path, days: u64, extensions: &[String]) -> std::io::Result<Vec<RecentFile>> {
    let mut candidates = Vec::new();
    collect_files(repo, &mut candidates)?;

    let cutoff = SystemTime::now()
        .checked_sub(Duration::from_secs(days * 86_400))
        .unwrap_or(UNIX_EPOCH);

    let mut recent: Vec<RecentFile> = candidates
        .par_iter()
        .filter_map(|path| {
            let ext = path.extension()?.to_str()?;
            if !extensions.iter().any(|wanted| wanted == ext) {
                return None;
            }
            let modified = path.metadata().ok()?.modified().ok()?;
            (modified >= cutoff).then(|| RecentFile {
                modified,
                path: path.clone(),
            })
        })
        .collect();

    recent.sort_by(|a, b| b.modified.cmp(&a.modified));
    Ok(recent)
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            let hidden = path
                .file_name()
                .is_some_and(|name| name.to_string_lossy().starts_with('.'));
            if !hidden {
                collect_files(&path, files)?;
            }
        } else {
            files.push(path);
        }
    }
    Ok(())
}
