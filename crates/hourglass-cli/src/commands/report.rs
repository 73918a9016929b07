//! Report command for estimating work hours from git history.
//!
//! This module implements `hourglass report`: commits are fetched through
//! `hourglass-git` and partitioned into sessions, then rendered either as
//! the human-readable analysis or as JSON (`--json`).

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use hourglass_core::{Session, SessionConfig, compute_work_hours, partition_into_sessions};
use hourglass_git::{Commit, LogFilter, collect_commits};

/// Computed report data.
#[derive(Debug)]
pub struct ReportData {
    pub total_hours: f64,
    pub session_count: usize,
    pub commit_count: usize,
    pub daily_breakdown: BTreeMap<NaiveDate, f64>,
    pub sessions: Vec<Session<Commit>>,
    /// Lower bound applied when displaying a single session's duration.
    pub floor_hours: f64,
}

/// Session entry for JSON output.
#[derive(Debug, Serialize)]
struct SessionSummary {
    start: String,
    end: String,
    hours: f64,
    commits: usize,
}

/// Report shape for `--json`.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    total_hours: f64,
    session_count: usize,
    commit_count: usize,
    daily_breakdown: &'a BTreeMap<NaiveDate, f64>,
    sessions: Vec<SessionSummary>,
}

pub fn run<W: Write>(
    writer: &mut W,
    repo: &Path,
    filter: &LogFilter,
    config: &SessionConfig,
    detailed: bool,
    json: bool,
) -> Result<()> {
    let parsed = collect_commits(repo, filter)
        .with_context(|| format!("failed to read git history from {}", repo.display()))?;

    let data = build_report(parsed.commits, config);

    if json {
        writeln!(writer, "{}", format_report_json(&data)?)?;
    } else {
        write!(writer, "{}", format_report(&data, detailed))?;
    }

    Ok(())
}

/// Partitions commits into sessions and aggregates the work-hour totals.
pub fn build_report(commits: Vec<Commit>, config: &SessionConfig) -> ReportData {
    let commit_count = commits.len();
    let sessions = partition_into_sessions(commits, config);
    let hours = compute_work_hours(&sessions, config);

    ReportData {
        total_hours: hours.total_hours,
        session_count: hours.session_count,
        commit_count,
        daily_breakdown: hours.daily_hours,
        sessions,
        floor_hours: config.min_session_minutes / 60.0,
    }
}

// ========== Rendering ==========

/// Formats the human-readable report output.
pub fn format_report(data: &ReportData, detailed: bool) -> String {
    let mut output = String::new();

    writeln!(output, "📊 Git Time Analysis Report").unwrap();
    writeln!(output, "{}", "=".repeat(50)).unwrap();

    if data.commit_count == 0 {
        writeln!(output, "No commits found.").unwrap();
        return output;
    }

    writeln!(output, "📈 Total Estimated Work Hours: {:.1}", data.total_hours).unwrap();
    writeln!(output, "📅 Work Sessions: {}", data.session_count).unwrap();
    writeln!(output, "💻 Total Commits: {}", data.commit_count).unwrap();

    if detailed {
        let max_daily = data
            .daily_breakdown
            .values()
            .fold(0.0_f64, |max, &hours| max.max(hours));

        writeln!(output).unwrap();
        writeln!(output, "📊 Daily Breakdown:").unwrap();
        for (date, hours) in &data.daily_breakdown {
            let bar = progress_bar(*hours, max_daily);
            writeln!(output, "  {date}: {hours:.1} hours  {bar}").unwrap();
        }

        writeln!(output).unwrap();
        writeln!(output, "🔍 Recent Sessions:").unwrap();
        let recent: Vec<_> = data.sessions.iter().rev().take(5).collect();
        for (i, session) in recent.iter().rev().enumerate() {
            let duration = session.duration_hours().max(data.floor_hours);
            writeln!(
                output,
                "  {}. {} - {} ({duration:.1}h) - {} commits",
                i + 1,
                session.start.format("%Y-%m-%d %H:%M"),
                session.end.format("%H:%M"),
                session.event_count(),
            )
            .unwrap();
        }
    }

    output
}

/// Formats the report as pretty-printed JSON.
pub fn format_report_json(data: &ReportData) -> Result<String> {
    let sessions = data
        .sessions
        .iter()
        .map(|session| SessionSummary {
            start: session.start.to_rfc3339(),
            end: session.end.to_rfc3339(),
            hours: session.duration_hours().max(data.floor_hours),
            commits: session.event_count(),
        })
        .collect();

    let report = JsonReport {
        total_hours: data.total_hours,
        session_count: data.session_count,
        commit_count: data.commit_count,
        daily_breakdown: &data.daily_breakdown,
        sessions,
    };

    serde_json::to_string_pretty(&report).context("failed to serialize report")
}

/// Renders a 10-character bar scaled against the busiest day.
fn progress_bar(hours: f64, max_hours: f64) -> String {
    const WIDTH: usize = 10;

    if max_hours <= 0.0 {
        return "░".repeat(WIDTH);
    }

    let fraction = (hours / max_hours).clamp(0.0, 1.0);
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut filled = (fraction * WIDTH as f64).round() as usize;
    // Give any non-zero day at least one block for visibility
    if hours > 0.0 && filled == 0 {
        filled = 1;
    }

    format!("{}{}", "█".repeat(filled), "░".repeat(WIDTH - filled))
}
