//! Git history as a session event source.
//!
//! Shells out to `git log` and parses the output into [`Commit`] events
//! suitable for session partitioning. Author timestamps are requested in
//! strict ISO 8601 (`%aI`) and kept in the author's own UTC offset, so
//! daily totals follow the author's local calendar.

use std::path::Path;
use std::process::Command;

use chrono::{DateTime, FixedOffset};
use hourglass_core::SessionEvent;
use thiserror::Error;

/// Pretty format handed to git: hash, strict-ISO author date, author name,
/// subject, separated by `|`.
const LOG_FORMAT: &str = "%H|%aI|%an|%s";

/// Errors from collecting git history.
#[derive(Debug, Error)]
pub enum GitError {
    /// Failed to launch the `git` binary.
    #[error("failed to run git: {0}")]
    Launch(#[from] std::io::Error),
    /// `git log` exited with a failure status.
    #[error("git log exited with {status}: {stderr}")]
    CommandFailed {
        status: std::process::ExitStatus,
        stderr: String,
    },
    /// `git log` produced output that is not valid UTF-8.
    #[error("git log produced non-UTF-8 output")]
    NonUtf8(#[from] std::string::FromUtf8Error),
}

/// Filters forwarded to `git log`.
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    /// Only commits whose author matches this pattern (`--author`).
    pub author: Option<String>,
    /// Only commits after this date (`--since`, any format git accepts).
    pub since: Option<String>,
    /// Only commits before this date (`--until`).
    pub until: Option<String>,
}

/// A commit parsed from `git log` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Full commit hash.
    pub hash: String,

    /// Author timestamp, offset preserved.
    pub timestamp: DateTime<FixedOffset>,

    /// Author name.
    pub author: String,

    /// Commit subject line.
    pub subject: String,
}

impl SessionEvent for Commit {
    fn event_id(&self) -> &str {
        &self.hash
    }

    fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    fn author(&self) -> &str {
        &self.author
    }

    fn label(&self) -> &str {
        &self.subject
    }
}

/// Result of parsing `git log` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLog {
    /// Commits sorted ascending by timestamp.
    pub commits: Vec<Commit>,

    /// Number of lines that could not be parsed.
    pub skipped: usize,
}

/// Collect commits from a repository's history.
///
/// Runs `git log --no-merges` against `repo` with the given filters and
/// parses the output. Commits come back sorted ascending by timestamp,
/// ready for session partitioning.
///
/// A repository whose filters match nothing yields an empty list, and so
/// does a freshly initialized repository without any commits at all.
pub fn collect_commits(repo: &Path, filter: &LogFilter) -> Result<ParsedLog, GitError> {
    let mut cmd = Command::new("git");
    cmd.arg("-C")
        .arg(repo)
        .arg("log")
        .arg("--no-merges")
        .arg(format!("--pretty=format:{LOG_FORMAT}"));

    if let Some(author) = &filter.author {
        cmd.arg(format!("--author={author}"));
    }
    if let Some(since) = &filter.since {
        cmd.arg(format!("--since={since}"));
    }
    if let Some(until) = &filter.until {
        cmd.arg(format!("--until={until}"));
    }

    let output = cmd.output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if is_empty_history(&stderr) {
            return Ok(ParsedLog {
                commits: Vec::new(),
                skipped: 0,
            });
        }
        return Err(GitError::CommandFailed {
            status: output.status,
            stderr,
        });
    }

    let stdout = String::from_utf8(output.stdout)?;
    Ok(parse_log(&stdout))
}

/// A repository without commits makes `git log` fail with a "does not have
/// any commits" message on stderr. That is an empty history, not an error.
fn is_empty_history(stderr: &str) -> bool {
    stderr.contains("does not have any commits")
}

/// Parse `git log --pretty=format:%H|%aI|%an|%s` output.
///
/// Subjects may contain `|`, so each line is split at most three times.
/// Lines with missing fields or unparseable timestamps are skipped and
/// counted, with a warning per line.
pub fn parse_log(output: &str) -> ParsedLog {
    let mut commits = Vec::new();
    let mut skipped = 0;

    for line in output.lines() {
        if line.is_empty() {
            continue;
        }
        if let Some(commit) = parse_line(line) {
            commits.push(commit);
        } else {
            skipped += 1;
            tracing::warn!(line = %line, "skipping malformed git log line");
        }
    }

    commits.sort_by_key(|c| c.timestamp);

    ParsedLog { commits, skipped }
}

fn parse_line(line: &str) -> Option<Commit> {
    let mut parts = line.splitn(4, '|');
    let hash = parts.next()?;
    let raw_timestamp = parts.next()?;
    let author = parts.next()?;
    let subject = parts.next()?;

    let timestamp = DateTime::parse_from_rfc3339(raw_timestamp).ok()?;

    Some(Commit {
        hash: hash.to_string(),
        timestamp,
        author: author.to_string(),
        subject: subject.to_string(),
    })
}
