//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use hourglass_triage::SummaryMode;

/// Git-driven work-hour estimation and mail triage.
///
/// Estimates work hours from commit patterns in a repository and applies
/// keyword heuristics to batches of already-fetched email.
#[derive(Debug, Parser)]
#[command(name = "hourglass", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Estimate work hours from git history.
    Report {
        /// Repository to analyze.
        #[arg(long, default_value = ".")]
        repo: PathBuf,

        /// Filter commits by author name.
        #[arg(long)]
        author: Option<String>,

        /// Only count commits after this date (passed to git log).
        #[arg(long)]
        since: Option<String>,

        /// Only count commits before this date (passed to git log).
        #[arg(long)]
        until: Option<String>,

        /// Maximum idle gap in hours between commits of one session.
        #[arg(long)]
        max_gap: Option<f64>,

        /// Minimum effective session length in minutes.
        #[arg(long)]
        min_session: Option<f64>,

        /// Show daily breakdown and recent sessions.
        #[arg(long)]
        detailed: bool,

        /// Emit the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Combined view: git analysis, work log, recent file activity.
    Dashboard {
        /// Repository to analyze.
        #[arg(long, default_value = ".")]
        repo: PathBuf,
    },

    /// Append a note to the manual work log.
    Log {
        /// Free-text description of the work done.
        note: String,

        /// Hours spent, recorded alongside the note.
        #[arg(long)]
        hours: Option<f64>,
    },

    /// Summarize a batch of messages with keyword heuristics.
    Triage {
        /// Path to a JSONL message file; reads stdin when omitted.
        input: Option<PathBuf>,

        /// Summary wording: brief, detailed, or action-focused.
        #[arg(long, default_value_t = SummaryMode::Brief)]
        mode: SummaryMode,

        /// Include the category table.
        #[arg(long)]
        categories: bool,

        /// Emit the summary as JSON.
        #[arg(long)]
        json: bool,
    },
}
