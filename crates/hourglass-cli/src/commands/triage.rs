//! Triage command for summarizing message batches.
//!
//! Input is JSONL (one message object per line) from a file or stdin;
//! all analysis is pure and in-process.

use std::fmt::Write as _;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use hourglass_triage::{
    CategoryGroup, SummaryMode, TriageConfig, TriageSummary, categorize, parse_messages, summarize,
};

/// JSON envelope for `--json`.
#[derive(Serialize)]
struct TriageOutput<'a> {
    #[serde(flatten)]
    summary: &'a TriageSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<&'a [CategoryGroup]>,
}

pub fn run<W: Write, R: BufRead>(
    writer: &mut W,
    reader: R,
    mode: SummaryMode,
    categories: bool,
    json: bool,
    config: &TriageConfig,
) -> Result<()> {
    let parsed = parse_messages(reader).context("failed to read messages")?;
    if parsed.skipped > 0 {
        tracing::warn!(skipped = parsed.skipped, "skipped malformed message lines");
    }

    let summary = summarize(&parsed.messages, mode, config);
    let groups = categories.then(|| categorize(&parsed.messages));

    if json {
        let output = TriageOutput {
            summary: &summary,
            categories: groups.as_deref(),
        };
        let rendered =
            serde_json::to_string_pretty(&output).context("failed to serialize summary")?;
        writeln!(writer, "{rendered}")?;
        return Ok(());
    }

    write!(writer, "{}", format_summary(&summary))?;
    if let Some(groups) = &groups {
        write!(writer, "{}", format_categories(groups))?;
    }

    Ok(())
}

// ========== Rendering ==========

fn format_summary(summary: &TriageSummary) -> String {
    let mut output = String::new();

    writeln!(output, "📬 Email Triage Summary").unwrap();
    writeln!(output, "{}", "=".repeat(50)).unwrap();
    writeln!(
        output,
        "📧 {} emails ({} unread)",
        summary.total_emails, summary.unread_count
    )
    .unwrap();
    if let Some(range) = &summary.date_range {
        writeln!(output, "📆 {} to {}", range.earliest, range.latest).unwrap();
    }
    writeln!(output).unwrap();
    writeln!(output, "{}", summary.summary.trim_end()).unwrap();

    if !summary.urgent_emails.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "⚠️ Urgent:").unwrap();
        for email in &summary.urgent_emails {
            writeln!(output, "  - {} (from {})", email.subject, email.sender).unwrap();
        }
    }

    if !summary.action_items.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "✅ Action Items:").unwrap();
        for item in &summary.action_items {
            writeln!(
                output,
                "  - [{}] {} (from {})",
                item.urgency, item.description, item.sender
            )
            .unwrap();
        }
    }

    if !summary.sender_breakdown.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "👥 Senders:").unwrap();
        for (sender, count) in &summary.sender_breakdown {
            writeln!(output, "  - {sender}: {count}").unwrap();
        }
    }

    if !summary.key_topics.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "🏷️ Topics: {}", summary.key_topics.join(", ")).unwrap();
    }

    output
}

fn format_categories(groups: &[CategoryGroup]) -> String {
    let mut output = String::new();

    writeln!(output).unwrap();
    writeln!(output, "📂 Categories:").unwrap();
    for group in groups {
        writeln!(output).unwrap();
        writeln!(
            output,
            "{} ({}): {}",
            group.category.title(),
            group.count,
            group.description
        )
        .unwrap();
        for message in &group.messages {
            writeln!(output, "  - {} (from {})", message.subject, message.sender).unwrap();
        }
    }

    output
}
