//! Message input model and the summary output shapes.

use std::collections::BTreeMap;
use std::io::BufRead;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::Urgency;

/// Errors from reading message input.
#[derive(Debug, Error)]
pub enum TriageError {
    /// Failed to read from the input.
    #[error("failed to read message input: {0}")]
    Io(#[from] std::io::Error),
}

/// A fetched mail message, one JSON object per input line.
///
/// Only the fields the heuristics look at are modeled; unknown fields in
/// the input are ignored. `body` may still contain HTML, it is cleaned
/// before analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Mailbox-assigned identifier, opaque.
    pub uid: String,

    #[serde(default)]
    pub subject: String,

    /// Sender address or display string.
    #[serde(rename = "from")]
    pub sender: String,

    /// Date header as supplied by the source. The heuristics only compare
    /// these strings (ISO 8601 recommended so ordering is chronological),
    /// they never parse them.
    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub body: String,

    /// Sources that do not report read state get `true`, so only messages
    /// explicitly marked unread count as unread.
    #[serde(default = "default_is_read")]
    pub is_read: bool,

    #[serde(default = "default_folder")]
    pub folder: String,
}

fn default_is_read() -> bool {
    true
}

fn default_folder() -> String {
    "INBOX".to_string()
}

/// An action item extracted from a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionItem {
    /// What to do, captured from the message text.
    pub description: String,

    /// Subject of the message it came from.
    pub email_subject: String,

    /// Sender of the message it came from.
    pub sender: String,

    /// Graded urgency.
    pub urgency: Urgency,
}

/// Reference to a message flagged urgent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrgentEmail {
    pub subject: String,
    pub sender: String,
    pub date: String,
}

/// Earliest and latest date strings seen in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub earliest: String,
    pub latest: String,
}

/// Comprehensive summary of a message batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriageSummary {
    pub total_emails: usize,
    pub unread_count: usize,

    /// Natural-language summary in the requested mode.
    pub summary: String,

    pub key_topics: Vec<String>,
    pub urgent_emails: Vec<UrgentEmail>,
    pub action_items: Vec<ActionItem>,

    /// Message counts per sender.
    pub sender_breakdown: BTreeMap<String, usize>,

    /// `None` when no message carries a date.
    pub date_range: Option<DateRange>,
}

/// Result of parsing JSONL message input.
#[derive(Debug)]
pub struct ParsedMessages {
    /// Messages in input order.
    pub messages: Vec<Message>,

    /// Number of lines that could not be parsed.
    pub skipped: usize,
}

/// Parse messages from JSONL input, one object per line.
///
/// Blank lines are ignored. Malformed lines are skipped and counted, with
/// a warning per line; only I/O failures are fatal.
pub fn parse_messages<R: BufRead>(reader: R) -> Result<ParsedMessages, TriageError> {
    let mut messages = Vec::new();
    let mut skipped = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Message>(&line) {
            Ok(message) => messages.push(message),
            Err(err) => {
                skipped += 1;
                tracing::warn!(line = idx + 1, error = %err, "skipping malformed message line");
            }
        }
    }

    Ok(ParsedMessages { messages, skipped })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_parse_full_message() {
        let input = r#"{"uid":"42","subject":"Team sync","from":"boss@example.com","date":"2025-01-15T09:00:00Z","body":"<p>Agenda attached</p>","is_read":false,"folder":"Work"}"#;

        let parsed = parse_messages(Cursor::new(input)).unwrap();

        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.messages.len(), 1);
        let message = &parsed.messages[0];
        assert_eq!(message.uid, "42");
        assert_eq!(message.subject, "Team sync");
        assert_eq!(message.sender, "boss@example.com");
        assert_eq!(message.body, "<p>Agenda attached</p>");
        assert!(!message.is_read);
        assert_eq!(message.folder, "Work");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let input = r#"{"uid":"1","from":"a@example.com"}"#;

        let parsed = parse_messages(Cursor::new(input)).unwrap();

        let message = &parsed.messages[0];
        assert_eq!(message.subject, "");
        assert_eq!(message.date, "");
        assert_eq!(message.body, "");
        assert!(message.is_read);
        assert_eq!(message.folder, "INBOX");
    }

    #[test]
    fn test_malformed_lines_skipped_and_counted() {
        let input = "\
{\"uid\":\"1\",\"from\":\"a@example.com\"}
not json at all
{\"subject\":\"missing uid and from\"}
{\"uid\":\"2\",\"from\":\"b@example.com\"}";

        let parsed = parse_messages(Cursor::new(input)).unwrap();

        assert_eq!(parsed.messages.len(), 2);
        assert_eq!(parsed.skipped, 2);
    }

    #[test]
    fn test_blank_lines_ignored() {
        let input = "\n\n{\"uid\":\"1\",\"from\":\"a@example.com\"}\n\n";

        let parsed = parse_messages(Cursor::new(input)).unwrap();

        assert_eq!(parsed.messages.len(), 1);
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn test_empty_input() {
        let parsed = parse_messages(Cursor::new("")).unwrap();

        assert!(parsed.messages.is_empty());
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let input = r#"{"uid":"1","from":"a@example.com","x-spam-score":"9.9","attachments":[]}"#;

        let parsed = parse_messages(Cursor::new(input)).unwrap();

        assert_eq!(parsed.messages.len(), 1);
    }
}
