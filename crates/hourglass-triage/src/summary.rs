//! Batch summarization and categorization.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::classify::{Category, TriageConfig, classify, is_urgent};
use crate::extract::{action_items_from, clean_body, key_topics};
use crate::model::{ActionItem, DateRange, Message, TriageSummary, UrgentEmail};

/// At most this many action items are reported per batch.
const MAX_ACTION_ITEMS: usize = 10;

/// Fixed precedence order for category output.
const CATEGORY_ORDER: [Category; 6] = [
    Category::Urgent,
    Category::Work,
    Category::Personal,
    Category::Newsletters,
    Category::Notifications,
    Category::Other,
];

/// How the natural-language summary is worded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryMode {
    Brief,
    Detailed,
    ActionFocused,
}

impl fmt::Display for SummaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Brief => "brief",
            Self::Detailed => "detailed",
            Self::ActionFocused => "action-focused",
        };
        write!(f, "{s}")
    }
}

impl FromStr for SummaryMode {
    type Err = UnknownSummaryMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brief" => Ok(Self::Brief),
            "detailed" => Ok(Self::Detailed),
            "action-focused" | "action_focused" => Ok(Self::ActionFocused),
            _ => Err(UnknownSummaryMode(s.to_string())),
        }
    }
}

/// Error type for unknown summary mode strings.
#[derive(Debug, Clone)]
pub struct UnknownSummaryMode(String);

impl fmt::Display for UnknownSummaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown summary mode: {}", self.0)
    }
}

impl std::error::Error for UnknownSummaryMode {}

/// Messages grouped under one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: Category,
    pub count: usize,
    pub description: &'static str,
    pub messages: Vec<Message>,
}

/// Summarize a batch of messages.
///
/// Bodies are cleaned once, then each heuristic runs over the cleaned
/// text: unread and sender tallies, urgent detection, action items
/// (capped at ten), key topics, the date range, and a natural-language
/// summary in the requested mode. Empty input produces a zeroed summary
/// with a fixed notice.
pub fn summarize(messages: &[Message], mode: SummaryMode, config: &TriageConfig) -> TriageSummary {
    if messages.is_empty() {
        return TriageSummary {
            total_emails: 0,
            unread_count: 0,
            summary: "No emails found in the specified timeframe.".to_string(),
            key_topics: Vec::new(),
            urgent_emails: Vec::new(),
            action_items: Vec::new(),
            sender_breakdown: BTreeMap::new(),
            date_range: None,
        };
    }

    let bodies: Vec<String> = messages.iter().map(|m| clean_body(&m.body)).collect();

    let unread_count = messages.iter().filter(|m| !m.is_read).count();

    let mut sender_breakdown: BTreeMap<String, usize> = BTreeMap::new();
    for message in messages {
        *sender_breakdown.entry(message.sender.clone()).or_insert(0) += 1;
    }

    let urgent_emails: Vec<UrgentEmail> = messages
        .iter()
        .zip(&bodies)
        .filter(|(m, body)| is_urgent(&m.subject, body, &config.urgent_keywords))
        .map(|(m, _)| UrgentEmail {
            subject: m.subject.clone(),
            sender: m.sender.clone(),
            date: m.date.clone(),
        })
        .collect();

    let mut action_items: Vec<ActionItem> = Vec::new();
    for (message, body) in messages.iter().zip(&bodies) {
        action_items.extend(action_items_from(&message.subject, &message.sender, body));
    }
    action_items.truncate(MAX_ACTION_ITEMS);

    let texts: Vec<String> = messages
        .iter()
        .zip(&bodies)
        .map(|(m, body)| format!("{} {body}", m.subject))
        .collect();
    let topics = key_topics(texts.iter().map(String::as_str));

    let summary = summary_text(
        mode,
        messages.len(),
        urgent_emails.len(),
        action_items.len(),
        &topics,
    );

    TriageSummary {
        total_emails: messages.len(),
        unread_count,
        summary,
        key_topics: topics,
        urgent_emails,
        action_items,
        sender_breakdown,
        date_range: date_range(messages),
    }
}

/// Group messages by category, keeping only non-empty groups.
///
/// Groups come back in a fixed order: urgent, work, personal,
/// newsletters, notifications, other.
pub fn categorize(messages: &[Message]) -> Vec<CategoryGroup> {
    let bodies: Vec<String> = messages.iter().map(|m| clean_body(&m.body)).collect();
    let assigned: Vec<Category> = messages
        .iter()
        .zip(&bodies)
        .map(|(m, body)| classify(&m.subject, &m.sender, body))
        .collect();

    CATEGORY_ORDER
        .iter()
        .filter_map(|&category| {
            let matched: Vec<Message> = messages
                .iter()
                .zip(&assigned)
                .filter(|(_, assigned)| **assigned == category)
                .map(|(m, _)| m.clone())
                .collect();
            if matched.is_empty() {
                None
            } else {
                Some(CategoryGroup {
                    category,
                    count: matched.len(),
                    description: category.description(),
                    messages: matched,
                })
            }
        })
        .collect()
}

/// Earliest and latest date strings in a batch. Messages without a date
/// are ignored; `None` when none carries one.
fn date_range(messages: &[Message]) -> Option<DateRange> {
    let dates: Vec<&str> = messages
        .iter()
        .map(|m| m.date.as_str())
        .filter(|d| !d.is_empty())
        .collect();

    let earliest = dates.iter().min()?;
    let latest = dates.iter().max()?;
    Some(DateRange {
        earliest: (*earliest).to_string(),
        latest: (*latest).to_string(),
    })
}

fn summary_text(
    mode: SummaryMode,
    total: usize,
    urgent: usize,
    actions: usize,
    topics: &[String],
) -> String {
    match mode {
        SummaryMode::Brief => {
            let mut summary = format!("Analyzed {total} emails. ");
            if urgent > 0 {
                summary.push_str(&format!("{urgent} require urgent attention. "));
            }
            if actions > 0 {
                summary.push_str(&format!("{actions} action items identified. "));
            }
            if !topics.is_empty() {
                let main: Vec<&str> = topics.iter().take(3).map(String::as_str).collect();
                summary.push_str(&format!("Main topics: {}.", main.join(", ")));
            }
            summary
        }
        SummaryMode::Detailed => {
            let mut summary = String::from("Email Summary Report:\n\n");
            summary.push_str(&format!("• Total emails processed: {total}\n"));
            if urgent > 0 {
                summary.push_str(&format!("• Urgent emails requiring attention: {urgent}\n"));
            }
            if actions > 0 {
                summary.push_str(&format!("• Action items extracted: {actions}\n"));
            }
            if !topics.is_empty() {
                summary.push_str(&format!("• Key discussion topics: {}\n", topics.join(", ")));
            }
            summary
        }
        SummaryMode::ActionFocused => {
            let mut summary = String::from("Action-Focused Summary:\n\n");
            if actions > 0 {
                summary.push_str(&format!("🔥 {actions} action items require your attention\n"));
            }
            if urgent > 0 {
                summary.push_str(&format!("⚠️ {urgent} urgent emails need immediate response\n"));
            }
            summary.push_str(&format!("📧 {total} total emails processed"));
            summary
        }
    }
}
