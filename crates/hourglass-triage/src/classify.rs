//! Keyword classification heuristics.
//!
//! Pure functions from message text to category and urgency grades. All
//! matching is case-insensitive substring containment, on the cleaned body
//! where one is involved.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default subject/body keywords that mark a message urgent.
const DEFAULT_URGENT_KEYWORDS: &[&str] = &[
    "urgent",
    "asap",
    "immediate",
    "emergency",
    "critical",
    "deadline",
    "expires",
    "due today",
    "action required",
];

// Category chain keyword groups, checked in precedence order.
const URGENT_CATEGORY_KEYWORDS: &[&str] = &["urgent", "asap", "emergency", "critical", "deadline"];
const NEWSLETTER_KEYWORDS: &[&str] =
    &["unsubscribe", "newsletter", "notification", "update", "digest"];
const NOTIFICATION_SENDER_KEYWORDS: &[&str] =
    &["no-reply", "noreply", "automated", "system", "alert"];
const WORK_KEYWORDS: &[&str] = &["meeting", "project", "deadline", "report", "business", "work"];
const PERSONAL_KEYWORDS: &[&str] = &["family", "friend", "personal", "vacation", "birthday"];

/// Keywords that push an action item's urgency to high.
const HIGH_URGENCY_KEYWORDS: &[&str] = &["urgent", "asap", "immediate", "emergency", "today"];

/// Configuration for triage heuristics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Keywords that mark a message urgent when found in its subject or
    /// body.
    pub urgent_keywords: Vec<String>,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            urgent_keywords: DEFAULT_URGENT_KEYWORDS
                .iter()
                .map(|k| (*k).to_string())
                .collect(),
        }
    }
}

/// Categories a message can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Urgent,
    Work,
    Personal,
    Newsletters,
    Notifications,
    Other,
}

impl Category {
    /// Display name for rendered output.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Newsletters => "Newsletters",
            Self::Notifications => "Notifications",
            Self::Other => "Other",
        }
    }

    /// One-line description of what lands in this category.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Urgent => "Emails requiring immediate attention",
            Self::Work => "Work-related communications and tasks",
            Self::Personal => "Personal correspondence and social communications",
            Self::Newsletters => "Newsletters, marketing emails, and subscriptions",
            Self::Notifications => "System notifications and automated messages",
            Self::Other => "Miscellaneous emails not fitting other categories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Urgent => "urgent",
            Self::Work => "work",
            Self::Personal => "personal",
            Self::Newsletters => "newsletters",
            Self::Notifications => "notifications",
            Self::Other => "other",
        };
        write!(f, "{s}")
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Urgency grade for an action item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Urgency {
    High,
    Medium,
    Low,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        write!(f, "{s}")
    }
}

impl Serialize for Urgency {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Whether subject or body contains any of the given keywords.
pub fn is_urgent(subject: &str, body: &str, urgent_keywords: &[String]) -> bool {
    let subject = subject.to_lowercase();
    let body = body.to_lowercase();

    urgent_keywords.iter().any(|keyword| {
        let keyword = keyword.to_lowercase();
        subject.contains(&keyword) || body.contains(&keyword)
    })
}

/// Classify a message by the first matching keyword group.
///
/// Precedence: urgent, newsletters, notifications (matched on the sender,
/// not the text), work, personal, then other.
pub fn classify(subject: &str, sender: &str, body: &str) -> Category {
    let subject = subject.to_lowercase();
    let sender = sender.to_lowercase();
    let body = body.to_lowercase();

    let in_text =
        |keywords: &[&str]| keywords.iter().any(|k| subject.contains(k) || body.contains(k));

    if in_text(URGENT_CATEGORY_KEYWORDS) {
        Category::Urgent
    } else if in_text(NEWSLETTER_KEYWORDS) {
        Category::Newsletters
    } else if NOTIFICATION_SENDER_KEYWORDS.iter().any(|k| sender.contains(k)) {
        Category::Notifications
    } else if in_text(WORK_KEYWORDS) {
        Category::Work
    } else if in_text(PERSONAL_KEYWORDS) {
        Category::Personal
    } else {
        Category::Other
    }
}

/// Grade an action item's urgency from its text and source subject.
///
/// High when the text or subject carries an immediate-attention keyword,
/// medium when the text mentions a deadline or due date, low otherwise.
pub fn assess_urgency(action_text: &str, subject: &str) -> Urgency {
    let text = action_text.to_lowercase();
    let subject = subject.to_lowercase();

    if HIGH_URGENCY_KEYWORDS
        .iter()
        .any(|k| text.contains(k) || subject.contains(k))
    {
        Urgency::High
    } else if text.contains("deadline") || text.contains("due") {
        Urgency::Medium
    } else {
        Urgency::Low
    }
}
