//! Keyword-heuristic mail triage.
//!
//! Pure analysis over already-fetched messages: category classification,
//! urgency detection, action item extraction, topic mining, and
//! natural-language summaries. There is no mailbox transport here; input
//! arrives as JSONL (one message object per line) and every heuristic is a
//! plain function over text, so a different fetch layer can be swapped in
//! without touching the analysis.

pub mod classify;
pub mod extract;
pub mod model;
pub mod summary;

pub use classify::{Category, TriageConfig, Urgency, assess_urgency, classify, is_urgent};
pub use extract::{action_items_from, clean_body, key_topics};
pub use model::{
    ActionItem, DateRange, Message, ParsedMessages, TriageError, TriageSummary, UrgentEmail,
    parse_messages,
};
pub use summary::{CategoryGroup, SummaryMode, UnknownSummaryMode, categorize, summarize};
