//! Text extraction heuristics: body cleanup, action items, key topics.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::classify::assess_urgency;
use crate::model::ActionItem;

/// Cleaned bodies are capped at this many characters.
const MAX_BODY_LENGTH: usize = 2000;

/// Action item descriptions are capped at this many characters.
const MAX_ACTION_LENGTH: usize = 100;

/// Captures at most this long after trimming are discarded as noise.
const MIN_ACTION_LENGTH: usize = 3;

/// At most this many topics are reported.
const MAX_TOPICS: usize = 8;

static HTML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("HTML tag pattern is valid"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w{3,}\b").expect("word pattern is valid"));

/// Request-like phrases that introduce an action item. Each pattern
/// captures the words following the trigger.
static ACTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"please\s+(\w+(?:\s+\w+)*)",
        r"can you\s+(\w+(?:\s+\w+)*)",
        r"need to\s+(\w+(?:\s+\w+)*)",
        r"action required:?\s*(\w+(?:\s+\w+)*)",
        r"todo:?\s*(\w+(?:\s+\w+)*)",
        r"deadline:?\s*(\w+(?:\s+\w+)*)",
    ]
    .iter()
    .map(|pattern| Regex::new(&format!("(?i){pattern}")).expect("action pattern is valid"))
    .collect()
});

/// Words too common to count as topics.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will", "would",
    "could", "should", "may", "might", "can", "this", "that", "these", "those", "i", "you", "he",
    "she", "it", "we", "they", "me", "him", "her", "us", "them",
];

/// Strip HTML tags, collapse whitespace, and cap the length of a message
/// body before the keyword heuristics run over it.
pub fn clean_body(body: &str) -> String {
    if body.is_empty() {
        return String::new();
    }
    let text = HTML_TAG_RE.replace_all(body, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    truncate_chars(text.trim(), MAX_BODY_LENGTH)
}

/// Extract action items from one message.
///
/// Matches request-like phrases over the subject and cleaned body.
/// Captures are capped at 100 characters, trimmed, discarded when too
/// short to mean anything, and graded for urgency.
pub fn action_items_from(subject: &str, sender: &str, body: &str) -> Vec<ActionItem> {
    let text = format!("{subject} {body}");
    let mut items = Vec::new();

    for pattern in ACTION_PATTERNS.iter() {
        for caps in pattern.captures_iter(&text) {
            let Some(capture) = caps.get(1) else {
                continue;
            };
            let description = truncate_chars(capture.as_str(), MAX_ACTION_LENGTH);
            let description = description.trim();
            if description.chars().count() > MIN_ACTION_LENGTH {
                items.push(ActionItem {
                    description: description.to_string(),
                    email_subject: subject.to_string(),
                    sender: sender.to_string(),
                    urgency: assess_urgency(description, subject),
                });
            }
        }
    }

    items
}

/// Identify recurring topics across a batch of message texts.
///
/// Counts words of three or more characters, ignoring stop words. The top
/// eight by frequency survive, minus anything seen only once; survivors
/// are title-cased. Ties rank by first appearance.
pub fn key_topics<'a, I>(texts: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    // (count, first-seen index) per word
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut next_index = 0;

    for text in texts {
        let lowered = text.to_lowercase();
        for word in WORD_RE.find_iter(&lowered) {
            let word = word.as_str();
            if STOP_WORDS.contains(&word) {
                continue;
            }
            let entry = counts.entry(word.to_string()).or_insert_with(|| {
                let index = next_index;
                next_index += 1;
                (0, index)
            });
            entry.0 += 1;
        }
    }

    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by(|(_, a), (_, b)| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    ranked
        .into_iter()
        .take(MAX_TOPICS)
        .filter(|(_, (count, _))| *count > 1)
        .map(|(word, _)| title_case(&word))
        .collect()
}

/// Truncate to at most `max` characters, on a char boundary.
fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Capitalize the first letter of a word.
fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}
