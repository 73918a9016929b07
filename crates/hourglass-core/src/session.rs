//! Session partitioning algorithm.
//!
//! Clusters timestamped events into work sessions: events separated by more
//! than the configured gap start a new session, everything closer belongs to
//! the same one. The scan is a single ordered pass, so each event lands in
//! exactly one session and sessions come out in chronological order.

use chrono::{DateTime, FixedOffset};

/// Configuration for session partitioning and work-hour estimation.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum gap between consecutive events in the same session, in hours.
    /// Events separated by more than this start a new session. Default: 2.0.
    pub max_gap_hours: f64,

    /// Minimum duration credited to a session, in minutes. Shorter sessions
    /// are raised to this floor; longer ones keep their real duration.
    /// Default: 15.0.
    pub min_session_minutes: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_gap_hours: 2.0,
            min_session_minutes: 15.0,
        }
    }
}

/// An event suitable for session partitioning.
///
/// This trait allows partitioning to work with different event
/// representations (e.g., `Commit` from hourglass-git, or test fixtures).
pub trait SessionEvent {
    /// Returns the event's unique ID.
    fn event_id(&self) -> &str;

    /// Returns the event's timestamp.
    ///
    /// The offset is preserved so daily bucketing can happen in the
    /// author's local time rather than UTC.
    fn timestamp(&self) -> DateTime<FixedOffset>;

    /// Returns the event's author.
    fn author(&self) -> &str;

    /// Returns the event's one-line label (e.g., a commit subject).
    fn label(&self) -> &str;
}

/// A contiguous run of events treated as one block of work.
#[derive(Debug, Clone, PartialEq)]
pub struct Session<E> {
    /// Timestamp of the first event in this session.
    pub start: DateTime<FixedOffset>,

    /// Timestamp of the last event in this session.
    pub end: DateTime<FixedOffset>,

    /// The events themselves, ordered by timestamp ascending.
    pub events: Vec<E>,
}

impl<E> Session<E> {
    /// Wall-clock span from first to last event, in fractional hours.
    ///
    /// A single-event session has duration 0.
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_milliseconds() as f64 / 3_600_000.0
    }

    /// Number of events in this session.
    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}

/// Partition events into sessions based on temporal gaps.
///
/// # Algorithm
///
/// 1. Sort events by timestamp (stable, so events with equal timestamps
///    keep their input order)
/// 2. Scan in order, extending the current session while the gap from its
///    last event stays within `config.max_gap_hours`
/// 3. Close the current session and open a new one when the gap exceeds
///    the threshold
///
/// Gaps are compared on the absolute instant, so events carrying different
/// UTC offsets still cluster correctly.
///
/// # Arguments
///
/// * `events` - Events to partition (must implement [`SessionEvent`])
/// * `config` - Partitioning configuration
///
/// # Returns
///
/// Sessions in chronological order. Empty input produces an empty list.
pub fn partition_into_sessions<E: SessionEvent>(
    mut events: Vec<E>,
    config: &SessionConfig,
) -> Vec<Session<E>> {
    events.sort_by_key(|e| e.timestamp());

    let mut sessions: Vec<Session<E>> = Vec::new();

    for event in events {
        let ts = event.timestamp();

        match sessions.last_mut() {
            Some(current) if gap_hours(current.end, ts) <= config.max_gap_hours => {
                current.end = ts;
                current.events.push(event);
            }
            _ => sessions.push(Session {
                start: ts,
                end: ts,
                events: vec![event],
            }),
        }
    }

    sessions
}

/// Gap between two timestamps in fractional hours.
#[allow(clippy::cast_precision_loss)]
fn gap_hours(from: DateTime<FixedOffset>, to: DateTime<FixedOffset>) -> f64 {
    (to - from).num_milliseconds() as f64 / 3_600_000.0
}
