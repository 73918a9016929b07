//! Work-hour estimation.
//!
//! Turns partitioned sessions into an estimated total. Each session is
//! credited its wall-clock duration with a minimum floor, so a lone commit
//! still counts for something, and the floor never shortens a long session.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::session::{Session, SessionConfig};

/// Estimated work hours computed from a session list.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkHours {
    /// Total estimated hours across all sessions.
    pub total_hours: f64,

    /// Number of sessions.
    pub session_count: usize,

    /// Estimated hours per calendar date. A session's hours are attributed
    /// entirely to the date of its start, in the timestamp's own offset,
    /// even when the session crosses midnight. Values sum to `total_hours`.
    pub daily_hours: BTreeMap<NaiveDate, f64>,
}

/// Estimate work hours for a set of sessions.
///
/// Each session contributes `max(duration, min_session_minutes / 60)` hours
/// to the total and to its start date's daily bucket.
pub fn compute_work_hours<E>(sessions: &[Session<E>], config: &SessionConfig) -> WorkHours {
    let floor_hours = config.min_session_minutes / 60.0;

    let mut total_hours = 0.0;
    let mut daily_hours: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for session in sessions {
        let hours = session.duration_hours().max(floor_hours);
        total_hours += hours;
        *daily_hours.entry(session.start.date_naive()).or_insert(0.0) += hours;
    }

    WorkHours {
        total_hours,
        session_count: sessions.len(),
        daily_hours,
    }
}
