//! Core domain logic for the work-hour estimator.
//!
//! This crate contains the fundamental types and logic for:
//! - Session partitioning: clustering timestamped events into work sessions
//!   based on temporal proximity
//! - Hour estimation: crediting each session its duration (with a minimum
//!   floor) and bucketing the totals per calendar day

pub mod hours;
pub mod session;

pub use hours::{WorkHours, compute_work_hours};
pub use session::{Session, SessionConfig, SessionEvent, partition_into_sessions};
