//! CLI subcommand implementations.

pub mod dashboard;
pub mod log;
pub mod report;
pub mod triage;
