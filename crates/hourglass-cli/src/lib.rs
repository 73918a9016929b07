//! Work-hour estimation and triage CLI library.
//!
//! This crate provides the CLI interface for hourglass.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::{Config, DashboardConfig, ReportConfig};
