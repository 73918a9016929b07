//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use hourglass_core::SessionConfig;
use hourglass_triage::TriageConfig;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Session partitioning thresholds.
    pub session: SessionConfig,
    /// Report defaults applied when flags are omitted.
    pub report: ReportConfig,
    /// Dashboard paths and file activity scan policy.
    pub dashboard: DashboardConfig,
    /// Triage keyword lists.
    pub triage: TriageConfig,
}

/// Defaults for the `report` command.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Restrict reports to this author unless `--author` is given.
    pub author: Option<String>,
    /// Default `--since` filter passed through to `git log`.
    pub since: Option<String>,
}

/// Settings for the `dashboard` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Location of the manual work log.
    pub work_log: PathBuf,
    /// How many days back the file activity scan looks.
    pub activity_days: u64,
    /// File extensions counted as source activity.
    pub activity_extensions: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            work_log: data_dir.join("work-log.txt"),
            activity_days: 7,
            activity_extensions: ["js", "ts", "tsx", "rs", "py", "yml", "yaml", "json", "md"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (HOURGLASS_*, sections split on __)
        figment = figment.merge(Env::prefixed("HOURGLASS_").split("__"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for hourglass.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hourglass"))
}

/// Returns the platform-specific data directory for hourglass.
///
/// On Linux: `~/.local/share/hourglass`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("hourglass"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_data_path_returns_some() {
        assert!(dirs_data_path().is_some());
    }

    #[test]
    fn test_dirs_data_path_ends_with_hourglass() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "hourglass");
    }

    #[test]
    fn test_default_config_thresholds() {
        let config = Config::default();
        assert!((config.session.max_gap_hours - 2.0).abs() < f64::EPSILON);
        assert!((config.session.min_session_minutes - 15.0).abs() < f64::EPSILON);
        assert_eq!(config.dashboard.activity_days, 7);
        assert_eq!(config.dashboard.work_log.file_name().unwrap(), "work-log.txt");
    }

    #[test]
    fn test_default_config_has_no_author_filter() {
        let config = Config::default();
        assert!(config.report.author.is_none());
        assert!(config.report.since.is_none());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "[session]\nmax_gap_hours = 1.0\n\n[report]\nauthor = \"alice\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();

        assert!((config.session.max_gap_hours - 1.0).abs() < f64::EPSILON);
        // Unset keys keep their defaults
        assert!((config.session.min_session_minutes - 15.0).abs() < f64::EPSILON);
        assert_eq!(config.report.author.as_deref(), Some("alice"));
    }
}
