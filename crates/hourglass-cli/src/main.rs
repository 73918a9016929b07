use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hourglass_cli::commands::{dashboard, log, report, triage};
use hourglass_cli::{Cli, Commands, Config};
use hourglass_git::LogFilter;

/// Load configuration, layering defaults, config files, and environment.
fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Report {
            repo,
            author,
            since,
            until,
            max_gap,
            min_session,
            detailed,
            json,
        }) => {
            let config = load_config(cli.config.as_deref())?;

            let mut session = config.session;
            if let Some(hours) = max_gap {
                session.max_gap_hours = *hours;
            }
            if let Some(minutes) = min_session {
                session.min_session_minutes = *minutes;
            }

            let filter = LogFilter {
                author: author.clone().or_else(|| config.report.author.clone()),
                since: since.clone().or_else(|| config.report.since.clone()),
                until: until.clone(),
            };

            report::run(&mut stdout, repo, &filter, &session, *detailed, *json)?;
        }
        Some(Commands::Dashboard { repo }) => {
            let config = load_config(cli.config.as_deref())?;
            dashboard::run(&mut stdout, repo, &config)?;
        }
        Some(Commands::Log { note, hours }) => {
            let config = load_config(cli.config.as_deref())?;
            log::run(&mut stdout, note, *hours, &config.dashboard.work_log)?;
        }
        Some(Commands::Triage {
            input,
            mode,
            categories,
            json,
        }) => {
            let config = load_config(cli.config.as_deref())?;
            match input {
                Some(path) => {
                    let file = std::fs::File::open(path)
                        .with_context(|| format!("failed to open {}", path.display()))?;
                    triage::run(
                        &mut stdout,
                        BufReader::new(file),
                        *mode,
                        *categories,
                        *json,
                        &config.triage,
                    )?;
                }
                None => {
                    triage::run(
                        &mut stdout,
                        std::io::stdin().lock(),
                        *mode,
                        *categories,
                        *json,
                        &config.triage,
                    )?;
                }
            }
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
