//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse command-line flags and initialize logging
//! - Load configuration from the environment
//! - Run the [`crate::engine`] reporter against GitHub
//! - Turn the outcome into console output and an exit code
//!
//! # Exit Codes
//!
//! `0` when an issue was created or a duplicate was found (or on `--dry-run`),
//! `1` on any failure.

pub mod args;

pub use args::Cli;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

use crate::core::config::ReporterConfig;
use crate::core::platform::Platform;
use crate::engine::{Outcome, ReportError, Reporter};
use crate::forge::github::GitHubTracker;
use crate::forge::TrackerError;
use crate::ui::output::{color_enabled, Console, Verbosity};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    let console = Console::new(
        Verbosity::from_flags(cli.quiet, cli.debug),
        color_enabled(cli.no_color, std::env::var("NO_COLOR").ok().as_deref()),
    );

    match execute(&cli, &console) {
        Ok(code) => code,
        Err(err) => {
            console.error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` is honored unless `--debug` is given.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("compat_reporter=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Execute one report.
///
/// Configuration and body errors are returned; tracker failures are printed
/// here, with their payload, and mapped to a failing exit code.
fn execute(cli: &Cli, console: &Console) -> Result<ExitCode> {
    let config = ReporterConfig::from_env().context("invalid configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if config.body_override.is_some() && config.body_file.is_some() {
        console.warn("ISSUE_BODY is set; ignoring ISSUE_BODY_FILE");
    }

    let cwd = cli.cwd.clone().unwrap_or_else(|| PathBuf::from("."));
    let reporter = Reporter::new(&config, Platform::detect(), cwd);
    console.debug(format!(
        "running on `{}` from {}",
        reporter.platform().summary,
        reporter.cwd().display()
    ));

    if cli.dry_run {
        let report = reporter.prepare()?;
        console.print(format!("Title: {}", report.title));
        console.print(format!("Labels: {}", report.labels.join(", ")));
        console.print("");
        console.print(&report.body);
        return Ok(ExitCode::SUCCESS);
    }

    let tracker = GitHubTracker::with_api_base(
        config.token.clone(),
        config.repository.clone(),
        config.api_base(),
    );

    let rt = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let repo_link = console.link(&config.repository_url());

    match rt.block_on(reporter.run(&tracker)) {
        Ok(Outcome::Duplicate {
            fingerprint,
            issue_number,
        }) => {
            console.success(format!(
                "Issue with the same checksum {} already exists on {}!",
                fingerprint, repo_link
            ));
            console.debug(format!("matching issue: #{}", issue_number));
            Ok(ExitCode::SUCCESS)
        }
        Ok(Outcome::Created { issue, .. }) => {
            console.success(format!("Issue successfully created on {}!", repo_link));
            let payload = serde_json::to_string_pretty(&issue.payload)
                .unwrap_or_else(|_| issue.payload.to_string());
            console.print(payload);
            Ok(ExitCode::SUCCESS)
        }
        Err(ReportError::Body(err)) => Err(err.into()),
        Err(ReportError::ListIssues(err)) => {
            console.error(format!("Couldn't check issues on {}!", repo_link));
            print_tracker_error(console, &err);
            Ok(ExitCode::FAILURE)
        }
        Err(ReportError::CreateIssue(err)) => {
            console.error(format!("Couldn't create new issue on {}!", repo_link));
            print_tracker_error(console, &err);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_tracker_error(console: &Console, err: &TrackerError) {
    match err {
        TrackerError::UnexpectedStatus { status, url, .. } => {
            console.error_detail(format!("Status code {} for '{}'.", status, url));
        }
        other => console.error_detail(other),
    }
    if let Some(payload) = err.payload_pretty() {
        console.error_detail(payload);
    }
}
