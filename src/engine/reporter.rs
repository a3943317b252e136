//! engine::reporter
//!
//! The reporting flow: resolve the body, fingerprint it, look for a
//! duplicate among open issues, file a new issue if none exists.
//!
//! # Flow
//!
//! ```text
//! BodySource -> Report (fingerprint + render) -> list issues
//!     -> duplicate found: done
//!     -> otherwise: create issue
//! ```
//!
//! Each step runs at most once. A failed tracker call ends the flow with a
//! [`ReportError`]; nothing is retried.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::core::config::ReporterConfig;
use crate::core::fingerprint::Fingerprint;
use crate::core::platform::Platform;
use crate::core::report::{BodyError, BodySource, Report};
use crate::forge::{CreateIssueRequest, CreatedIssue, Issue, IssueTracker, TrackerError};

/// Errors from the reporting flow.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Body(#[from] BodyError),

    #[error("couldn't check issues: {0}")]
    ListIssues(TrackerError),

    #[error("couldn't create new issue: {0}")]
    CreateIssue(TrackerError),
}

impl ReportError {
    /// The tracker error behind this failure, if any.
    pub fn tracker_error(&self) -> Option<&TrackerError> {
        match self {
            ReportError::ListIssues(e) | ReportError::CreateIssue(e) => Some(e),
            ReportError::Body(_) => None,
        }
    }
}

/// How a report run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// An open issue already carries this fingerprint.
    Duplicate {
        fingerprint: Fingerprint,
        issue_number: u64,
    },
    /// A new issue was filed.
    Created {
        fingerprint: Fingerprint,
        issue: CreatedIssue,
    },
}

impl Outcome {
    pub fn fingerprint(&self) -> &Fingerprint {
        match self {
            Outcome::Duplicate { fingerprint, .. } | Outcome::Created { fingerprint, .. } => {
                fingerprint
            }
        }
    }
}

/// Files deduplicated failure reports.
#[derive(Debug)]
pub struct Reporter<'a> {
    config: &'a ReporterConfig,
    platform: Platform,
    cwd: PathBuf,
}

impl<'a> Reporter<'a> {
    /// Create a reporter that resolves relative paths against `cwd`.
    pub fn new(config: &'a ReporterConfig, platform: Platform, cwd: impl Into<PathBuf>) -> Self {
        Self {
            config,
            platform,
            cwd: cwd.into(),
        }
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Where the raw body will be read from.
    pub fn body_source(&self) -> BodySource {
        BodySource::select(self.config, &self.cwd)
    }

    /// Resolve the body and render the issue without touching the tracker.
    pub fn prepare(&self) -> Result<Report, ReportError> {
        let source = self.body_source();
        debug!(source = %source.describe(), "resolving report body");

        let raw_body = source.read()?;
        let report = Report::render(self.config, &self.platform, &raw_body);

        debug!(
            fingerprint = %report.fingerprint,
            os = %self.platform.os,
            machine = %self.platform.machine,
            "computed fingerprint"
        );
        Ok(report)
    }

    /// Run the full flow against `tracker`.
    pub async fn run(&self, tracker: &dyn IssueTracker) -> Result<Outcome, ReportError> {
        let report = self.prepare()?;
        self.submit(tracker, report).await
    }

    /// File an already rendered report unless it duplicates an open issue.
    pub async fn submit(
        &self,
        tracker: &dyn IssueTracker,
        report: Report,
    ) -> Result<Outcome, ReportError> {
        let issues = tracker
            .list_issues()
            .await
            .map_err(ReportError::ListIssues)?;
        debug!(count = issues.len(), tracker = tracker.name(), "fetched open issues");

        if let Some(existing) = find_duplicate(&issues, &report.fingerprint) {
            info!(
                number = existing.number,
                fingerprint = %report.fingerprint,
                "duplicate issue found"
            );
            return Ok(Outcome::Duplicate {
                fingerprint: report.fingerprint,
                issue_number: existing.number,
            });
        }

        let request = CreateIssueRequest {
            title: report.title,
            body: report.body,
            labels: report.labels,
        };
        let issue = tracker
            .create_issue(request)
            .await
            .map_err(ReportError::CreateIssue)?;
        info!(number = ?issue.number, fingerprint = %report.fingerprint, "issue created");

        Ok(Outcome::Created {
            fingerprint: report.fingerprint,
            issue,
        })
    }
}

/// Find the first issue whose body was filed for `fingerprint`.
pub fn find_duplicate<'i>(issues: &'i [Issue], fingerprint: &Fingerprint) -> Option<&'i Issue> {
    issues.iter().find(|issue| {
        issue
            .body
            .as_deref()
            .is_some_and(|body| fingerprint.matches_body(body))
    })
}
