//! core::report
//!
//! Failure report resolution and issue rendering.
//!
//! # Body Sources
//!
//! The raw report body comes from exactly one source, in priority order:
//! 1. An explicit body (`ISSUE_BODY`)
//! 2. The contents of a body file (`ISSUE_BODY_FILE`)
//! 3. The captured `stderr.txt` and `stdout.txt` of the failed build
//!
//! # Rendering
//!
//! The raw body is fingerprinted first and only then wrapped in the issue
//! template. The rendered body always ends with the checksum line.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::config::ReporterConfig;
use super::fingerprint::Fingerprint;
use super::platform::Platform;

/// Captured standard output of the failed build.
pub const STDOUT_FILE: &str = "stdout.txt";

/// Captured standard error of the failed build.
pub const STDERR_FILE: &str = "stderr.txt";

/// Label attached to every filed issue.
pub const CI_LABEL: &str = "ci";

/// Errors from resolving the report body.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("failed to read report body from '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Where the raw report body comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodySource {
    /// Body supplied verbatim
    Inline(String),
    /// Body read from a file
    File(PathBuf),
    /// Body assembled from captured build streams
    Streams { stdout: PathBuf, stderr: PathBuf },
}

impl BodySource {
    /// Pick the body source for `config`, resolving relative paths against `cwd`.
    pub fn select(config: &ReporterConfig, cwd: &Path) -> Self {
        if let Some(body) = &config.body_override {
            BodySource::Inline(body.clone())
        } else if let Some(path) = &config.body_file {
            BodySource::File(cwd.join(path))
        } else {
            BodySource::Streams {
                stdout: cwd.join(STDOUT_FILE),
                stderr: cwd.join(STDERR_FILE),
            }
        }
    }

    /// Produce the raw report body.
    pub fn read(&self) -> Result<String, BodyError> {
        match self {
            BodySource::Inline(body) => Ok(body.clone()),
            BodySource::File(path) => read_file(path),
            BodySource::Streams { stdout, stderr } => {
                let stdout = read_file(stdout)?;
                let stderr = read_file(stderr)?;
                Ok(streams_body(&stdout, &stderr))
            }
        }
    }

    /// Short description for log output.
    pub fn describe(&self) -> String {
        match self {
            BodySource::Inline(_) => "inline body".to_string(),
            BodySource::File(path) => format!("body file {}", path.display()),
            BodySource::Streams { stdout, stderr } => {
                format!("captured streams {} and {}", stderr.display(), stdout.display())
            }
        }
    }
}

fn read_file(path: &Path) -> Result<String, BodyError> {
    fs::read_to_string(path).map_err(|source| BodyError::ReadError {
        path: path.to_path_buf(),
        source,
    })
}

/// Combine captured build streams into one report body.
///
/// The separators close the fence opened by the issue template around
/// stderr and open a second one for stdout.
pub fn streams_body(stdout: &str, stderr: &str) -> String {
    format!("{}\n```\n\nFurther details:\n```\n{}", stderr, stdout)
}

/// A fully rendered issue, ready to be filed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
    pub fingerprint: Fingerprint,
}

impl Report {
    /// Fingerprint `raw_body` and render it into an issue.
    pub fn render(config: &ReporterConfig, platform: &Platform, raw_body: &str) -> Self {
        let fingerprint = Fingerprint::for_platform(raw_body, platform);

        let title = format!(
            "CI Future Compatibility Warning: {} ({}/{})",
            config.issue_title, platform.os, platform.machine
        );

        let body = format!(
            "A recent GitHub action has discovered a possible future incompatibility with `{project}`!\n\
             The pipeline triggered by the commit {sha} did not compile with some latest version of its dependencies or tools.\n\
             See the action [{run_id}]({run_url}) for more details. The run was performed on `{summary}`.\n\
             Build log details:\n\n```\n{raw_body}\n```\n\n{checksum}",
            project = config.project(),
            sha = config.sha,
            run_id = config.run_id,
            run_url = config.run_url(),
            summary = platform.summary,
            raw_body = raw_body,
            checksum = fingerprint.checksum_line(),
        );

        Self {
            title,
            body,
            labels: vec![CI_LABEL.to_string()],
            fingerprint,
        }
    }
}
