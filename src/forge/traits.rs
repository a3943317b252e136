//! forge::traits
//!
//! Issue tracker trait definition and request/response types.
//!
//! # Design
//!
//! The `IssueTracker` trait is async because tracker operations involve
//! network I/O. The reporter needs exactly two of them: listing the open
//! issues of a repository and filing a new one.
//!
//! Implementations never retry. A failed call surfaces as a
//! [`TrackerError`] and the caller decides what to do with it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from tracker operations.
#[derive(Debug, Clone, Error)]
pub enum TrackerError {
    /// The tracker answered with a status other than the expected one.
    #[error("unexpected status {status} for '{url}'")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
        /// Raw response body
        payload: String,
    },

    /// A request header could not be built (e.g. a malformed token).
    #[error("invalid request header: {0}")]
    InvalidHeader(String),

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    DecodeError(String),
}

impl TrackerError {
    /// HTTP status code, if the tracker answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            TrackerError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response payload formatted for display.
    ///
    /// JSON payloads are pretty-printed with two-space indentation; anything
    /// else is returned verbatim.
    pub fn payload_pretty(&self) -> Option<String> {
        match self {
            TrackerError::UnexpectedStatus { payload, .. } => Some(pretty_json(payload)),
            _ => None,
        }
    }
}

/// Pretty-print `raw` if it parses as JSON.
pub fn pretty_json(raw: &str) -> String {
    serde_json::from_str::<serde_json::Value>(raw)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| raw.to_string())
}

/// An issue as returned by the tracker's listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    /// Issue body; the tracker reports `null` for issues created without one
    #[serde(default)]
    pub body: Option<String>,
}

/// Request to file a new issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateIssueRequest {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
}

/// A freshly created issue.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedIssue {
    /// Issue number, if the tracker reported one
    pub number: Option<u64>,
    /// Web URL of the issue, if the tracker reported one
    pub url: Option<String>,
    /// Full response payload
    pub payload: serde_json::Value,
}

impl CreatedIssue {
    /// Build from the tracker's creation response.
    pub fn from_payload(payload: serde_json::Value) -> Self {
        Self {
            number: payload.get("number").and_then(|n| n.as_u64()),
            url: payload
                .get("html_url")
                .and_then(|u| u.as_str())
                .map(String::from),
            payload,
        }
    }
}

/// The IssueTracker trait for interacting with a remote issue tracker.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Example
///
/// ```ignore
/// use compat_reporter::forge::{CreateIssueRequest, IssueTracker};
///
/// async fn file(tracker: &dyn IssueTracker) -> Result<(), TrackerError> {
///     let open = tracker.list_issues().await?;
///     if open.is_empty() {
///         tracker.create_issue(CreateIssueRequest {
///             title: "Build broke".to_string(),
///             body: "details".to_string(),
///             labels: vec!["ci".to_string()],
///         }).await?;
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Get the tracker name (e.g., "github").
    fn name(&self) -> &'static str;

    /// List open issues with the tracker's default filtering.
    ///
    /// # Errors
    ///
    /// - `UnexpectedStatus` unless the tracker answers 200
    /// - `DecodeError` if the listing is not a list of issues
    async fn list_issues(&self) -> Result<Vec<Issue>, TrackerError>;

    /// File a new issue.
    ///
    /// # Errors
    ///
    /// - `UnexpectedStatus` unless the tracker answers 201
    async fn create_issue(&self, request: CreateIssueRequest)
        -> Result<CreatedIssue, TrackerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_error_display() {
        let err = TrackerError::UnexpectedStatus {
            status: 500,
            url: "https://api.github.com/repos/acme/widgets/issues".into(),
            payload: "{}".into(),
        };
        assert_eq!(
            err.to_string(),
            "unexpected status 500 for 'https://api.github.com/repos/acme/widgets/issues'"
        );
        assert_eq!(err.status(), Some(500));

        let err = TrackerError::NetworkError("connection refused".into());
        assert_eq!(err.to_string(), "network error: connection refused");
        assert_eq!(err.status(), None);
        assert_eq!(err.payload_pretty(), None);
    }

    #[test]
    fn payload_pretty_indents_json() {
        let err = TrackerError::UnexpectedStatus {
            status: 422,
            url: String::new(),
            payload: r#"{"message":"Validation Failed"}"#.into(),
        };
        assert_eq!(
            err.payload_pretty().unwrap(),
            "{\n  \"message\": \"Validation Failed\"\n}"
        );
    }

    #[test]
    fn payload_pretty_keeps_non_json() {
        assert_eq!(pretty_json("<html>bad gateway</html>"), "<html>bad gateway</html>");
    }

    #[test]
    fn issue_tolerates_null_body() {
        let issue: Issue =
            serde_json::from_str(r#"{"number": 3, "title": "t", "body": null}"#).unwrap();
        assert_eq!(issue.body, None);

        let issue: Issue = serde_json::from_str(r#"{"number": 4, "title": "t"}"#).unwrap();
        assert_eq!(issue.body, None);
    }

    #[test]
    fn create_request_serializes_labels() {
        let request = CreateIssueRequest {
            title: "t".into(),
            body: "b".into(),
            labels: vec!["ci".into()],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"title": "t", "body": "b", "labels": ["ci"]})
        );
    }

    #[test]
    fn created_issue_extracts_number_and_url() {
        let created = CreatedIssue::from_payload(serde_json::json!({
            "number": 12,
            "html_url": "https://github.com/acme/widgets/issues/12",
        }));
        assert_eq!(created.number, Some(12));
        assert_eq!(
            created.url.as_deref(),
            Some("https://github.com/acme/widgets/issues/12")
        );
    }
}
