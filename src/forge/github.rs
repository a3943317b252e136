//! forge::github
//!
//! GitHub issue tracker implementation using the REST API.
//!
//! # Design
//!
//! Two endpoints are used:
//! - `GET /repos/{owner}/{repo}/issues` with GitHub's default filtering
//!   (open issues, first page)
//! - `POST /repos/{owner}/{repo}/issues`
//!
//! Requests authenticate with `Authorization: token {token}` and ask for the
//! v3 media type. Listing succeeds only on 200 and creation only on 201; any
//! other status is returned as [`TrackerError::UnexpectedStatus`] with the raw
//! response body attached.
//!
//! # Example
//!
//! ```ignore
//! use compat_reporter::core::config::Repository;
//! use compat_reporter::forge::github::GitHubTracker;
//! use compat_reporter::forge::IssueTracker;
//!
//! let repo = Repository::parse("acme/widgets")?;
//! let tracker = GitHubTracker::new("ghp_xxx", repo);
//! let open = tracker.list_issues().await?;
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use tracing::debug;

use super::traits::{CreateIssueRequest, CreatedIssue, Issue, IssueTracker, TrackerError};
use crate::core::config::{Repository, DEFAULT_API_BASE};

/// Media type requested from the REST API.
const ACCEPT_VALUE: &str = "application/vnd.github.v3+json";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = concat!("compat-reporter/", env!("CARGO_PKG_VERSION"));

/// GitHub issue tracker for a single repository.
pub struct GitHubTracker {
    /// HTTP client for making requests
    client: Client,
    /// Personal access token or `GITHUB_TOKEN`
    token: String,
    /// Target repository
    repository: Repository,
    /// API base URL (configurable for GitHub Enterprise)
    api_base: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GitHubTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubTracker")
            .field("has_token", &!self.token.is_empty())
            .field("repository", &self.repository)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GitHubTracker {
    /// Create a tracker for `repository` on github.com.
    pub fn new(token: impl Into<String>, repository: Repository) -> Self {
        Self::with_api_base(token, repository, DEFAULT_API_BASE)
    }

    /// Create a tracker with a custom API base URL.
    ///
    /// Use this for GitHub Enterprise installations
    /// (e.g., `https://github.example.com/api/v3`).
    pub fn with_api_base(
        token: impl Into<String>,
        repository: Repository,
        api_base: impl Into<String>,
    ) -> Self {
        let api_base: String = api_base.into();
        Self {
            client: Client::new(),
            token: token.into(),
            repository,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// URL of the repository's issues endpoint.
    pub fn issues_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/issues",
            self.api_base,
            self.repository.owner(),
            self.repository.name()
        )
    }

    /// Build common headers for API requests.
    fn headers(&self) -> Result<HeaderMap, TrackerError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("token {}", self.token))
            .map_err(|_| TrackerError::InvalidHeader("token is not a valid header value".into()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        Ok(headers)
    }

    /// Read the body of `response`, failing unless it carries `expected`.
    async fn expect_status(
        response: Response,
        expected: StatusCode,
        url: &str,
    ) -> Result<String, TrackerError> {
        let status = response.status();
        let payload = response
            .text()
            .await
            .map_err(|e| TrackerError::NetworkError(e.to_string()))?;

        debug!(%status, url, bytes = payload.len(), "tracker response");

        if status == expected {
            Ok(payload)
        } else {
            Err(TrackerError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
                payload,
            })
        }
    }
}

#[async_trait]
impl IssueTracker for GitHubTracker {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn list_issues(&self) -> Result<Vec<Issue>, TrackerError> {
        let url = self.issues_url();
        debug!(url = %url, "listing issues");

        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await
            .map_err(|e| TrackerError::NetworkError(e.to_string()))?;

        let payload = Self::expect_status(response, StatusCode::OK, &url).await?;

        serde_json::from_str(&payload)
            .map_err(|e| TrackerError::DecodeError(format!("issue listing: {}", e)))
    }

    async fn create_issue(
        &self,
        request: CreateIssueRequest,
    ) -> Result<CreatedIssue, TrackerError> {
        let url = self.issues_url();
        debug!(url = %url, title = %request.title, "creating issue");

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&request)
            .send()
            .await
            .map_err(|e| TrackerError::NetworkError(e.to_string()))?;

        let payload = Self::expect_status(response, StatusCode::CREATED, &url).await?;

        let value = if payload.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&payload)
                .map_err(|e| TrackerError::DecodeError(format!("created issue: {}", e)))?
        };

        Ok(CreatedIssue::from_payload(value))
    }
}
