//! core::config
//!
//! Reporter configuration loaded from the process environment.
//!
//! # Overview
//!
//! The reporter is driven entirely by environment variables set by the CI
//! runner. They are read once at startup into a [`ReporterConfig`] and never
//! consulted again.
//!
//! # Variables
//!
//! Required:
//! - `GITHUB_REPOSITORY` (`OWNER/NAME`)
//! - `GITHUB_RUN_ID`
//! - `GITHUB_SHA`
//! - `ISSUE_TITLE`
//! - `GITHUB_TOKEN`
//!
//! Optional:
//! - `ISSUE_BODY`: explicit report body
//! - `ISSUE_BODY_FILE`: path to a file holding the report body
//! - `ISSUE_PROJECT`: project named in the issue text (defaults to the repo name)
//! - `GITHUB_API_URL`: REST API base (defaults to `https://api.github.com`)
//! - `GITHUB_SERVER_URL`: web base used for links (defaults to `https://github.com`)
//!
//! # Example
//!
//! ```
//! use compat_reporter::core::config::ReporterConfig;
//! use std::collections::HashMap;
//!
//! let env: HashMap<&str, &str> = [
//!     ("GITHUB_REPOSITORY", "acme/widgets"),
//!     ("GITHUB_RUN_ID", "42"),
//!     ("GITHUB_SHA", "deadbeef"),
//!     ("ISSUE_TITLE", "nightly"),
//!     ("GITHUB_TOKEN", "ghp_secret"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let config = ReporterConfig::from_lookup(|key| env.get(key).map(|v| v.to_string())).unwrap();
//! assert_eq!(config.repository.owner(), "acme");
//! assert_eq!(config.api_base(), "https://api.github.com");
//! ```

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Default GitHub REST API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default GitHub web base URL.
pub const DEFAULT_SERVER_URL: &str = "https://github.com";

pub const ENV_REPOSITORY: &str = "GITHUB_REPOSITORY";
pub const ENV_RUN_ID: &str = "GITHUB_RUN_ID";
pub const ENV_SHA: &str = "GITHUB_SHA";
pub const ENV_ISSUE_TITLE: &str = "ISSUE_TITLE";
pub const ENV_TOKEN: &str = "GITHUB_TOKEN";
pub const ENV_ISSUE_BODY: &str = "ISSUE_BODY";
pub const ENV_ISSUE_BODY_FILE: &str = "ISSUE_BODY_FILE";
pub const ENV_ISSUE_PROJECT: &str = "ISSUE_PROJECT";
pub const ENV_API_URL: &str = "GITHUB_API_URL";
pub const ENV_SERVER_URL: &str = "GITHUB_SERVER_URL";

/// Errors from configuration loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("invalid repository '{0}': expected OWNER/NAME")]
    InvalidRepository(String),
}

/// A repository identifier in `OWNER/NAME` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    owner: String,
    name: String,
}

impl Repository {
    /// Parse an `OWNER/NAME` string.
    ///
    /// # Example
    ///
    /// ```
    /// use compat_reporter::core::config::Repository;
    ///
    /// let repo = Repository::parse("acme/widgets").unwrap();
    /// assert_eq!(repo.name(), "widgets");
    /// assert!(Repository::parse("acme").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidRepository(s.to_string());
        let (owner, name) = s.split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// Get the repository owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Get the repository name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Everything the reporter needs from its environment.
#[derive(Clone)]
pub struct ReporterConfig {
    pub repository: Repository,
    pub run_id: String,
    pub sha: String,
    pub issue_title: String,
    pub token: String,
    /// Explicit report body (`ISSUE_BODY`)
    pub body_override: Option<String>,
    /// Report body file (`ISSUE_BODY_FILE`)
    pub body_file: Option<PathBuf>,
    project: Option<String>,
    api_base: Option<String>,
    server_url: Option<String>,
}

// Custom Debug to avoid exposing the token
impl fmt::Debug for ReporterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReporterConfig")
            .field("repository", &self.repository)
            .field("run_id", &self.run_id)
            .field("sha", &self.sha)
            .field("issue_title", &self.issue_title)
            .field("has_token", &!self.token.is_empty())
            .field("has_body_override", &self.body_override.is_some())
            .field("body_file", &self.body_file)
            .field("project", &self.project)
            .field("api_base", &self.api_base)
            .field("server_url", &self.server_url)
            .finish()
    }
}

impl ReporterConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::MissingVar(key));

        let repository = Repository::parse(&required(ENV_REPOSITORY)?)?;

        Ok(Self {
            repository,
            run_id: required(ENV_RUN_ID)?,
            sha: required(ENV_SHA)?,
            issue_title: required(ENV_ISSUE_TITLE)?,
            token: required(ENV_TOKEN)?,
            body_override: lookup(ENV_ISSUE_BODY),
            body_file: lookup(ENV_ISSUE_BODY_FILE).map(PathBuf::from),
            project: non_empty(lookup(ENV_ISSUE_PROJECT)),
            api_base: non_empty(lookup(ENV_API_URL)),
            server_url: non_empty(lookup(ENV_SERVER_URL)),
        })
    }

    /// REST API base, without a trailing slash.
    pub fn api_base(&self) -> &str {
        self.api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
    }

    /// Web base used for repository and run links, without a trailing slash.
    pub fn server_url(&self) -> &str {
        self.server_url
            .as_deref()
            .unwrap_or(DEFAULT_SERVER_URL)
            .trim_end_matches('/')
    }

    /// Project named in the issue text.
    pub fn project(&self) -> &str {
        self.project
            .as_deref()
            .unwrap_or_else(|| self.repository.name())
    }

    /// Web URL of the repository.
    pub fn repository_url(&self) -> String {
        format!("{}/{}", self.server_url(), self.repository)
    }

    /// Web URL of the workflow run that triggered this report.
    pub fn run_url(&self) -> String {
        format!("{}/actions/runs/{}", self.repository_url(), self.run_id)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
