//! forge::mock
//!
//! Mock issue tracker for deterministic testing.
//!
//! # Design
//!
//! The mock tracker stores issues in memory, records every call and can be
//! configured to fail a specific operation.
//!
//! # Example
//!
//! ```
//! use compat_reporter::forge::mock::MockTracker;
//! use compat_reporter::forge::{CreateIssueRequest, IssueTracker};
//!
//! # tokio_test::block_on(async {
//! let tracker = MockTracker::new();
//!
//! let created = tracker.create_issue(CreateIssueRequest {
//!     title: "Build broke".to_string(),
//!     body: "details".to_string(),
//!     labels: vec!["ci".to_string()],
//! }).await.unwrap();
//!
//! assert_eq!(created.number, Some(1));
//! assert_eq!(tracker.list_issues().await.unwrap().len(), 1);
//! # });
//! ```

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

use super::traits::{CreateIssueRequest, CreatedIssue, Issue, IssueTracker, TrackerError};

/// Mock tracker for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone)]
pub struct MockTracker {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockTrackerInner>>,
}

/// Internal mutable state.
#[derive(Debug)]
struct MockTrackerInner {
    /// Stored issues in creation order.
    issues: Vec<Issue>,
    /// Next issue number to assign.
    next_number: u64,
    /// Operation to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail list_issues with the given error.
    ListIssues(TrackerError),
    /// Fail create_issue with the given error.
    CreateIssue(TrackerError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    ListIssues,
    CreateIssue(CreateIssueRequest),
}

impl MockTracker {
    /// Create a new empty mock tracker.
    pub fn new() -> Self {
        Self::with_issues(Vec::new())
    }

    /// Create a mock tracker with pre-existing issues.
    pub fn with_issues(issues: Vec<Issue>) -> Self {
        let next_number = issues.iter().map(|i| i.number).max().unwrap_or(0) + 1;
        Self {
            inner: Arc::new(Mutex::new(MockTrackerInner {
                issues,
                next_number,
                fail_on: None,
                operations: Vec::new(),
            })),
        }
    }

    /// Configure the mock to fail on a specific operation.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.lock().fail_on = Some(fail_on);
        self
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.lock().operations.clone()
    }

    /// Get the create requests received so far.
    pub fn create_requests(&self) -> Vec<CreateIssueRequest> {
        self.lock()
            .operations
            .iter()
            .filter_map(|op| match op {
                MockOperation::CreateIssue(request) => Some(request.clone()),
                MockOperation::ListIssues => None,
            })
            .collect()
    }

    /// Get the count of stored issues.
    pub fn issue_count(&self) -> usize {
        self.lock().issues.len()
    }

    fn lock(&self) -> MutexGuard<'_, MockTrackerInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IssueTracker for MockTracker {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn list_issues(&self) -> Result<Vec<Issue>, TrackerError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::ListIssues);

        if let Some(FailOn::ListIssues(e)) = &inner.fail_on {
            return Err(e.clone());
        }

        Ok(inner.issues.clone())
    }

    async fn create_issue(
        &self,
        request: CreateIssueRequest,
    ) -> Result<CreatedIssue, TrackerError> {
        let mut inner = self.lock();
        inner
            .operations
            .push(MockOperation::CreateIssue(request.clone()));

        if let Some(FailOn::CreateIssue(e)) = &inner.fail_on {
            return Err(e.clone());
        }

        let number = inner.next_number;
        inner.next_number += 1;
        inner.issues.push(Issue {
            number,
            title: request.title.clone(),
            body: Some(request.body.clone()),
        });

        let labels: Vec<serde_json::Value> = request
            .labels
            .iter()
            .map(|name| serde_json::json!({ "name": name }))
            .collect();

        Ok(CreatedIssue::from_payload(serde_json::json!({
            "number": number,
            "html_url": format!("https://github.com/mock/repo/issues/{}", number),
            "title": request.title,
            "body": request.body,
            "labels": labels,
        })))
    }
}
