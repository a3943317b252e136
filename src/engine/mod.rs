//! engine
//!
//! Orchestrates a single report: Resolve -> Fingerprint -> Deduplicate -> File.
//!
//! # Architecture
//!
//! The engine ties the pure `core` logic to an [`IssueTracker`]. It never
//! prints; the CLI layer turns an [`Outcome`] or [`ReportError`] into
//! console output and an exit code.
//!
//! # Example
//!
//! ```ignore
//! use compat_reporter::engine::Reporter;
//!
//! let reporter = Reporter::new(&config, Platform::detect(), cwd);
//! match reporter.run(&tracker).await? {
//!     Outcome::Duplicate { .. } => {}
//!     Outcome::Created { issue, .. } => println!("{:?}", issue.url),
//! }
//! ```
//!
//! [`IssueTracker`]: crate::forge::IssueTracker

pub mod reporter;

pub use reporter::{find_duplicate, Outcome, ReportError, Reporter};
