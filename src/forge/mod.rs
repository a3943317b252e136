//! forge
//!
//! Abstraction for remote issue trackers.
//!
//! # Architecture
//!
//! The `IssueTracker` trait defines the two operations the reporter needs
//! from a hosting service. The engine only ever sees `&dyn IssueTracker`, so
//! tests run the full reporting flow against [`mock::MockTracker`].
//!
//! # Modules
//!
//! - `traits`: Core `IssueTracker` trait and request/response types
//! - [`github`]: GitHub implementation using the REST API
//! - [`mock`]: Mock implementation for deterministic testing

pub mod github;
pub mod mock;
mod traits;

pub use traits::*;
