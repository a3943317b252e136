//! core
//!
//! Domain types and pure logic for the reporter.
//!
//! # Modules
//!
//! - [`config`] - Reporter configuration from the environment
//! - [`platform`] - Host OS, machine and `uname` summary
//! - [`fingerprint`] - Stable failure fingerprints and duplicate matching
//! - [`report`] - Body resolution and issue rendering
//!
//! Nothing in this module performs network I/O.

pub mod config;
pub mod fingerprint;
pub mod platform;
pub mod report;
