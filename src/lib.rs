//! compat-reporter - files deduplicated CI future-compatibility issues
//!
//! When a scheduled CI job notices that a project no longer builds against
//! the latest versions of its dependencies, this tool opens an issue on the
//! project's GitHub tracker. Repeated failures with the same root cause are
//! recognized by a fingerprint stored on the last line of the issue body, so
//! each distinct failure is reported once per platform.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses flags, prints, exit codes)
//! - [`engine`] - The reporting flow: resolve, fingerprint, deduplicate, file
//! - [`core`] - Configuration, platform facts, fingerprints, issue rendering
//! - [`forge`] - Abstraction for remote issue trackers (GitHub)
//! - [`ui`] - Console output utilities
//!
//! # Invariants
//!
//! 1. The fingerprint depends only on the raw report body and the host OS
//!    and machine names, never on the issue template
//! 2. At most one listing call and one creation call per run
//! 3. No issue is created when the listing fails or a duplicate exists

pub mod cli;
pub mod core;
pub mod engine;
pub mod forge;
pub mod ui;
