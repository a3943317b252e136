//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All operator-facing output goes through this module so quiet mode and
//! color handling apply uniformly. Diagnostic logging uses `tracing`
//! instead.

pub mod output;
