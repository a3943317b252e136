//! core::fingerprint
//!
//! Stable identity of a failure report.
//!
//! # Design
//!
//! A fingerprint is the IEEE CRC-32 of the raw report body followed by the
//! host OS and machine names, rendered as lowercase hex without a prefix or
//! zero padding. It is computed before the body is wrapped in the issue
//! template, so template edits never change which issues count as duplicates.
//!
//! # Example
//!
//! ```
//! use compat_reporter::core::fingerprint::Fingerprint;
//!
//! let fp = Fingerprint::compute("1234", "567", "89");
//! assert_eq!(fp.as_str(), "cbf43926");
//! assert_eq!(fp.checksum_line(), "Checksum: `cbf43926`");
//! ```

use std::fmt;

use super::platform::Platform;

/// Label that starts the trailing line of every filed issue.
pub const CHECKSUM_PREFIX: &str = "Checksum: ";

/// Hex digest identifying one failure on one platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint a body produced on the given OS and machine.
    pub fn compute(body: &str, os: &str, machine: &str) -> Self {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(body.as_bytes());
        hasher.update(os.as_bytes());
        hasher.update(machine.as_bytes());
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Fingerprint a body produced on `platform`.
    pub fn for_platform(body: &str, platform: &Platform) -> Self {
        Self::compute(body, &platform.os, &platform.machine)
    }

    /// The hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trailing line appended to issue bodies.
    pub fn checksum_line(&self) -> String {
        format!("{}`{}`", CHECKSUM_PREFIX, self.0)
    }

    /// Check whether an issue body was filed for this fingerprint.
    ///
    /// Only the last line of the body is inspected. After trimming it must
    /// start with the checksum line. A backticked digest must be closed right
    /// after this fingerprint; a bare digest is matched as a prefix.
    pub fn matches_body(&self, body: &str) -> bool {
        let last = body.split('\n').next_back().unwrap_or_default().trim();
        let Some(rest) = last.strip_prefix(CHECKSUM_PREFIX) else {
            return false;
        };
        match rest.strip_prefix('`') {
            Some(quoted) => quoted
                .strip_prefix(self.0.as_str())
                .is_some_and(|tail| tail.starts_with('`')),
            None => rest.starts_with(self.0.as_str()),
        }
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
