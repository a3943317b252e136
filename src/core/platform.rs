//! core::platform
//!
//! Facts about the host the report was produced on.
//!
//! # Naming
//!
//! The operating system and machine names follow the conventions of the
//! `uname` system call rather than Rust's `std::env::consts` spelling
//! (`Linux` rather than `linux`, `Darwin` rather than `macos`, `arm64` on
//! macOS, `AMD64` on Windows). They feed into the fingerprint, so changing
//! them would orphan every issue filed so far.
//!
//! On Unix hosts both names are read from `uname` at runtime, so a binary
//! running under emulation reports the host machine. The compile-time target
//! is only a fallback.

use std::process::Command;

use tracing::debug;

/// Host operating system and machine architecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// Operating system name (e.g. `Linux`)
    pub os: String,
    /// Machine architecture (e.g. `x86_64`)
    pub machine: String,
    /// Full `uname`-style description of the host
    pub summary: String,
}

impl Platform {
    /// Detect the platform of the running process.
    pub fn detect() -> Self {
        let (os, machine) = host_names().unwrap_or_else(|| {
            let target = std::env::consts::OS;
            (
                os_name(target).to_string(),
                machine_name(target, std::env::consts::ARCH).to_string(),
            )
        });
        let summary = uname(&["-s", "-n", "-r", "-v", "-m"])
            .unwrap_or_else(|| format!("{} {}", os, machine));
        Self {
            os,
            machine,
            summary,
        }
    }

    /// Build a platform from explicit values.
    pub fn new(os: impl Into<String>, machine: impl Into<String>) -> Self {
        let os = os.into();
        let machine = machine.into();
        let summary = format!("{} {}", os, machine);
        Self {
            os,
            machine,
            summary,
        }
    }

    /// Replace the host summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }
}

/// Map a Rust target OS to its `uname` system name.
pub fn os_name(target_os: &str) -> &str {
    match target_os {
        "linux" | "android" => "Linux",
        "macos" | "ios" => "Darwin",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        "netbsd" => "NetBSD",
        "openbsd" => "OpenBSD",
        "dragonfly" => "DragonFly",
        "solaris" | "illumos" => "SunOS",
        other => other,
    }
}

/// Map a Rust target architecture to its `uname` machine name.
pub fn machine_name<'a>(target_os: &str, target_arch: &'a str) -> &'a str {
    match (target_os, target_arch) {
        ("windows", "x86_64") => "AMD64",
        ("windows", "aarch64") => "ARM64",
        ("windows", "x86") => "x86",
        ("macos" | "ios", "aarch64") => "arm64",
        ("freebsd" | "openbsd" | "netbsd", "x86_64") => "amd64",
        (_, "x86") => "i686",
        (_, "powerpc64") => "ppc64",
        (_, "arm") => "armv7l",
        (_, arch) => arch,
    }
}

/// System and machine names reported by `uname` on Unix hosts.
fn host_names() -> Option<(String, String)> {
    if !cfg!(unix) {
        return None;
    }
    parse_system_and_machine(&uname(&["-s", "-m"])?)
}

/// Split `uname -s -m` output into its system and machine names.
fn parse_system_and_machine(output: &str) -> Option<(String, String)> {
    let (system, machine) = output.trim().rsplit_once(char::is_whitespace)?;
    let system = system.trim();
    if system.is_empty() || machine.is_empty() {
        return None;
    }
    Some((system.to_string(), machine.to_string()))
}

/// Run `uname` with `args`, returning its trimmed output if available.
fn uname(args: &[&str]) -> Option<String> {
    let output = Command::new("uname")
        .args(args)
        .output()
        .map_err(|e| debug!("uname unavailable: {e}"))
        .ok()?;

    if !output.status.success() {
        debug!(status = ?output.status, "uname exited unsuccessfully");
        return None;
    }

    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}
