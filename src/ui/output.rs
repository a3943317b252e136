//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Operator-facing status lines are formatted consistently and respect the
//! quiet flag. Errors are always shown. Repository links are highlighted in
//! cyan unless color is disabled.

use std::fmt::Display;

const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Console settings shared by every printed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Console {
    pub verbosity: Verbosity,
    pub color: bool,
}

impl Console {
    pub fn new(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Print a message (respects quiet mode).
    pub fn print(&self, message: impl Display) {
        if self.verbosity != Verbosity::Quiet {
            println!("{}", message);
        }
    }

    /// Print a success message (respects quiet mode).
    pub fn success(&self, message: impl Display) {
        self.print(message)
    }

    /// Print an error message (always shown).
    pub fn error(&self, message: impl Display) {
        eprintln!("error: {}", message);
    }

    /// Print diagnostic detail for an error (always shown).
    pub fn error_detail(&self, message: impl Display) {
        eprintln!("{}", message);
    }

    /// Print a warning message (respects quiet mode).
    pub fn warn(&self, message: impl Display) {
        if self.verbosity != Verbosity::Quiet {
            eprintln!("warning: {}", message);
        }
    }

    /// Print a debug message (only in debug mode).
    pub fn debug(&self, message: impl Display) {
        if self.verbosity == Verbosity::Debug {
            eprintln!("[debug] {}", message);
        }
    }

    /// Format a link for display.
    pub fn link(&self, url: &str) -> String {
        format_link(url, self.color)
    }
}

/// Format a link, highlighting it when `color` is set.
pub fn format_link(url: &str, color: bool) -> String {
    if color {
        format!("{}{}{}", CYAN, url, RESET)
    } else {
        url.to_string()
    }
}

/// Decide whether to emit ANSI colors.
///
/// Color is off when requested on the command line or when `NO_COLOR` is
/// set to a non-empty value.
pub fn color_enabled(no_color_flag: bool, no_color_env: Option<&str>) -> bool {
    !no_color_flag && no_color_env.map_or(true, str::is_empty)
}
