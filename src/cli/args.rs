//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! Everything the report itself needs comes from the environment; the flags
//! here only control where files are read from and how much is printed.
//!
//! # Flags
//!
//! - `--cwd <path>`: Read `stdout.txt`, `stderr.txt` and `ISSUE_BODY_FILE` relative to this directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Only print errors
//! - `--dry-run`: Print the rendered issue without contacting the tracker
//! - `--no-color`: Disable ANSI colors

use clap::Parser;
use std::path::PathBuf;

/// File a deduplicated CI future-compatibility issue on GitHub.
#[derive(Parser, Debug)]
#[command(name = "compat-report")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if compat-report was started in this directory
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Render the issue and print it without contacting the tracker
    #[arg(long)]
    pub dry_run: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}
