//! CLI definition and parsing.
//!
//! Two parameter sets:
//! - `--config <FILE>` alone
//! - `--source`, `--dest`, `--dupes` together, with an optional `--log-file`
//!
//! With neither, the default config next to the executable is tried.
//! `--verbose` is a shorthand for `--log-level debug`.

use clap::{ArgGroup, Parser, ValueHint};
use std::path::PathBuf;

use crate::config::LogLevel;

/// Move files into date-named folders and quarantine name collisions.
///
/// Exit codes: 0 success, 1 error, 2 nothing to do, 3 duplicates need manual processing.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
#[command(group(
    ArgGroup::new("dirs")
        .args(["source", "dest", "dupes"])
        .multiple(true)
        .conflicts_with("config")
))]
pub struct Args {
    /// JSON config file with srcDir, dstDir, dupeDir and logFile.
    #[arg(short = 'c', long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Directory whose files are imported (not recursive).
    #[arg(short = 's', long, value_name = "DIR", value_hint = ValueHint::DirPath, requires_all = ["dest", "dupes"])]
    pub source: Option<PathBuf>,

    /// Root of the date folders.
    #[arg(short = 'd', long, value_name = "DIR", value_hint = ValueHint::DirPath, requires_all = ["source", "dupes"])]
    pub dest: Option<PathBuf>,

    /// Root of the duplicates quarantine.
    #[arg(short = 'u', long, value_name = "DIR", value_hint = ValueHint::DirPath, requires_all = ["source", "dest"])]
    pub dupes: Option<PathBuf>,

    /// Audit log file (defaults to date_import.log next to the executable).
    #[arg(short = 'l', long, value_name = "FILE", value_hint = ValueHint::FilePath, conflicts_with = "config")]
    pub log_file: Option<PathBuf>,

    /// Log what would happen without touching the filesystem.
    #[arg(long)]
    pub dry_run: bool,

    /// Diagnostic verbosity on stderr: quiet, normal, info, debug.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Shorthand for --log-level debug.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Args {
    /// Precedence: --verbose > --log-level > default.
    pub fn effective_log_level(&self) -> LogLevel {
        if self.verbose {
            return LogLevel::Debug;
        }
        self.log_level.unwrap_or_default()
    }

    /// True when any of the directory flags was given.
    pub fn has_dir_args(&self) -> bool {
        self.source.is_some() || self.dest.is_some() || self.dupes.is_some()
    }
}

/// Parse argv without exiting; the caller maps failures onto the exit-code policy.
pub fn try_parse() -> Result<Args, clap::Error> {
    Args::try_parse()
}
