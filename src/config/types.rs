//! Core configuration types.
//! - ImportPaths is the resolved input of a run.
//! - LogLevel controls diagnostic verbosity (not the audit log).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Diagnostic verbosity exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Run summary and warnings (default)
    #[default]
    Normal,
    /// Per-file decisions
    Info,
    /// Everything
    Debug,
}

impl LogLevel {
    /// Parse common names (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// The four paths a run needs, all resolved before the audit log opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPaths {
    /// Flat directory whose files get imported
    pub source_dir: PathBuf,
    /// Root of the `yyyy-MM-dd` buckets
    pub dest_dir: PathBuf,
    /// Root of the per-run quarantine batches
    pub dupe_dir: PathBuf,
    /// Append-only audit log
    pub log_file: PathBuf,
}

impl ImportPaths {
    pub fn new(
        source_dir: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
        dupe_dir: impl Into<PathBuf>,
        log_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            dupe_dir: dupe_dir.into(),
            log_file: log_file.into(),
        }
    }
}
