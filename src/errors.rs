//! Typed error definitions for date_import.
//! Covers the failures that end a run before or outside the per-file loop;
//! filesystem failures inside the loop travel as `anyhow` errors with context.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Cannot read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "No usable config file and missing directory arguments.\n\
         Usage: date_import --config <FILE>\n   or: date_import --source <DIR> --dest <DIR> --dupes <DIR> [--log-file <FILE>]"
    )]
    MissingArguments,

    #[error("Cannot open log file {path}: {source}")]
    LogOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write to log file {path}: {source}")]
    LogWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot mirror log line to stdout: {source}")]
    MirrorWrite {
        #[source]
        source: io::Error,
    },

    #[error("Cannot list source directory {path}: {source}")]
    SourceScan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}
