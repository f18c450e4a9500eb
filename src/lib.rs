//! Core library for `date_import`.
//!
//! Files directly inside a source directory are moved into `dest/<yyyy-MM-dd>`
//! folders named after their modification date. A file whose name is already
//! taken in its date folder is quarantined under `dupes/<run timestamp>`.
//! Every action is appended to a plain-text audit log and mirrored to stdout.
//!
//! Layout:
//! - `config`: CLI/JSON resolution into [`ImportPaths`]
//! - `engine`: snapshot scan, per-file classification and the run outcome
//! - `audit`: append-only log sink
//! - `fs_ops`: directory creation and file moves with contextual errors

pub mod audit;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;

pub use audit::AuditLog;
pub use config::{ImportPaths, LogLevel, resolve};
pub use engine::{ExitStatus, FileEntry, FileOutcome, ImportRun, RunOutcome, run_import};
pub use errors::ImportError;
