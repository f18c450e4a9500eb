//! Per-file and per-run results, and the exit-code policy.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// What happened to one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Moved into its date bucket.
    Moved { bucket: PathBuf, dest: PathBuf },
    /// Its name was taken in `bucket`; moved into the quarantine batch.
    Quarantined { bucket: PathBuf, dest: PathBuf },
}

impl FileOutcome {
    pub fn dest(&self) -> &Path {
        match self {
            FileOutcome::Moved { dest, .. } | FileOutcome::Quarantined { dest, .. } => {
                dest.as_path()
            }
        }
    }
}

/// Process exit codes. No other code is ever emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    Success = 0,
    Error = 1,
    NothingToDo = 2,
    DuplicatesPending = 3,
}

impl ExitStatus {
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// Aggregate state of one run, finalized into a single [`ExitStatus`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    pub source_missing: bool,
    pub files_found: usize,
    pub files_moved: usize,
    pub duplicates: usize,
}

impl RunOutcome {
    pub fn missing_source() -> Self {
        Self {
            source_missing: true,
            ..Self::default()
        }
    }

    pub fn with_found(files_found: usize) -> Self {
        Self {
            files_found,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Moved { .. } => self.files_moved += 1,
            FileOutcome::Quarantined { .. } => self.duplicates += 1,
        }
    }

    pub fn duplicate_seen(&self) -> bool {
        self.duplicates > 0
    }

    pub fn files_processed(&self) -> usize {
        self.files_moved + self.duplicates
    }

    /// Missing source, then empty snapshot, then duplicates, then success.
    pub fn exit_status(&self) -> ExitStatus {
        if self.source_missing {
            ExitStatus::Error
        } else if self.files_found == 0 {
            ExitStatus::NothingToDo
        } else if self.duplicate_seen() {
            ExitStatus::DuplicatesPending
        } else {
            ExitStatus::Success
        }
    }
}
