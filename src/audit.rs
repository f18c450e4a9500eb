//! Append-only audit log.
//!
//! Each notable event of a run becomes exactly one line, written and flushed
//! immediately, then mirrored verbatim to stdout. There is no buffering and no
//! retry: a failed write is returned to the caller, which ends the run.
//!
//! A reader that goes away (`date_import ... | head -1`) only stops the mirror;
//! the file keeps every line and the run goes on. Any other stdout failure is
//! fatal like a file write failure.

use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::errors::ImportError;
use crate::output as out;
use crate::platform::open_log_file_secure_append;

/// `yyyy-MM-dd_HH-mm-ss`, shared by the log markers and quarantine batch names.
pub const RUN_STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

pub fn format_stamp(at: &DateTime<Local>) -> String {
    at.format(RUN_STAMP_FORMAT).to_string()
}

pub struct AuditLog<W: Write = File> {
    writer: W,
    path: PathBuf,
    echo: bool,
}

impl AuditLog<File> {
    /// Open (or create) the log file in append mode, echoing to stdout.
    pub fn open(path: &Path) -> Result<Self, ImportError> {
        let file = open_log_file_secure_append(path).map_err(|source| ImportError::LogOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_writer(file, path, true))
    }
}

impl<W: Write> AuditLog<W> {
    /// Wrap any writer. `label` only appears in error messages.
    pub fn from_writer(writer: W, label: impl Into<PathBuf>, echo: bool) -> Self {
        Self {
            writer,
            path: label.into(),
            echo,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line and mirror it.
    pub fn append(&mut self, line: &str) -> Result<(), ImportError> {
        writeln!(self.writer, "{line}")
            .and_then(|()| self.writer.flush())
            .map_err(|source| ImportError::LogWrite {
                path: self.path.clone(),
                source,
            })?;
        trace!(target: "audit", "{line}");
        if self.echo
            && let Err(e) = out::print_user(line)
        {
            mirror_failure(e)?;
            debug!("stdout reader went away; audit lines now go to the file only");
            self.echo = false;
        }
        Ok(())
    }

    pub fn start_marker(&mut self, at: &DateTime<Local>) -> Result<(), ImportError> {
        self.append(&format!("Start of log for {}", format_stamp(at)))
    }

    pub fn end_marker(&mut self, at: &DateTime<Local>) -> Result<(), ImportError> {
        self.append(&format!("End of log for {}", format_stamp(at)))
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// A broken pipe is tolerated; anything else ends the run.
fn mirror_failure(source: io::Error) -> Result<(), ImportError> {
    if source.kind() == io::ErrorKind::BrokenPipe {
        Ok(())
    } else {
        Err(ImportError::MirrorWrite { source })
    }
}
