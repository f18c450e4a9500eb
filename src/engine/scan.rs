//! Snapshot of the source directory.
//!
//! Only regular files directly inside the source are taken; subdirectories and
//! symlinks are left alone. Modification times are read here, once, so later
//! moves cannot change which bucket a file lands in.

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::errors::ImportError;
use crate::fs_ops::io_error_with_help;

/// Format of date bucket folder names.
pub const BUCKET_FORMAT: &str = "%Y-%m-%d";

/// One file found in the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: OsString,
    pub modified: DateTime<Local>,
}

impl FileEntry {
    /// Local calendar day of the last modification.
    pub fn date(&self) -> NaiveDate {
        self.modified.date_naive()
    }

    /// `yyyy-MM-dd` folder name of this entry's bucket.
    pub fn bucket_name(&self) -> String {
        self.date().format(BUCKET_FORMAT).to_string()
    }
}

/// List the files directly inside `source`, sorted by name.
/// `skip` excludes one path (the audit log, should it live in the source).
pub fn snapshot(source: &Path, skip: Option<&Path>) -> Result<Vec<FileEntry>> {
    let skip_real = skip.and_then(|p| fs::canonicalize(p).ok());
    let mut entries = Vec::new();

    for item in WalkDir::new(source)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let item = item.map_err(|source_err| ImportError::SourceScan {
            path: source.to_path_buf(),
            source: source_err,
        })?;
        if !item.file_type().is_file() {
            trace!(path = %item.path().display(), "skipping non-file entry");
            continue;
        }
        if let Some(skip_real) = skip_real.as_deref()
            && fs::canonicalize(item.path()).ok().as_deref() == Some(skip_real)
        {
            debug!(path = %item.path().display(), "skipping audit log inside source");
            continue;
        }

        let meta = item
            .metadata()
            .map_err(|e| ImportError::SourceScan {
                path: item.path().to_path_buf(),
                source: e,
            })?;
        let modified = meta
            .modified()
            .map_err(io_error_with_help("read modification time of", item.path()))?;

        entries.push(FileEntry {
            name: item.file_name().to_os_string(),
            modified: DateTime::<Local>::from(modified),
            path: item.into_path(),
        });
    }

    debug!(source = %source.display(), count = entries.len(), "source snapshot taken");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use filetime::{FileTime, set_file_mtime};
    use tempfile::tempdir;

    #[test]
    fn snapshot_is_flat_and_sorted() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("b.jpg"), b"b").unwrap();
        fs::write(td.path().join("a.jpg"), b"a").unwrap();
        fs::create_dir(td.path().join("nested")).unwrap();
        fs::write(td.path().join("nested").join("deep.jpg"), b"d").unwrap();

        let entries = snapshot(td.path(), None).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.clone()).collect();
        assert_eq!(names, vec![OsString::from("a.jpg"), OsString::from("b.jpg")]);
    }

    #[test]
    fn bucket_uses_local_modification_day() {
        let td = tempdir().unwrap();
        let f = td.path().join("photo1.jpg");
        fs::write(&f, b"x").unwrap();
        let noon = Local.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        set_file_mtime(&f, FileTime::from_unix_time(noon.timestamp(), 0)).unwrap();

        let entries = snapshot(td.path(), None).unwrap();
        assert_eq!(entries[0].bucket_name(), "2024-03-01");
        assert_eq!(entries[0].date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn skip_excludes_log_file() {
        let td = tempdir().unwrap();
        let log = td.path().join("import.log");
        fs::write(&log, b"").unwrap();
        fs::write(td.path().join("a.jpg"), b"a").unwrap();

        let entries = snapshot(td.path(), Some(&log)).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, OsString::from("a.jpg"));
    }

    #[test]
    fn missing_source_is_scan_error() {
        let td = tempdir().unwrap();
        let err = snapshot(&td.path().join("gone"), None).unwrap_err();
        assert!(err.downcast_ref::<ImportError>().is_some());
    }
}
