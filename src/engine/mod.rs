//! Import engine.
//!
//! One run: write the start marker, check the source, take a snapshot, then
//! classify and move each file in order, and finally write the end marker.
//! Any filesystem or log failure inside the run is returned immediately; files
//! already moved stay moved and no end marker is written.
//!
//! Not safe against concurrent runs on the same directories: there is no lock,
//! so two instances may race on folder creation and on the occupied-name check.

mod outcome;
mod scan;

pub use outcome::{ExitStatus, FileOutcome, RunOutcome};
pub use scan::{BUCKET_FORMAT, FileEntry, snapshot};

use anyhow::Result;
use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::audit::{AuditLog, format_stamp};
use crate::config::ImportPaths;
use crate::fs_ops::{ensure_dir, free_destination, move_file, path_occupied};

#[derive(Debug, Clone, Copy)]
enum FolderKind {
    Bucket,
    Quarantine,
}

/// State of one import run.
pub struct ImportRun<'a, W: Write> {
    paths: &'a ImportPaths,
    log: &'a mut AuditLog<W>,
    started: DateTime<Local>,
    batch_stamp: String,
    dry_run: bool,
    // dry run only: folders and files that would exist by now
    planned: HashSet<PathBuf>,
}

impl<'a, W: Write> ImportRun<'a, W> {
    /// `started` names the quarantine batch and stamps both run markers.
    pub fn new(paths: &'a ImportPaths, log: &'a mut AuditLog<W>, started: DateTime<Local>) -> Self {
        Self {
            paths,
            log,
            batch_stamp: format_stamp(&started),
            started,
            dry_run: false,
            planned: HashSet::new(),
        }
    }

    /// Plan everything, mutate nothing.
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// `dupe_dir/<run stamp>`, shared by every collision of this run.
    pub fn batch_dir(&self) -> PathBuf {
        self.paths.dupe_dir.join(&self.batch_stamp)
    }

    /// Run from start marker to end marker.
    pub fn execute(mut self) -> Result<RunOutcome> {
        self.log.start_marker(&self.started)?;
        let outcome = self.import_all()?;
        info!(
            found = outcome.files_found,
            processed = outcome.files_processed(),
            moved = outcome.files_moved,
            duplicates = outcome.duplicates,
            status = ?outcome.exit_status(),
            dry_run = self.dry_run,
            "import finished"
        );
        self.log.end_marker(&self.started)?;
        Ok(outcome)
    }

    fn import_all(&mut self) -> Result<RunOutcome> {
        let paths = self.paths;
        let source = &paths.source_dir;
        if !source.is_dir() {
            self.log
                .append(&format!("Source directory {} does not exist", source.display()))?;
            return Ok(RunOutcome::missing_source());
        }

        let entries = snapshot(source, Some(&paths.log_file))?;
        let mut outcome = RunOutcome::with_found(entries.len());
        if entries.is_empty() {
            self.log.append(&format!(
                "Source directory {} is empty, nothing to do",
                source.display()
            ))?;
            return Ok(outcome);
        }

        for entry in &entries {
            let result = self.process_file(entry)?;
            debug!(
                src = %entry.path.display(),
                dest = %result.dest().display(),
                "file placed"
            );
            outcome.record(&result);
        }
        Ok(outcome)
    }

    /// Classify one file and move it into its bucket or the quarantine batch.
    pub fn process_file(&mut self, entry: &FileEntry) -> Result<FileOutcome> {
        let bucket = self.paths.dest_dir.join(entry.bucket_name());
        self.ensure_folder(&bucket, FolderKind::Bucket)?;

        let target = bucket.join(&entry.name);
        if !self.occupied(&target) {
            self.relocate(&entry.path, &target)?;
            let verb = if self.dry_run { "Would move" } else { "Moved" };
            self.log.append(&format!(
                "{verb} {} to {}",
                entry.path.display(),
                target.display()
            ))?;
            return Ok(FileOutcome::Moved {
                bucket,
                dest: target,
            });
        }

        debug!(name = ?entry.name, bucket = %bucket.display(), "name already taken in bucket");
        let batch = self.batch_dir();
        self.ensure_folder(&batch, FolderKind::Quarantine)?;
        let dest = free_destination(&batch, &entry.name, |p| self.planned.contains(p))?;
        self.relocate(&entry.path, &dest)?;
        let verb = if self.dry_run { "would move" } else { "moved" };
        self.log.append(&format!(
            "Duplicate {} already in {}, {verb} {} to {}",
            entry.name.to_string_lossy(),
            bucket.display(),
            entry.path.display(),
            dest.display()
        ))?;
        Ok(FileOutcome::Quarantined { bucket, dest })
    }

    fn occupied(&self, path: &Path) -> bool {
        path_occupied(path) || self.planned.contains(path)
    }

    fn ensure_folder(&mut self, dir: &Path, kind: FolderKind) -> Result<()> {
        let label = match kind {
            FolderKind::Bucket => "folder",
            FolderKind::Quarantine => "duplicates folder",
        };
        if self.dry_run {
            if !dir.is_dir() && self.planned.insert(dir.to_path_buf()) {
                self.log
                    .append(&format!("Would create {label} {}", dir.display()))?;
            }
            return Ok(());
        }
        if ensure_dir(dir)? {
            self.log.append(&format!("Created {label} {}", dir.display()))?;
        }
        Ok(())
    }

    fn relocate(&mut self, src: &Path, dest: &Path) -> Result<()> {
        if self.dry_run {
            self.planned.insert(dest.to_path_buf());
            return Ok(());
        }
        move_file(src, dest)
    }
}

/// Convenience wrapper: one full run against `paths`.
pub fn run_import<W: Write>(
    paths: &ImportPaths,
    log: &mut AuditLog<W>,
    started: DateTime<Local>,
    dry_run: bool,
) -> Result<RunOutcome> {
    ImportRun::new(paths, log, started).dry_run(dry_run).execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use filetime::{FileTime, set_file_mtime};
    use std::fs;
    use tempfile::{TempDir, tempdir};

    struct Fixture {
        _td: TempDir,
        paths: ImportPaths,
    }

    fn fixture() -> Fixture {
        let td = tempdir().unwrap();
        let paths = ImportPaths::new(
            td.path().join("in"),
            td.path().join("out"),
            td.path().join("dupes"),
            td.path().join("import.log"),
        );
        fs::create_dir(&paths.source_dir).unwrap();
        Fixture { _td: td, paths }
    }

    fn put(dir: &Path, name: &str, day: u32) -> PathBuf {
        fs::create_dir_all(dir).unwrap();
        let p = dir.join(name);
        fs::write(&p, name.as_bytes()).unwrap();
        let t = Local.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap();
        set_file_mtime(&p, FileTime::from_unix_time(t.timestamp(), 0)).unwrap();
        p
    }

    fn started() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap()
    }

    fn run(paths: &ImportPaths, dry_run: bool) -> (RunOutcome, Vec<String>) {
        let mut log = AuditLog::from_writer(Vec::new(), "mem", false);
        let outcome = run_import(paths, &mut log, started(), dry_run).unwrap();
        let text = String::from_utf8(log.into_inner()).unwrap();
        (outcome, text.lines().map(str::to_owned).collect())
    }

    #[test]
    fn moves_into_date_bucket() {
        let f = fixture();
        put(&f.paths.source_dir, "photo1.jpg", 1);

        let (outcome, lines) = run(&f.paths, false);

        assert_eq!(outcome.exit_status(), ExitStatus::Success);
        assert!(f.paths.dest_dir.join("2024-03-01/photo1.jpg").is_file());
        assert!(!f.paths.source_dir.join("photo1.jpg").exists());
        assert_eq!(lines.first().unwrap(), "Start of log for 2024-05-06_07-08-09");
        assert!(lines[1].starts_with("Created folder "));
        assert!(lines[2].starts_with("Moved "));
        assert_eq!(lines.last().unwrap(), "End of log for 2024-05-06_07-08-09");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn collision_goes_to_run_batch() {
        let f = fixture();
        let bucket = f.paths.dest_dir.join("2024-03-01");
        put(&bucket, "photo1.jpg", 1);
        fs::write(bucket.join("photo1.jpg"), b"original").unwrap();
        put(&f.paths.source_dir, "photo1.jpg", 1);

        let (outcome, lines) = run(&f.paths, false);

        assert_eq!(outcome.exit_status(), ExitStatus::DuplicatesPending);
        assert_eq!(fs::read(bucket.join("photo1.jpg")).unwrap(), b"original");
        let quarantined = f.paths.dupe_dir.join("2024-05-06_07-08-09/photo1.jpg");
        assert!(quarantined.is_file());
        assert!(lines.iter().any(|l| l.starts_with("Created duplicates folder ")));
        assert!(lines.iter().any(|l| l.starts_with("Duplicate photo1.jpg already in ")));
        assert!(!lines.iter().any(|l| l.starts_with("Created folder ")));
    }

    #[test]
    fn collision_is_scoped_to_bucket() {
        let f = fixture();
        put(&f.paths.dest_dir.join("2024-03-02"), "x.jpg", 2);
        put(&f.paths.dupe_dir.join("2024-01-01_00-00-00"), "x.jpg", 1);
        put(&f.paths.source_dir, "x.jpg", 1);

        let (outcome, _) = run(&f.paths, false);

        assert_eq!(outcome.exit_status(), ExitStatus::Success);
        assert!(f.paths.dest_dir.join("2024-03-01/x.jpg").is_file());
    }

    #[test]
    fn shared_date_creates_bucket_once() {
        let f = fixture();
        put(&f.paths.source_dir, "a.jpg", 1);
        put(&f.paths.source_dir, "b.jpg", 1);

        let (outcome, lines) = run(&f.paths, false);

        assert_eq!(outcome.files_moved, 2);
        let creations = lines.iter().filter(|l| l.starts_with("Created folder")).count();
        assert_eq!(creations, 1);

        put(&f.paths.source_dir, "c.jpg", 1);
        let (_, lines) = run(&f.paths, false);
        assert!(!lines.iter().any(|l| l.starts_with("Created folder")));
        let buckets = fs::read_dir(&f.paths.dest_dir).unwrap().count();
        assert_eq!(buckets, 1);
    }

    #[test]
    fn empty_source_creates_nothing() {
        let f = fixture();

        let (outcome, lines) = run(&f.paths, false);

        assert_eq!(outcome.exit_status(), ExitStatus::NothingToDo);
        assert!(!f.paths.dest_dir.exists());
        assert!(!f.paths.dupe_dir.exists());
        assert!(lines[1].ends_with("is empty, nothing to do"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn missing_source_touches_nothing() {
        let f = fixture();
        fs::remove_dir(&f.paths.source_dir).unwrap();

        let (outcome, lines) = run(&f.paths, false);

        assert_eq!(outcome.exit_status(), ExitStatus::Error);
        assert!(!f.paths.dest_dir.exists());
        assert!(!f.paths.dupe_dir.exists());
        assert!(lines[1].ends_with("does not exist"));
        assert!(lines[2].starts_with("End of log for "));
    }

    #[test]
    fn quarantine_never_overwrites_batch_contents() {
        let f = fixture();
        put(&f.paths.dest_dir.join("2024-03-01"), "p.jpg", 1);
        let batch = f.paths.dupe_dir.join("2024-05-06_07-08-09");
        put(&batch, "p.jpg", 1);
        fs::write(batch.join("p.jpg"), b"earlier run").unwrap();
        put(&f.paths.source_dir, "p.jpg", 1);

        let (outcome, lines) = run(&f.paths, false);

        assert_eq!(outcome.duplicates, 1);
        assert_eq!(fs::read(batch.join("p.jpg")).unwrap(), b"earlier run");
        assert!(batch.join("p (2).jpg").is_file());
        assert!(!lines.iter().any(|l| l.starts_with("Created duplicates folder")));
    }

    #[test]
    fn dry_run_plans_without_mutating() {
        let f = fixture();
        put(&f.paths.dest_dir.join("2024-03-01"), "dup.jpg", 1);
        put(&f.paths.source_dir, "dup.jpg", 1);
        put(&f.paths.source_dir, "new.jpg", 2);

        let (outcome, lines) = run(&f.paths, true);

        assert_eq!(outcome.exit_status(), ExitStatus::DuplicatesPending);
        assert!(f.paths.source_dir.join("dup.jpg").is_file());
        assert!(f.paths.source_dir.join("new.jpg").is_file());
        assert!(!f.paths.dest_dir.join("2024-03-02").exists());
        assert!(!f.paths.dupe_dir.exists());
        assert!(lines.iter().any(|l| l.starts_with("Would create duplicates folder ")));
        assert!(lines.iter().any(|l| l.starts_with("Would create folder ")));
        assert!(lines.iter().any(|l| l.starts_with("Would move ")));
    }

    #[test]
    fn move_failure_aborts_without_end_marker() {
        let f = fixture();
        put(&f.paths.source_dir, "a.jpg", 1);
        fs::create_dir_all(&f.paths.dest_dir).unwrap();
        fs::write(f.paths.dest_dir.join("2024-03-01"), b"a file where the bucket goes").unwrap();

        let mut log = AuditLog::from_writer(Vec::new(), "mem", false);
        let err = run_import(&f.paths, &mut log, started(), false).unwrap_err();
        assert!(err.to_string().contains("create folder"), "{err}");

        let text = String::from_utf8(log.into_inner()).unwrap();
        assert!(text.starts_with("Start of log for "));
        assert!(!text.contains("End of log for"));
        assert!(f.paths.source_dir.join("a.jpg").is_file());
    }

    #[test]
    fn abort_keeps_earlier_moves_and_leaves_the_rest() {
        let f = fixture();
        put(&f.paths.source_dir, "a.jpg", 1);
        put(&f.paths.source_dir, "b.jpg", 2);
        fs::create_dir_all(&f.paths.dest_dir).unwrap();
        fs::write(f.paths.dest_dir.join("2024-03-02"), b"blocks b's bucket").unwrap();

        let mut log = AuditLog::from_writer(Vec::new(), "mem", false);
        assert!(run_import(&f.paths, &mut log, started(), false).is_err());

        assert!(f.paths.dest_dir.join("2024-03-01/a.jpg").is_file());
        assert!(!f.paths.source_dir.join("a.jpg").exists());
        assert!(f.paths.source_dir.join("b.jpg").is_file());
        let text = String::from_utf8(log.into_inner()).unwrap();
        assert!(text.contains("Moved "));
        assert!(!text.contains("End of log for"));
    }
}
