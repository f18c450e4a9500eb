//! Lazy, idempotent folder creation for buckets and quarantine batches.

use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::helpers::io_error_with_help;

/// Create `dir` (and missing parents) unless it already exists.
/// Returns `true` only when this call created it.
pub fn ensure_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir).map_err(io_error_with_help("create folder", dir))?;
    debug!(path = %dir.display(), "created folder");
    Ok(true)
}

/// Whether `path` is occupied by anything, including a dangling symlink.
pub fn path_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}
