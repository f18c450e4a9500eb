//! Free-name selection inside a quarantine batch.
//!
//! Quarantined files keep their base name. Only if that name is already taken
//! in the batch (two runs in the same second, or a leftover from a manual fix)
//! is a numeric suffix inserted: "photo.jpg" -> "photo (2).jpg".
//! This never influences collision detection, which looks at date buckets only.
//! Nothing in a batch is ever overwritten: running out of suffixes is an error.

use anyhow::{Result, bail};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::trace;

use super::dirs::path_occupied;

const MAX_SUFFIX: u32 = 10_000;

/// First free path in `dir` for `name`, trying `name`, `stem (2).ext`, `stem (3).ext`, ...
/// `taken` lets callers reserve names that do not exist on disk yet (dry runs).
pub fn free_destination(
    dir: &Path,
    name: &OsStr,
    taken: impl Fn(&Path) -> bool,
) -> Result<PathBuf> {
    let is_free = |p: &Path| !path_occupied(p) && !taken(p);

    let candidate = dir.join(name);
    if is_free(&candidate) {
        return Ok(candidate);
    }

    let base = Path::new(name);
    let stem = base.file_stem().unwrap_or(name);
    let ext = base.extension();

    for n in 2..=MAX_SUFFIX {
        let candidate = dir.join(with_suffix(stem, ext, &format!(" ({n})")));
        if is_free(&candidate) {
            trace!(name = ?name, n, "picked suffixed quarantine name");
            return Ok(candidate);
        }
    }
    bail!(
        "no free name for '{}' in '{}' after {MAX_SUFFIX} attempts",
        name.to_string_lossy(),
        dir.display()
    )
}

fn with_suffix(stem: &OsStr, ext: Option<&OsStr>, suffix: &str) -> OsString {
    let mut out = stem.to_os_string();
    out.push(suffix);
    if let Some(e) = ext {
        out.push(".");
        out.push(e);
    }
    out
}
