//! File move implementation.
//! Renames in place when possible; across devices falls back to copy + remove.
//! Either way a failed move leaves the source file where it was.

use anyhow::{Result, bail};
use filetime::{FileTime, set_file_mtime};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use tracing::{debug, warn};

use super::helpers::io_error_with_help;
use super::util::is_cross_device;

/// Move `src` to `dest` (a full file path whose parent exists).
pub fn move_file(src: &Path, dest: &Path) -> Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => {
            debug!(src = %src.display(), dest = %dest.display(), "renamed file");
            Ok(())
        }
        Err(e) if is_cross_device(&e) => {
            warn!(src = %src.display(), dest = %dest.display(), "rename crosses devices; copying instead");
            copy_then_remove(src, dest)
        }
        Err(e) => {
            let op = format!("move to '{}' from", dest.display());
            Err(io_error_with_help(&op, src)(e))
        }
    }
}

/// Copy into a freshly created `dest`, keep the mtime, then remove `src`.
/// On any failure the partial copy is removed and `src` stays put.
pub(super) fn copy_then_remove(src: &Path, dest: &Path) -> Result<()> {
    let meta = fs::metadata(src).map_err(io_error_with_help("read metadata of", src))?;
    if !meta.is_file() {
        bail!("Refusing to copy non-regular file '{}'", src.display());
    }

    let mut reader = File::open(src).map_err(io_error_with_help("open", src))?;
    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dest)
        .map_err(io_error_with_help("create", dest))?;

    let copied = io::copy(&mut reader, &mut writer).and_then(|_| writer.sync_all());
    drop(writer);
    if let Err(e) = copied {
        let _ = fs::remove_file(dest);
        return Err(io_error_with_help("copy into", dest)(e));
    }

    if let Err(e) = set_file_mtime(dest, FileTime::from_last_modification_time(&meta)) {
        warn!(dest = %dest.display(), error = %e, "could not preserve modification time");
    }

    if let Err(e) = fs::remove_file(src) {
        let _ = fs::remove_file(dest);
        return Err(io_error_with_help("remove original", src)(e)
            .context(format!("copy to '{}' was rolled back", dest.display())));
    }
    Ok(())
}
