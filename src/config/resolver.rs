//! Resolve the four run paths from CLI arguments and config files.
//!
//! Order:
//! 1. `--config FILE`: read/parse errors are fatal; an incomplete file falls through.
//! 2. No directory flags and the default config exists: same rule.
//! 3. `--source/--dest/--dupes`, with `--log-file` defaulting next to the executable.
//! 4. Otherwise `ImportError::MissingArguments`.
//!
//! Step 2 is skipped as soon as any directory flag is given, so explicit
//! `-s/-d/-u` win over a default config sitting next to the executable.
//!
//! Nothing is logged to the audit file here; it is not open yet.

use std::path::Path;
use tracing::debug;

use super::json::load_config_from_path;
use super::paths::sanitize_path;
use super::types::ImportPaths;
use crate::cli::Args;
use crate::errors::ImportError;

pub fn resolve(
    args: &Args,
    default_config: &Path,
    default_log: &Path,
) -> Result<ImportPaths, ImportError> {
    if let Some(cfg) = args.config.as_deref() {
        let cfg = sanitize_path(cfg);
        if let Some(paths) = load_config_from_path(&cfg)? {
            debug!(config = %cfg.display(), "using explicit config file");
            return Ok(paths);
        }
    } else if !args.has_dir_args() && default_config.is_file() {
        if let Some(paths) = load_config_from_path(default_config)? {
            debug!(config = %default_config.display(), "using default config file");
            return Ok(paths);
        }
    }

    match (&args.source, &args.dest, &args.dupes) {
        (Some(src), Some(dst), Some(dupe)) => {
            let log_file = args
                .log_file
                .as_deref()
                .map(sanitize_path)
                .unwrap_or_else(|| default_log.to_path_buf());
            Ok(ImportPaths {
                source_dir: sanitize_path(src),
                dest_dir: sanitize_path(dst),
                dupe_dir: sanitize_path(dupe),
                log_file,
            })
        }
        _ => Err(ImportError::MissingArguments),
    }
}
