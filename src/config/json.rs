//! JSON configuration support.
//!
//! The file is a flat object:
//! ```json
//! { "srcDir": "...", "dstDir": "...", "dupeDir": "...", "logFile": "..." }
//! ```
//! A file that cannot be read or parsed is a hard error. A file that parses but
//! lacks any of the four keys (or has an empty value) is "not configured".

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::sanitize_path;
use super::types::ImportPaths;
use crate::errors::ImportError;

/// Mirrors the on-disk JSON. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonConfig {
    src_dir: Option<String>,
    dst_dir: Option<String>,
    dupe_dir: Option<String>,
    log_file: Option<String>,
}

fn non_empty(v: Option<&str>) -> Option<PathBuf> {
    let trimmed = v?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(sanitize_path(Path::new(trimmed)))
    }
}

impl JsonConfig {
    fn into_paths(self) -> Option<ImportPaths> {
        Some(ImportPaths {
            source_dir: non_empty(self.src_dir.as_deref())?,
            dest_dir: non_empty(self.dst_dir.as_deref())?,
            dupe_dir: non_empty(self.dupe_dir.as_deref())?,
            log_file: non_empty(self.log_file.as_deref())?,
        })
    }
}

/// Parse config JSON text. `Ok(None)` means parsed but incomplete.
pub fn parse_config_str(content: &str, origin: &Path) -> Result<Option<ImportPaths>, ImportError> {
    let parsed: JsonConfig =
        serde_json::from_str(content).map_err(|source| ImportError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })?;
    let paths = parsed.into_paths();
    if paths.is_none() {
        debug!(path = %origin.display(), "config file is missing one or more keys; ignoring it");
    }
    Ok(paths)
}

/// Read and parse a config file.
pub fn load_config_from_path(path: &Path) -> Result<Option<ImportPaths>, ImportError> {
    let content = fs::read_to_string(path).map_err(|source| ImportError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config_str(&content, path)
}
