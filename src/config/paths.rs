//! Default path helpers.
//! The default config file and the default log file both live next to the executable.

use std::env;
use std::path::{Path, PathBuf};

use super::{DEFAULT_CONFIG_FILE_NAME, DEFAULT_LOG_FILE_NAME};

/// Directory holding the running executable, or the current directory if unknown.
fn exe_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `<exe dir>/date_import.json`
pub fn default_config_path() -> PathBuf {
    exe_dir().join(DEFAULT_CONFIG_FILE_NAME)
}

/// `<exe dir>/date_import.log`
pub fn default_log_path() -> PathBuf {
    exe_dir().join(DEFAULT_LOG_FILE_NAME)
}

/// Trim whitespace and stray shell quotes from a user-supplied path.
/// PowerShell and CMD sometimes pass `'C:\dir\'` through verbatim.
pub fn sanitize_path(p: &Path) -> PathBuf {
    let raw = p.to_string_lossy();
    let trimmed = raw.trim();
    let inner = if trimmed.len() >= 2
        && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
    {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed.trim_matches(|c| c == '\'' || c == '"')
    };
    if inner == raw {
        return p.to_path_buf();
    }
    PathBuf::from(inner)
}
