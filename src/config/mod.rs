//! Config module.
//! Provides the run path type, default locations, JSON loading and CLI resolution.

pub mod json;
pub mod paths;
mod resolver;
pub mod types;

pub use json::{load_config_from_path, parse_config_str};
pub use paths::{default_config_path, default_log_path};
pub use resolver::resolve;
pub use types::{ImportPaths, LogLevel};

/// File name of the config looked up next to the executable.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "date_import.json";
/// File name of the audit log used when `--log-file` is omitted.
pub const DEFAULT_LOG_FILE_NAME: &str = "date_import.log";
