//! Filesystem operations used by the import engine.

mod dirs;
mod duplicate;
mod file_move;
mod helpers;
mod util;

pub use dirs::{ensure_dir, path_occupied};
pub use duplicate::free_destination;
pub use file_move::move_file;
pub use helpers::io_error_with_help;
