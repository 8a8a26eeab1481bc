//! Filesystem primitives for the extension pack builder.
//!
//! Provides atomic writes, JSON file helpers, and the directory
//! operations the pipeline stages share: recursive copy with overwrite,
//! best-effort removal, and directory scanning.

pub mod dir;
pub mod error;
pub mod io;

pub use dir::{copy_dir_all, recreate_dir, remove_best_effort, scan_subdirs, walk_files};
pub use error::{Error, Result};
pub use io::{read_json, read_json_opt, write_atomic, write_json_pretty};
