//! Configuration lookup
//!
//! Walks from a directory towards the filesystem root and stops at the first
//! directory holding a `tsconfig.json`.

use std::path::{Path, PathBuf};

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "tsconfig.json";

/// Find the nearest `tsconfig.json` at or above `start_dir`
///
/// The starting directory is canonicalized first so that `..` segments and
/// symlinks resolve the same way the filesystem does. Returns `None` once the
/// root has been checked without a match.
#[must_use]
pub fn locate_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current = std::fs::canonicalize(start_dir).unwrap_or_else(|_| start_dir.to_path_buf());
    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!("Found configuration at {}", candidate.display());
            return Some(candidate);
        }
        match current.parent() {
            Some(parent) if parent != current => current = parent.to_path_buf(),
            _ => {
                tracing::debug!("No {} above {}", CONFIG_FILE_NAME, start_dir.display());
                return None;
            }
        }
    }
}
