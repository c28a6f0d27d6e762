//! Path validation

use crate::error::PipelineError;
use std::path::{Path, PathBuf};
use tsmig_artifact::SourceKind;

/// A file that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTarget {
    /// Canonical absolute path
    pub path: PathBuf,
    /// Source kind from the extension
    pub kind: SourceKind,
}

/// Check that `path` names an existing source file
///
/// The extension is checked first, without touching the filesystem.
///
/// # Errors
/// - `PipelineError::InvalidExtension` if the extension is not recognized
/// - `PipelineError::FileNotFound` if no regular file exists at `path`
pub fn validate_path(path: &Path) -> Result<ValidTarget, PipelineError> {
    let kind = SourceKind::from_path(path).ok_or_else(|| PipelineError::InvalidExtension {
        path: path.to_path_buf(),
    })?;

    let not_found = || PipelineError::FileNotFound {
        path: path.to_path_buf(),
    };
    if !path.is_file() {
        return Err(not_found());
    }
    let path = path.canonicalize().map_err(|_| not_found())?;

    Ok(ValidTarget { path, kind })
}
