//! The migration pipeline
//!
//! ```text
//! validate_path → locate_config → ProjectConfig::load → ScopedWorkspace::build
//!                                                             ↓
//!                                      invoke → (persist | PipelineError::MigrationFailed)
//! ```
//!
//! Each stage completes before the next starts. The first error ends the run.

use crate::error::PipelineError;
use crate::validate::validate_path;
use std::path::{Path, PathBuf};
use tsmig_project::{locate_config, persist, Persisted, ProjectConfig, ScopedWorkspace};
use tsmig_transform::{invoke, MigrationOptions, MigrationSummary, Transform};

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Canonical path of the migrated file
    pub path: PathBuf,
    /// Configuration the file was parsed under
    pub config: PathBuf,
    /// What the transform did
    pub summary: MigrationSummary,
    /// What the persister did
    pub persisted: Persisted,
}

/// Migrate the file at `path` with `transform`
///
/// Only the target file is ever written, only after the transform succeeds,
/// and at most once.
///
/// # Errors
/// The first stage error; see [`PipelineError`]
pub async fn run(path: &Path, transform: &dyn Transform) -> Result<Outcome, PipelineError> {
    let target = validate_path(path)?;
    tracing::debug!("Validated {} ({})", target.path.display(), target.kind);

    let start_dir = target.path.parent().unwrap_or(&target.path);
    let config = match locate_config(start_dir) {
        Some(config_path) => {
            tracing::debug!("Using {}", config_path.display());
            Some(ProjectConfig::load(config_path).await?)
        }
        None => None,
    };

    let mut workspace = ScopedWorkspace::build(config.as_ref(), &target.path).await?;

    let summary = invoke(transform, workspace.target_mut(), &MigrationOptions::FIXED)
        .map_err(|failure| PipelineError::migration_failed(&target.path, failure))?;

    let persisted = persist(&workspace).await?;

    Ok(Outcome {
        path: target.path,
        config: workspace.config_path().to_path_buf(),
        summary,
        persisted,
    })
}
