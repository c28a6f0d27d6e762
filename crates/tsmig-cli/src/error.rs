//! Pipeline error taxonomy
//!
//! Every stage error is terminal. [`PipelineError`] is what the binary
//! reports before exiting with status 1.

use std::path::PathBuf;
use tsmig_artifact::{ParseError, WriteError};
use tsmig_project::{ConfigError, ProjectError};
use tsmig_transform::{MigrationFailed, RuleError};

/// Errors that end a pipeline run
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// No file argument was given
    #[error("missing argument: expected the path of a file to migrate")]
    MissingArgument,

    /// The file does not have a recognized source extension
    #[error("{path} is not a TypeScript or JavaScript file (expected .ts, .tsx, .js or .jsx)")]
    InvalidExtension {
        /// Path as given
        path: PathBuf,
    },

    /// Nothing exists at the path, or it is not a regular file
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path as given
        path: PathBuf,
    },

    /// No `tsconfig.json` above the file
    #[error("no tsconfig.json found in any parent directory of {path}")]
    ConfigurationMissing {
        /// Target file
        path: PathBuf,
    },

    /// The located `tsconfig.json` (or one it extends) is unusable
    #[error(transparent)]
    ConfigInvalid(#[from] ConfigError),

    /// The target could not be read or parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The scoped workspace did not end up with exactly the target
    #[error("scoped workspace for {path} holds {members} files, expected exactly 1")]
    ScopeViolation {
        /// Target file
        path: PathBuf,
        /// Members found
        members: usize,
    },

    /// The transform failed; nothing was written
    #[error("migration of {path} failed: {source}")]
    MigrationFailed {
        /// Target file
        path: PathBuf,
        /// The captured failure
        #[source]
        source: MigrationFailed,
    },

    /// The migrated file could not be written back
    #[error(transparent)]
    Write(#[from] WriteError),

    /// The rule table could not be loaded
    #[error(transparent)]
    Rules(#[from] RuleError),
}

impl PipelineError {
    /// Create migration failure error
    #[inline]
    #[must_use]
    pub fn migration_failed(path: impl Into<PathBuf>, source: MigrationFailed) -> Self {
        Self::MigrationFailed {
            path: path.into(),
            source,
        }
    }

    /// The failure, if this is a migration failure
    #[must_use]
    pub fn as_migration_failure(&self) -> Option<&MigrationFailed> {
        match self {
            Self::MigrationFailed { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Whether the error points at a defect rather than at the input
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::MigrationFailed { .. } | Self::ScopeViolation { .. } | Self::Rules(_)
        )
    }
}

impl From<ProjectError> for PipelineError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::ConfigurationMissing { target } => {
                Self::ConfigurationMissing { path: target }
            }
            ProjectError::Config(err) => Self::ConfigInvalid(err),
            ProjectError::Parse(err) => Self::Parse(err),
            ProjectError::ScopeViolation { target, members } => Self::ScopeViolation {
                path: target,
                members,
            },
        }
    }
}
