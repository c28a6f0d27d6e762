//! Error types for project loading
//!
//! Provides error handling for:
//! - Configuration loading (`tsconfig.json` and its `extends` chain)
//! - Workspace construction (file loading, single-member scoping)

use std::path::PathBuf;
use tsmig_artifact::ParseError;

/// Errors reading a `tsconfig.json` chain
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading a configuration file
    #[error("io error reading {path}: {source}")]
    Io {
        /// Configuration file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration is not valid JSONC or has the wrong shape
    #[error("invalid configuration {path}: {source}")]
    Syntax {
        /// Configuration file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// An `extends` entry does not resolve to a file
    #[error("{path} extends '{spec}', which could not be found")]
    ExtendsNotFound {
        /// Configuration declaring the `extends`
        path: PathBuf,
        /// The unresolved specifier
        spec: String,
    },

    /// The `extends` chain loops back on itself
    #[error("configuration {0} extends itself")]
    Cycle(PathBuf),
}

/// Errors building a workspace
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// No configuration was located for the target
    #[error("no tsconfig.json found in any parent directory of {target}")]
    ConfigurationMissing {
        /// File the configuration was looked up for
        target: PathBuf,
    },

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A workspace member could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Scoped workspace ended up with other than one member
    #[error("scoped workspace for {target} holds {members} files, expected exactly 1")]
    ScopeViolation {
        /// Intended single member
        target: PathBuf,
        /// Member count found
        members: usize,
    },
}
