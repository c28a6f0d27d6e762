//! tsmig Project Layer
//!
//! The boundary between the filesystem and the single file being migrated.
//!
//! # Core Operations
//!
//! - **Locate**: find the nearest `tsconfig.json` above a file
//! - **Load**: read it (JSONC, `extends` chain) into [`ProjectConfig`]
//! - **Scope**: build a [`ScopedWorkspace`] that owns only the target file
//! - **Persist**: write the target back, and nothing else
//!
//! # Architecture
//!
//! ```text
//! target dir → locate_config → ProjectConfig::load → ScopedWorkspace::build
//!                                                         ↓
//!                                  (transform) → persist → target file
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use tsmig_project::{locate_config, persist, ProjectConfig, ScopedWorkspace};
//!
//! let config_path = locate_config(target.parent().unwrap());
//! let config = match config_path {
//!     Some(path) => Some(ProjectConfig::load(path).await?),
//!     None => None,
//! };
//! let mut workspace = ScopedWorkspace::build(config.as_ref(), &target).await?;
//! // ... mutate workspace.target_mut() ...
//! persist(&workspace).await?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
mod jsonc;
pub mod locate;
pub mod persist;
pub mod workspace;

pub use config::ProjectConfig;
pub use error::{ConfigError, ProjectError};
pub use locate::{locate_config, CONFIG_FILE_NAME};
pub use persist::{persist, Persisted};
pub use workspace::{LoadOptions, ScopedWorkspace, Workspace};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
