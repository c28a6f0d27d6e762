//! tsmig Transform System
//!
//! Rewrites applied to a single parsed file.
//!
//! # Core Concepts
//!
//! - [`Transform`]: rewrites one [`SourceFile`](tsmig_artifact::SourceFile) in place
//! - [`MigrationOptions`]: fixed options handed to every transform
//! - [`invoke`]: runs a transform, turning errors and panics into [`MigrationFailed`]
//! - [`RuleSet`]: TOML-driven import and rename rules; the built-in table
//!   migrates Material-UI v4 code to MUI v5
//!
//! # Example
//!
//! ```rust,ignore
//! use tsmig_transform::{invoke, MigrationOptions, RuleSet};
//!
//! let rules = RuleSet::builtin()?;
//! let summary = invoke(&rules, &mut file, &MigrationOptions::FIXED)?;
//! if summary.changed() {
//!     // persist
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod invoke;
mod rewrite;
mod rules;
mod transform;

pub use invoke::{invoke, FailureCause, MigrationFailed, MigrationSummary};
pub use rewrite::plan_edits;
pub use rules::{ImportRule, RenameRule, RuleError, RuleSet, BUILTIN_RULES};
pub use transform::{MigrationOptions, Transform, TransformError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
