//! tsmig Command Line
//!
//! Migrates one TypeScript or JavaScript file in place, parsed under the
//! settings of its nearest `tsconfig.json`.
//!
//! # Stages
//!
//! - [`validate_path`]: recognized extension, existing file
//! - [`run`]: locate and load configuration, build a single-file workspace,
//!   invoke the transform, persist on success
//! - [`report_failure`]: render any [`PipelineError`] for the user
//!
//! # Example
//!
//! ```rust,ignore
//! use tsmig_cli::{report_failure, run};
//! use tsmig_transform::RuleSet;
//!
//! let rules = RuleSet::builtin()?;
//! if let Err(err) = run(Path::new("src/theme.ts"), &rules).await {
//!     report_failure(&mut std::io::stderr(), Some(path), &err)?;
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod pipeline;
pub mod report;
pub mod validate;

pub use error::PipelineError;
pub use pipeline::{run, Outcome};
pub use report::{report_failure, ISSUE_TRACKER};
pub use validate::{validate_path, ValidTarget};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
