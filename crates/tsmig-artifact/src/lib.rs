//! tsmig Artifact System
//!
//! Source files and their syntax trees.
//!
//! # Core Concepts
//!
//! - [`SourceKind`]: the four recognized source extensions
//! - [`CompilerSettings`]: the `compilerOptions` a project is loaded with
//! - [`SourceTree`]: text + tree-sitter tree, mutated through [`TextEdit`]s
//! - [`SourceFile`]: a tree bound to its path, loaded and saved with tokio
//! - [`ContentHash`]: 32-byte Blake3 hash for change detection
//!
//! # Example
//!
//! ```rust,ignore
//! use tsmig_artifact::{SourceFile, TextEdit};
//!
//! let mut file = SourceFile::load("src/a.ts").await?;
//! file.apply_edits(vec![TextEdit::replace(0..3, "var")])?;
//! if file.is_modified() {
//!     file.save().await?;
//! }
//! ```

#![warn(unreachable_pub)]

mod error;
mod file;
mod hash;
mod kind;
mod settings;
mod tree;

pub use error::{EditError, ParseError, SyntaxErrorSite, TreeError, WriteError};
pub use file::SourceFile;
pub use hash::ContentHash;
pub use kind::SourceKind;
pub use settings::{CompilerSettings, JsxEmit};
pub use tree::{ModuleSpecifier, SourceTree, TextEdit};

/// Re-export of the tree-sitter node type handed to transforms
pub use tree_sitter::Node;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
