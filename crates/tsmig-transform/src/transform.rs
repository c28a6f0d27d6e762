//! Transform trait and core types
//!
//! A [`Transform`] rewrites one [`SourceFile`] in place. The pipeline treats
//! it as opaque: it may return an error or panic, and the invoker turns
//! either into a migration failure.

use tsmig_artifact::{EditError, SourceFile};

/// Options handed to every transform
///
/// The pipeline always uses [`MigrationOptions::FIXED`]; they are not
/// user-configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationOptions {
    /// Rewrite module specifiers of import/export declarations
    pub migrate_imports: bool,
}

impl MigrationOptions {
    /// The options every pipeline run uses
    pub const FIXED: Self = Self {
        migrate_imports: true,
    };
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self::FIXED
    }
}

/// Rewrite of a single source file
///
/// # Contract
/// Implementations mutate `file` only through [`SourceFile::apply_edits`].
/// Returning `Err` or panicking aborts the migration; the file on disk is
/// left untouched either way.
pub trait Transform: std::fmt::Debug {
    /// Transform name (for logs and diagnostics)
    fn name(&self) -> &str;

    /// Rewrite `file` in place
    ///
    /// # Errors
    /// Any `TransformError`; the caller discards the file
    fn transform(&self, file: &mut SourceFile, options: &MigrationOptions)
        -> Result<(), TransformError>;
}

/// Errors raised by a transform
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// Edits could not be applied to the tree
    #[error("could not apply edits: {0}")]
    Edit(#[from] EditError),

    /// Transform-specific error
    #[error("{0}")]
    Transform(String),
}

impl TransformError {
    /// Create transform-specific error
    #[inline]
    #[must_use]
    pub fn transform(message: impl Into<String>) -> Self {
        Self::Transform(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_options_migrate_imports() {
        assert!(MigrationOptions::FIXED.migrate_imports);
        assert_eq!(MigrationOptions::default(), MigrationOptions::FIXED);
    }

    #[test]
    fn error_messages() {
        assert_eq!(TransformError::transform("boom").to_string(), "boom");

        let edit = EditError::Overlap(4);
        assert!(TransformError::from(edit)
            .to_string()
            .starts_with("could not apply edits:"));
    }
}
