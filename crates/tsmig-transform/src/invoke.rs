//! Invoking a transform against a single file
//!
//! The invoker is the boundary between the pipeline and an opaque
//! [`Transform`]. Returned errors and panics are both converted into a
//! [`MigrationFailed`]; nothing escapes as an unwind.

use crate::transform::{MigrationOptions, Transform};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use tsmig_artifact::{ContentHash, SourceFile};

/// Result of a successful migration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationSummary {
    /// Name of the transform that ran
    pub transform: String,
    /// Hash of the text before the transform
    pub before: ContentHash,
    /// Hash of the text after the transform
    pub after: ContentHash,
}

impl MigrationSummary {
    /// Whether the transform changed the text
    #[inline]
    #[must_use]
    pub fn changed(&self) -> bool {
        self.before != self.after
    }
}

/// How a migration failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    /// The transform returned an error
    Error,
    /// The transform panicked
    Panic,
    /// The transform left the file with syntax errors
    InvalidOutput,
}

/// A failed migration; the file must not be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFailed {
    /// Name of the transform that failed
    pub transform: String,
    /// How it failed
    pub cause: FailureCause,
    /// Captured message, if the failure carried one
    pub message: Option<String>,
}

impl MigrationFailed {
    /// Create migration failure
    #[inline]
    #[must_use]
    pub fn new(transform: impl Into<String>, cause: FailureCause, message: Option<String>) -> Self {
        Self {
            transform: transform.into(),
            cause,
            message,
        }
    }
}

impl fmt::Display for MigrationFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.cause, &self.message) {
            (FailureCause::Panic, Some(message)) => {
                write!(f, "transform `{}` panicked: {message}", self.transform)
            }
            (FailureCause::Panic, None) => write!(f, "transform `{}` panicked", self.transform),
            (_, Some(message)) => write!(f, "transform `{}` failed: {message}", self.transform),
            (_, None) => write!(f, "transform `{}` failed", self.transform),
        }
    }
}

impl std::error::Error for MigrationFailed {}

/// Run `transform` over `file` with `options`
///
/// On success the file holds the transformed tree and can be persisted. On
/// failure its in-memory state is unspecified and must be discarded.
///
/// # Errors
/// `MigrationFailed` if the transform returns an error, panics, or leaves the
/// text with a syntax error
pub fn invoke(
    transform: &dyn Transform,
    file: &mut SourceFile,
    options: &MigrationOptions,
) -> Result<MigrationSummary, MigrationFailed> {
    let name = transform.name().to_string();
    let before = file.current_hash();
    tracing::debug!("Running {name} on {}", file.path().display());

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| transform.transform(file, options)));
    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            tracing::warn!("{name} failed on {}: {err}", file.path().display());
            return Err(MigrationFailed::new(
                name,
                FailureCause::Error,
                Some(err.to_string()),
            ));
        }
        Err(payload) => {
            tracing::warn!("{name} panicked on {}", file.path().display());
            return Err(MigrationFailed::new(
                name,
                FailureCause::Panic,
                panic_message(payload.as_ref()),
            ));
        }
    }

    if let Some(site) = file.tree().syntax_error() {
        return Err(MigrationFailed::new(
            name,
            FailureCause::InvalidOutput,
            Some(format!("transform produced invalid syntax at {site}")),
        ));
    }

    Ok(MigrationSummary {
        transform: name,
        before,
        after: file.current_hash(),
    })
}

/// Text of a `panic!` payload; other payload types carry no message
fn panic_message(payload: &(dyn Any + Send)) -> Option<String> {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
}
