//! Writing the migrated file back to disk

use crate::workspace::ScopedWorkspace;
use tsmig_artifact::WriteError;

/// What the persister did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persisted {
    /// The file was rewritten
    Written {
        /// Bytes written
        bytes: usize,
    },
    /// Content was identical to what is on disk; nothing was written
    Unchanged,
}

/// Write the workspace's single file back to its original path
///
/// Only the target is ever written; a [`ScopedWorkspace`] holds nothing else.
/// Content identical to what was loaded is not rewritten.
///
/// # Errors
/// Returns `WriteError` if the write fails. The error is not retried and the
/// previous content is not restored.
pub async fn persist(workspace: &ScopedWorkspace) -> Result<Persisted, WriteError> {
    let file = workspace.target();
    if !file.is_modified() {
        tracing::info!("{} unchanged", file.path().display());
        return Ok(Persisted::Unchanged);
    }

    file.save().await?;
    tracing::info!(
        "Migrated {} ({} -> {})",
        file.path().display(),
        file.original_hash().short(),
        file.current_hash().short()
    );
    Ok(Persisted::Written {
        bytes: file.text().len(),
    })
}
