//! Single-entry operations against the export directory.

use std::path::{Path, PathBuf};

use crate::capability::FileSystemCapability;
use crate::error::{CoreError, CoreResult};

/// Deletes the file named `name` inside `dir`.
///
/// Never retried automatically; a repeat requires explicit user action.
///
/// # Errors
///
/// [`CoreError::DeleteFailed`] when the file is already gone or removal is
/// denied. The failure is logged here; the caller decides whether to
/// reconcile with a full listing.
pub async fn delete_file(
    fs: &dyn FileSystemCapability,
    dir: &Path,
    name: &str,
) -> CoreResult<()> {
    let path = dir.join(name);
    fs.remove_file(&path).await.map_err(|source| {
        let err = CoreError::DeleteFailed(path.clone());
        tracing::warn!("{err}: {source}");
        err
    })
}

/// Joins the export directory and an entry name into an absolute path.
pub fn resolve_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}

/// Writes the absolute path of `name` to the system clipboard.
///
/// Returns the resolved path on success. Failure never touches catalog or
/// preview state; callers surface it as a passing notification.
///
/// # Errors
///
/// [`CoreError::ClipboardFailed`] when the clipboard is unavailable or the
/// write fails.
pub fn copy_path(dir: &Path, name: &str) -> CoreResult<PathBuf> {
    let path = resolve_path(dir, name);
    let text = path.display().to_string();

    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| CoreError::ClipboardFailed(e.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| CoreError::ClipboardFailed(e.to_string()))?;

    Ok(path)
}
