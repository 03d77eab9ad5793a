//! Export directory bootstrap.

use std::path::Path;

use crate::capability::FileSystemCapability;
use crate::error::CoreError;

/// Whether the export directory is usable this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryState {
    /// The directory exists (or was just created).
    Available,
    /// Creation failed; the directory stays unusable for the session.
    Unavailable,
}

/// Ensures the export directory exists, creating missing ancestors.
///
/// Idempotent: calling it on an existing directory succeeds without error,
/// so running it twice in sequence is always safe. Creation failure is
/// logged and reported as [`DirectoryState::Unavailable`] rather than
/// propagated — callers must treat "directory still absent after ensure"
/// as a valid terminal state.
pub async fn ensure_directory(fs: &dyn FileSystemCapability, path: &Path) -> DirectoryState {
    match fs.create_dir_all(path).await {
        Ok(()) => DirectoryState::Available,
        Err(source) => {
            let err = CoreError::DirectoryUnavailable(path.to_path_buf());
            tracing::warn!("{err}: {source}");
            DirectoryState::Unavailable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::NativeFileSystem;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn creates_directory_with_ancestors() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("Documents").join("OutTray");

        let state = ensure_directory(&NativeFileSystem, &dir).await;

        assert_eq!(state, DirectoryState::Available);
        assert!(dir.is_dir());
    }

    #[tokio::test]
    async fn second_call_never_errors() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("OutTray");

        let first = ensure_directory(&NativeFileSystem, &dir).await;
        let second = ensure_directory(&NativeFileSystem, &dir).await;

        assert_eq!(first, DirectoryState::Available);
        assert_eq!(second, DirectoryState::Available);
    }

    #[tokio::test]
    async fn creation_failure_reports_unavailable() {
        let tmp = TempDir::new().unwrap();
        // A file where an ancestor directory should be makes creation fail.
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let state = ensure_directory(&NativeFileSystem, &blocker.join("OutTray")).await;

        assert_eq!(state, DirectoryState::Unavailable);
    }
}
