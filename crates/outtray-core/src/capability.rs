//! Host file-system capability.
//!
//! Catalog, preview, delete, and copy operations only make sense inside the
//! desktop host runtime. The capability is resolved once at startup via
//! [`resolve`] and injected into [`crate::session::ExportSession`]; call
//! sites never sniff the environment themselves. When the capability is
//! absent the session reports [`crate::CoreError::HostUnavailable`] and the
//! frontend directs the user to the host's native downloads UI.

use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

use async_trait::async_trait;
use base64::Engine;

use crate::error::{CoreError, CoreResult};

/// File content as delivered by the host.
///
/// Some hosts hand binary payloads over as base64 strings rather than raw
/// bytes. Both forms normalize to the same byte vector through
/// [`FileBytes::into_bytes`], so decoding never observes the difference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileBytes {
    Raw(Vec<u8>),
    Base64(String),
}

impl FileBytes {
    /// Normalizes to raw bytes.
    ///
    /// # Errors
    ///
    /// [`CoreError::DecodeFailed`] when a base64 payload is malformed.
    pub fn into_bytes(self) -> CoreResult<Vec<u8>> {
        match self {
            FileBytes::Raw(bytes) => Ok(bytes),
            FileBytes::Base64(encoded) => base64::engine::general_purpose::STANDARD
                .decode(encoded.trim())
                .map_err(|e| CoreError::DecodeFailed("base64", e.to_string())),
        }
    }
}

/// The metadata subset the catalog needs for one directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMetadata {
    /// `true` only for regular files; directories and symlinks are skipped
    /// by the catalog.
    pub is_file: bool,
    /// File size in bytes.
    pub len: u64,
    /// Last-modified time, if the host reports one.
    pub modified: Option<SystemTime>,
}

/// File-system operations provided by the desktop host.
///
/// Implementations map their native failures to [`CoreError`]; policy
/// decisions (skip vs. abort, safe defaults) live in the callers.
#[async_trait]
pub trait FileSystemCapability: Send + Sync {
    /// Creates `path` and any missing ancestors. Succeeds if it already exists.
    async fn create_dir_all(&self, path: &Path) -> CoreResult<()>;

    /// Returns the names of the entries directly inside `path`.
    async fn read_dir(&self, path: &Path) -> CoreResult<Vec<String>>;

    /// Reads metadata for `path` without following symlinks.
    async fn metadata(&self, path: &Path) -> CoreResult<EntryMetadata>;

    /// Reads the full content of the file at `path`.
    async fn read(&self, path: &Path) -> CoreResult<FileBytes>;

    /// Removes the regular file at `path`.
    async fn remove_file(&self, path: &Path) -> CoreResult<()>;
}

/// Native capability backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFileSystem;

#[async_trait]
impl FileSystemCapability for NativeFileSystem {
    async fn create_dir_all(&self, path: &Path) -> CoreResult<()> {
        tokio::fs::create_dir_all(path).await?;
        Ok(())
    }

    async fn read_dir(&self, path: &Path) -> CoreResult<Vec<String>> {
        let mut dir = tokio::fs::read_dir(path).await?;
        let mut names = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    async fn metadata(&self, path: &Path) -> CoreResult<EntryMetadata> {
        // symlink_metadata: a symlink never counts as a regular file
        let meta = tokio::fs::symlink_metadata(path).await?;
        Ok(EntryMetadata {
            is_file: meta.is_file(),
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }

    async fn read(&self, path: &Path) -> CoreResult<FileBytes> {
        Ok(FileBytes::Raw(tokio::fs::read(path).await?))
    }

    async fn remove_file(&self, path: &Path) -> CoreResult<()> {
        tokio::fs::remove_file(path).await?;
        Ok(())
    }
}

/// Resolves the host file-system capability once at startup.
///
/// Returns `None` when the build targets an environment without direct
/// file-system access; sessions constructed without a capability disable
/// catalog, preview, delete, and copy operations.
#[cfg(not(target_arch = "wasm32"))]
pub fn resolve() -> Option<Arc<dyn FileSystemCapability>> {
    Some(Arc::new(NativeFileSystem))
}

/// Resolves the host file-system capability once at startup.
#[cfg(target_arch = "wasm32")]
pub fn resolve() -> Option<Arc<dyn FileSystemCapability>> {
    None
}
