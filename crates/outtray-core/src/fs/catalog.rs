//! Sorted in-memory view of the export directory.

use std::cmp::Reverse;
use std::path::Path;

use futures::future::join_all;

use crate::capability::FileSystemCapability;
use crate::error::{CoreError, CoreResult};
use crate::fs::entry::FileEntry;

/// The catalog of the export directory plus refresh bookkeeping.
///
/// Entries are kept descending by modification time. Each refresh draws a
/// [`RefreshToken`]; only the newest in-flight refresh may commit, so a
/// slow stale listing can never overwrite a fresher one.
#[derive(Debug, Default)]
pub struct FileCatalog {
    entries: Vec<FileEntry>,
    generation: u64,
}

/// Ties one refresh to the generation it started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshToken(u64);

impl FileCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current entries, descending by modification time.
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Looks up an entry by name.
    pub fn get(&self, name: &str) -> Option<&FileEntry> {
        self.entries.iter().find(|e| e.name() == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Marks the start of a refresh and invalidates all earlier tokens.
    pub fn begin_refresh(&mut self) -> RefreshToken {
        self.generation += 1;
        RefreshToken(self.generation)
    }

    /// Commits a finished refresh.
    ///
    /// Returns `false` and leaves the catalog untouched when `token` is no
    /// longer the newest refresh; the stale result is discarded.
    pub fn commit(&mut self, token: RefreshToken, entries: Vec<FileEntry>) -> bool {
        if token.0 != self.generation {
            tracing::debug!(
                "discarding stale catalog refresh (token {} superseded by {})",
                token.0,
                self.generation
            );
            return false;
        }
        self.entries = entries;
        true
    }

    /// Removes one entry by name without rescanning the directory.
    ///
    /// Returns `true` when an entry was removed. Order of the remaining
    /// entries is preserved.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.name() != name);
        self.entries.len() < before
    }
}

/// Reads the export directory into a sorted entry list.
///
/// Non-regular-file entries are skipped. Per-entry metadata is fetched
/// concurrently and joined once; an entry whose metadata cannot be read is
/// skipped with a warning instead of failing the listing. A directory that
/// cannot be enumerated at all yields an empty list with a logged error —
/// this function never returns an error.
pub async fn list(fs: &dyn FileSystemCapability, dir: &Path) -> Vec<FileEntry> {
    match read_entries(fs, dir).await {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!("{err}");
            Vec::new()
        }
    }
}

async fn read_entries(fs: &dyn FileSystemCapability, dir: &Path) -> CoreResult<Vec<FileEntry>> {
    let names = fs
        .read_dir(dir)
        .await
        .map_err(|e| CoreError::ListingFailed(format!("{}: {e}", dir.display())))?;

    // Per-entry stats run as independent futures; this join is the only
    // synchronization point in the subsystem.
    let stats = join_all(names.iter().map(|name| {
        let path = dir.join(name);
        async move { fs.metadata(&path).await }
    }))
    .await;

    let mut entries = Vec::with_capacity(names.len());
    for (name, stat) in names.iter().zip(stats) {
        match stat {
            Ok(meta) if meta.is_file => entries.push(FileEntry::new(name, meta.modified)),
            Ok(_) => {}
            Err(source) => {
                let err = CoreError::EntryMetadataFailed(name.clone());
                tracing::warn!("{err}: {source}");
            }
        }
    }

    // Stable sort: equal timestamps keep their enumeration order.
    entries.sort_by_key(|e| Reverse(e.modified_ms()));
    Ok(entries)
}
