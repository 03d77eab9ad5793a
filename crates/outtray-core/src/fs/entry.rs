//! Catalog entry representation.

use std::time::{SystemTime, UNIX_EPOCH};

use unicode_normalization::UnicodeNormalization;

/// A single regular file in the export directory.
///
/// `FileEntry` is immutable — the catalog creates fresh instances on every
/// refresh rather than mutating existing ones. Directories and other
/// non-file entries are never represented.
///
/// Names are NFC-normalized: macOS stores filenames in NFD (decomposed),
/// which makes Hangul appear as individual Jamo otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    name: String,
    modified_ms: i64,
}

impl FileEntry {
    /// Creates an entry from a file name and its last-modified time.
    ///
    /// A missing modification time is stored as `0`.
    pub fn new(name: &str, modified: Option<SystemTime>) -> Self {
        Self {
            name: name.nfc().collect(),
            modified_ms: modified.map(epoch_ms).unwrap_or(0),
        }
    }

    /// Returns the file name (unique within one catalog snapshot).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last-modified time in milliseconds since the Unix epoch, `0` when
    /// the time was unavailable.
    pub fn modified_ms(&self) -> i64 {
        self.modified_ms
    }
}

fn epoch_ms(t: SystemTime) -> i64 {
    match t.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_millis() as i64,
        // Pre-epoch timestamps become negative rather than panicking.
        Err(e) => -(e.duration().as_millis() as i64),
    }
}
