//! Error types for `outtray-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`.
//!
//! Failures are caught where they occur, logged, and converted into a safe
//! default (empty catalog, unsupported preview, unchanged catalog). The
//! variants below exist so those diagnostics carry a stable shape; callers
//! never see them as unhandled faults.

use std::path::PathBuf;

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the caller to display
/// a meaningful message or take corrective action.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The export directory could not be created and stays unusable for
    /// the rest of the session.
    #[error("export directory unavailable: {0}")]
    DirectoryUnavailable(PathBuf),

    /// The export directory could not be enumerated at all.
    #[error("directory listing failed: {0}")]
    ListingFailed(String),

    /// Metadata for a single directory entry could not be read.
    #[error("metadata unavailable for entry: {0}")]
    EntryMetadataFailed(String),

    /// A file's content could not be read.
    #[error("read failed: {0}")]
    ReadFailed(PathBuf),

    /// A file was read but its content could not be decoded as the format
    /// its extension promised.
    #[error("{0} decode failed: {1}")]
    DecodeFailed(&'static str, String),

    /// A file could not be removed (already gone, permission denied, ...).
    #[error("delete failed: {0}")]
    DeleteFailed(PathBuf),

    /// The system clipboard rejected the path string.
    #[error("clipboard write failed: {0}")]
    ClipboardFailed(String),

    /// No file system capability was resolved at startup; catalog, preview,
    /// delete, and copy operations are disabled outside the desktop host.
    #[error("no file system access in this environment; use the host's downloads UI instead")]
    HostUnavailable,

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout `outtray-core`.
pub type CoreResult<T> = Result<T, CoreError>;
