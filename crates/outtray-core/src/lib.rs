//! OutTray core library — export-folder catalog and preview logic.
//!
//! `outtray-core` maintains the dedicated "exported files" directory of a
//! desktop application: it enumerates the directory into a sorted catalog,
//! previews entries through per-format decoders, deletes single entries,
//! and resolves their absolute paths for the clipboard. It is intentionally
//! decoupled from any UI framework — frontends invoke the operations on
//! [`session::ExportSession`] and render the results.
//!
//! # Modules
//!
//! - [`capability`] — Host file-system access, resolved once at startup and injected.
//! - [`config`] — TOML-based configuration: export folder name, preview limits.
//! - [`fs`] — Catalog entries, directory bootstrap, the sorted catalog, file operations.
//! - [`preview`] — Extension classification, per-format decoding, render-resource lifetime.
//! - [`session`] — The stateful façade frontends drive.
//! - [`error`] — Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod capability;
pub mod config;
pub mod error;
pub mod fs;
pub mod preview;
pub mod session;

pub use capability::{EntryMetadata, FileBytes, FileSystemCapability, NativeFileSystem};
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use fs::catalog::{FileCatalog, RefreshToken};
pub use fs::entry::FileEntry;
pub use fs::ops::{copy_path, delete_file, resolve_path};
pub use fs::sync::DirectoryState;
pub use preview::resource::{RenderHandle, RenderedDocument, ResourceLifecycle};
pub use preview::tabular::TabularPreview;
pub use preview::{FormatRegistry, PreviewDispatcher, PreviewKind, PreviewResult};
pub use session::ExportSession;
