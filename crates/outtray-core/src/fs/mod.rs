//! File-system side of the export folder.
//!
//! This module provides the catalog entry type ([`entry::FileEntry`]), the
//! startup directory bootstrap ([`sync::ensure_directory`]), the sorted
//! directory catalog ([`catalog::FileCatalog`]), and single-entry file
//! operations ([`ops`]).

pub mod catalog;
pub mod entry;
pub mod ops;
pub mod sync;

pub use catalog::{FileCatalog, RefreshToken};
pub use entry::FileEntry;
pub use sync::DirectoryState;
