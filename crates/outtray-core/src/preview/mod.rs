//! Multi-format preview dispatch.
//!
//! A file is classified by the lowercased suffix after the last `.` of its
//! name — never by content — and decoded through the matching strategy:
//! plain text, delimited tabular data, or a binary payload rendered through
//! the resource lifecycle. Unknown extensions and every read or decode
//! failure degrade to [`PreviewResult::Unsupported`] with a logged
//! diagnostic; nothing here returns a hard error to the caller.

pub mod resource;
pub mod tabular;

use std::collections::HashMap;
use std::path::Path;

use crate::capability::FileSystemCapability;
use crate::error::{CoreError, CoreResult};
use crate::preview::resource::{RenderHandle, ResourceLifecycle};
use crate::preview::tabular::TabularPreview;

/// Decode strategy for a file, derived from its extension only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviewKind {
    Text,
    Tabular,
    Binary,
    Unsupported,
}

/// The decoded, renderable representation of one selected file.
///
/// At most one result is active at a time; consumers match exhaustively.
#[derive(Debug, PartialEq, Eq)]
pub enum PreviewResult {
    /// Exact UTF-8 content of a plain-text file, no trimming or
    /// normalization beyond decoding.
    Text(String),
    /// Header-keyed records of a delimited file.
    Tabular(TabularPreview),
    /// Handle to the rendered binary document held by the resource
    /// lifecycle.
    Binary(RenderHandle),
    /// The file cannot be previewed: unknown extension or failed decode.
    Unsupported,
}

/// Extension → strategy registry.
///
/// Unknown keys fail closed to [`PreviewKind::Unsupported`]. Supporting a
/// new format means one entry here plus a decode arm in
/// [`PreviewDispatcher::open`].
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    kinds: HashMap<&'static str, PreviewKind>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        let mut kinds = HashMap::new();
        kinds.insert("txt", PreviewKind::Text);
        kinds.insert("csv", PreviewKind::Tabular);
        kinds.insert("pdf", PreviewKind::Binary);
        Self { kinds }
    }
}

impl FormatRegistry {
    /// Classifies a file name by the lowercased suffix after the last `.`.
    ///
    /// Pure: content is never inspected. Names without an extension (and
    /// bare dotfiles like `.gitignore`) are unsupported.
    pub fn classify(&self, file_name: &str) -> PreviewKind {
        match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => self
                .kinds
                .get(ext.to_lowercase().as_str())
                .copied()
                .unwrap_or(PreviewKind::Unsupported),
            _ => PreviewKind::Unsupported,
        }
    }
}

/// Classifies and decodes files into preview representations.
pub struct PreviewDispatcher {
    registry: FormatRegistry,
    max_file_size: u64,
}

impl PreviewDispatcher {
    pub fn new(registry: FormatRegistry, max_file_size: u64) -> Self {
        Self {
            registry,
            max_file_size,
        }
    }

    /// Classifies `file_name` without touching the file system.
    pub fn classify(&self, file_name: &str) -> PreviewKind {
        self.registry.classify(file_name)
    }

    /// Decodes the file at `path` according to its classification.
    ///
    /// Binary previews register their rendered document with `resources`
    /// and carry the issued handle. Every failure path — missing file,
    /// permission error, oversized file, malformed content — degrades to
    /// [`PreviewResult::Unsupported`] with a logged diagnostic; this
    /// method never returns an error.
    pub async fn open(
        &self,
        fs: &dyn FileSystemCapability,
        path: &Path,
        resources: &mut ResourceLifecycle,
    ) -> PreviewResult {
        let kind = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => self.registry.classify(name),
            None => PreviewKind::Unsupported,
        };

        match self.decode(fs, path, kind, resources).await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!("preview of {} failed: {err}", path.display());
                PreviewResult::Unsupported
            }
        }
    }

    async fn decode(
        &self,
        fs: &dyn FileSystemCapability,
        path: &Path,
        kind: PreviewKind,
        resources: &mut ResourceLifecycle,
    ) -> CoreResult<PreviewResult> {
        if kind == PreviewKind::Unsupported {
            return Ok(PreviewResult::Unsupported);
        }

        let meta = fs
            .metadata(path)
            .await
            .map_err(|_| CoreError::ReadFailed(path.to_path_buf()))?;
        if meta.len > self.max_file_size {
            tracing::warn!(
                "skipping preview of {}: {} bytes exceeds the {} byte limit",
                path.display(),
                meta.len,
                self.max_file_size
            );
            return Ok(PreviewResult::Unsupported);
        }

        let bytes = fs
            .read(path)
            .await
            .map_err(|_| CoreError::ReadFailed(path.to_path_buf()))?
            .into_bytes()?;

        Ok(match kind {
            PreviewKind::Text => PreviewResult::Text(decode_utf8(bytes)?),
            PreviewKind::Tabular => PreviewResult::Tabular(tabular::parse(&decode_utf8(bytes)?)?),
            PreviewKind::Binary => PreviewResult::Binary(resources.acquire(bytes)?),
            PreviewKind::Unsupported => PreviewResult::Unsupported,
        })
    }
}

fn decode_utf8(bytes: Vec<u8>) -> CoreResult<String> {
    String::from_utf8(bytes).map_err(|e| CoreError::DecodeFailed("utf-8", e.to_string()))
}
