//! Export-folder session: the façade a frontend drives.
//!
//! The session owns the catalog, the active preview, and the render
//! resource slot; no other component mutates them. The host file-system
//! capability is resolved once at startup and injected here — a session
//! constructed without one reports [`CoreError::HostUnavailable`] from
//! every operation so the frontend can point the user at the host's
//! native downloads UI.
//!
//! Control flow matches the frontends' lifecycle: [`ExportSession::start`]
//! once at startup, [`ExportSession::refresh`] to populate the visible
//! set, [`ExportSession::open_preview`] on selection, and
//! [`ExportSession::delete`] / [`ExportSession::copy_path`] on a single
//! catalog entry.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::capability::FileSystemCapability;
use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::fs::catalog::{self, FileCatalog};
use crate::fs::entry::FileEntry;
use crate::fs::ops;
use crate::fs::sync::{self, DirectoryState};
use crate::preview::resource::{RenderHandle, RenderedDocument, ResourceLifecycle};
use crate::preview::{FormatRegistry, PreviewDispatcher, PreviewKind, PreviewResult};

/// Stateful façade over the export directory.
pub struct ExportSession {
    fs: Option<Arc<dyn FileSystemCapability>>,
    export_dir: PathBuf,
    directory: Option<DirectoryState>,
    catalog: FileCatalog,
    dispatcher: PreviewDispatcher,
    resources: ResourceLifecycle,
    active: Option<PreviewResult>,
}

impl ExportSession {
    /// Creates a session for the configured export directory.
    ///
    /// `capability` is the host file system resolved once at startup
    /// ([`crate::capability::resolve`]); pass `None` outside the desktop
    /// host to leave the session disabled.
    pub fn new(config: &Config, capability: Option<Arc<dyn FileSystemCapability>>) -> Self {
        Self {
            fs: capability,
            export_dir: config.export_dir(),
            directory: None,
            catalog: FileCatalog::new(),
            dispatcher: PreviewDispatcher::new(
                FormatRegistry::default(),
                config.preview.max_file_size,
            ),
            resources: ResourceLifecycle::new(),
            active: None,
        }
    }

    /// The export directory this session manages.
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Directory state as of the last [`ExportSession::start`] call, `None`
    /// before startup ran.
    pub fn directory_state(&self) -> Option<DirectoryState> {
        self.directory
    }

    /// Runs the startup directory bootstrap. Safe to call again; an
    /// existing directory never errors.
    ///
    /// An unavailable directory is a valid terminal state: later listings
    /// simply come back empty.
    ///
    /// # Errors
    ///
    /// [`CoreError::HostUnavailable`] without a file-system capability.
    pub async fn start(&mut self) -> CoreResult<DirectoryState> {
        let fs = self.fs()?.clone();
        let state = sync::ensure_directory(fs.as_ref(), &self.export_dir).await;
        self.directory = Some(state);
        Ok(state)
    }

    /// Refreshes the catalog from the directory.
    ///
    /// Listing failures degrade to an empty catalog; overlapping refreshes
    /// are resolved by the catalog's generation token, so a stale listing
    /// never overwrites a fresher one.
    ///
    /// # Errors
    ///
    /// [`CoreError::HostUnavailable`] without a file-system capability.
    pub async fn refresh(&mut self) -> CoreResult<()> {
        let fs = self.fs()?.clone();
        let token = self.catalog.begin_refresh();
        let entries = catalog::list(fs.as_ref(), &self.export_dir).await;
        self.catalog.commit(token, entries);
        Ok(())
    }

    /// The current catalog entries, descending by modification time.
    pub fn entries(&self) -> &[FileEntry] {
        self.catalog.entries()
    }

    /// Classifies a file name without touching the file system.
    pub fn classify(&self, file_name: &str) -> PreviewKind {
        self.dispatcher.classify(file_name)
    }

    /// Opens a preview for the named entry, replacing the active one.
    ///
    /// Any held render resource is released before the new preview is
    /// created. Decode failures surface as [`PreviewResult::Unsupported`],
    /// never as an error.
    ///
    /// # Errors
    ///
    /// [`CoreError::HostUnavailable`] without a file-system capability.
    pub async fn open_preview(&mut self, name: &str) -> CoreResult<&PreviewResult> {
        let fs = self.fs()?.clone();
        self.close_preview();

        let path = ops::resolve_path(&self.export_dir, name);
        let result = self
            .dispatcher
            .open(fs.as_ref(), &path, &mut self.resources)
            .await;
        Ok(self.active.insert(result))
    }

    /// Closes the active preview and releases any held render resource.
    /// No-op when nothing is open.
    pub fn close_preview(&mut self) {
        self.resources.release();
        self.active = None;
    }

    /// The currently shown preview, if any.
    pub fn active_preview(&self) -> Option<&PreviewResult> {
        self.active.as_ref()
    }

    /// Resolves a binary preview handle to its rendered document.
    pub fn rendered(&self, handle: RenderHandle) -> Option<&RenderedDocument> {
        self.resources.resolve(handle)
    }

    /// Number of live render resources — always `0` or `1`.
    pub fn live_render_resources(&self) -> usize {
        self.resources.live_count()
    }

    /// Deletes the named entry's file and drops it from the catalog in
    /// place, without a rescan.
    ///
    /// On failure the catalog is left unchanged; the caller may run
    /// [`ExportSession::refresh`] to reconcile.
    ///
    /// # Errors
    ///
    /// [`CoreError::HostUnavailable`] without a file-system capability,
    /// [`CoreError::DeleteFailed`] when removal fails.
    pub async fn delete(&mut self, name: &str) -> CoreResult<()> {
        let fs = self.fs()?.clone();
        ops::delete_file(fs.as_ref(), &self.export_dir, name).await?;
        self.catalog.remove(name);
        Ok(())
    }

    /// Absolute path of the named entry.
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        ops::resolve_path(&self.export_dir, name)
    }

    /// Copies the named entry's absolute path to the system clipboard.
    ///
    /// Failure is a passing notification for the caller; catalog and
    /// preview state are never affected.
    ///
    /// # Errors
    ///
    /// [`CoreError::HostUnavailable`] without a file-system capability,
    /// [`CoreError::ClipboardFailed`] when the clipboard rejects the write.
    pub fn copy_path(&self, name: &str) -> CoreResult<PathBuf> {
        self.fs()?;
        ops::copy_path(&self.export_dir, name)
    }

    fn fs(&self) -> CoreResult<&Arc<dyn FileSystemCapability>> {
        self.fs.as_ref().ok_or(CoreError::HostUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::NativeFileSystem;
    use crate::preview::resource::test_support::sample_pdf;
    use std::fs as stdfs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn session_for(tmp: &TempDir) -> ExportSession {
        let config = Config {
            documents_root: Some(tmp.path().to_path_buf()),
            ..Config::default()
        };
        ExportSession::new(&config, Some(Arc::new(NativeFileSystem)))
    }

    fn names_of(entries: &[FileEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name()).collect()
    }

    #[tokio::test]
    async fn start_creates_export_directory() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_for(&tmp);

        let state = session.start().await.unwrap();

        assert_eq!(state, DirectoryState::Available);
        assert!(tmp.path().join("OutTray").is_dir());
        assert_eq!(session.directory_state(), Some(DirectoryState::Available));
    }

    #[tokio::test]
    async fn start_twice_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_for(&tmp);

        session.start().await.unwrap();
        let state = session.start().await.unwrap();

        assert_eq!(state, DirectoryState::Available);
    }

    #[tokio::test]
    async fn refresh_populates_sorted_catalog() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_for(&tmp);
        session.start().await.unwrap();

        let dir = session.export_dir().to_path_buf();
        stdfs::write(dir.join("old.txt"), "old").unwrap();
        std::thread::sleep(Duration::from_millis(50));
        stdfs::write(dir.join("new.txt"), "new").unwrap();

        session.refresh().await.unwrap();

        assert_eq!(names_of(session.entries()), ["new.txt", "old.txt"]);
    }

    #[tokio::test]
    async fn refresh_on_missing_directory_yields_empty_catalog() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_for(&tmp);
        // No start(): the export directory was never created.

        session.refresh().await.unwrap();

        assert!(session.entries().is_empty());
    }

    #[tokio::test]
    async fn open_and_close_text_preview() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_for(&tmp);
        session.start().await.unwrap();
        stdfs::write(session.export_dir().join("a.txt"), "hello\nworld").unwrap();

        let result = session.open_preview("a.txt").await.unwrap();
        assert_eq!(*result, PreviewResult::Text("hello\nworld".to_string()));
        assert!(session.active_preview().is_some());

        session.close_preview();
        assert!(session.active_preview().is_none());
    }

    #[tokio::test]
    async fn switching_pdfs_never_holds_two_resources() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_for(&tmp);
        session.start().await.unwrap();
        stdfs::write(session.export_dir().join("c.pdf"), sample_pdf(None)).unwrap();
        stdfs::write(session.export_dir().join("e.pdf"), sample_pdf(None)).unwrap();

        let first = match session.open_preview("c.pdf").await.unwrap() {
            PreviewResult::Binary(handle) => *handle,
            other => panic!("expected binary preview, got {other:?}"),
        };
        assert_eq!(session.live_render_resources(), 1);

        let second = match session.open_preview("e.pdf").await.unwrap() {
            PreviewResult::Binary(handle) => *handle,
            other => panic!("expected binary preview, got {other:?}"),
        };

        assert_eq!(session.live_render_resources(), 1);
        assert!(session.rendered(first).is_none());
        assert!(session.rendered(second).is_some());
    }

    #[tokio::test]
    async fn closing_preview_releases_render_resource() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_for(&tmp);
        session.start().await.unwrap();
        stdfs::write(session.export_dir().join("c.pdf"), sample_pdf(None)).unwrap();

        session.open_preview("c.pdf").await.unwrap();
        assert_eq!(session.live_render_resources(), 1);

        session.close_preview();
        assert_eq!(session.live_render_resources(), 0);
    }

    #[tokio::test]
    async fn opening_text_after_pdf_releases_resource() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_for(&tmp);
        session.start().await.unwrap();
        stdfs::write(session.export_dir().join("c.pdf"), sample_pdf(None)).unwrap();
        stdfs::write(session.export_dir().join("a.txt"), "text").unwrap();

        session.open_preview("c.pdf").await.unwrap();
        session.open_preview("a.txt").await.unwrap();

        assert_eq!(session.live_render_resources(), 0);
    }

    #[tokio::test]
    async fn delete_removes_entry_without_rescan() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_for(&tmp);
        session.start().await.unwrap();
        stdfs::write(session.export_dir().join("a.txt"), "a").unwrap();
        stdfs::write(session.export_dir().join("b.txt"), "b").unwrap();
        session.refresh().await.unwrap();
        assert_eq!(session.entries().len(), 2);

        session.delete("a.txt").await.unwrap();

        // Gone from the in-memory catalog immediately...
        assert!(!names_of(session.entries()).contains(&"a.txt"));
        // ...and from a fresh listing too.
        session.refresh().await.unwrap();
        assert!(!names_of(session.entries()).contains(&"a.txt"));
    }

    #[tokio::test]
    async fn delete_of_externally_removed_file_leaves_catalog_unchanged() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_for(&tmp);
        session.start().await.unwrap();
        stdfs::write(session.export_dir().join("a.txt"), "a").unwrap();
        session.refresh().await.unwrap();

        // Someone else removed the file behind our back.
        stdfs::remove_file(session.export_dir().join("a.txt")).unwrap();

        let result = session.delete("a.txt").await;

        assert!(matches!(result.unwrap_err(), CoreError::DeleteFailed(_)));
        assert_eq!(names_of(session.entries()), ["a.txt"]);
    }

    #[tokio::test]
    async fn resolve_path_joins_root_folder_and_name() {
        let tmp = TempDir::new().unwrap();
        let session = session_for(&tmp);

        let path = session.resolve_path("report.pdf");

        assert_eq!(path, tmp.path().join("OutTray").join("report.pdf"));
        assert!(path.is_absolute());
    }

    #[tokio::test]
    async fn session_without_capability_is_disabled() {
        let config = Config::default();
        let mut session = ExportSession::new(&config, None);

        assert!(matches!(
            session.start().await.unwrap_err(),
            CoreError::HostUnavailable
        ));
        assert!(matches!(
            session.refresh().await.unwrap_err(),
            CoreError::HostUnavailable
        ));
        assert!(matches!(
            session.open_preview("a.txt").await.unwrap_err(),
            CoreError::HostUnavailable
        ));
        assert!(matches!(
            session.delete("a.txt").await.unwrap_err(),
            CoreError::HostUnavailable
        ));
        assert!(matches!(
            session.copy_path("a.txt").unwrap_err(),
            CoreError::HostUnavailable
        ));
    }

    #[tokio::test]
    async fn classify_matches_dispatcher_rules() {
        let tmp = TempDir::new().unwrap();
        let session = session_for(&tmp);

        assert_eq!(session.classify("a.txt"), PreviewKind::Text);
        assert_eq!(session.classify("d.exe"), PreviewKind::Unsupported);
    }
}
