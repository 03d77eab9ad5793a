//! Transient rendering-resource ownership for binary previews.

use lopdf::Document;

use crate::error::{CoreError, CoreResult};

/// Opaque reference to the currently held rendered document.
///
/// Handles are cheap copyable tokens. A handle issued before the last
/// release no longer resolves, so a renderer holding a stale token simply
/// sees nothing to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderHandle(u64);

/// A document rendered for the embedded binary viewer.
#[derive(Debug)]
pub struct RenderedDocument {
    handle: RenderHandle,
    bytes: Vec<u8>,
    page_count: usize,
    title: Option<String>,
}

impl RenderedDocument {
    fn render(handle: RenderHandle, bytes: Vec<u8>) -> CoreResult<Self> {
        let doc = Document::load_mem(&bytes)
            .map_err(|e| CoreError::DecodeFailed("pdf", e.to_string()))?;
        let page_count = doc.get_pages().len();
        let title = document_title(&doc);

        Ok(Self {
            handle,
            bytes,
            page_count,
            title,
        })
    }

    pub fn handle(&self) -> RenderHandle {
        self.handle
    }

    /// The raw document bytes the viewer draws from.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Document title from the PDF info dictionary, if present.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// Extracts the title from a PDF trailer's `Info` dictionary.
fn document_title(doc: &Document) -> Option<String> {
    let info = doc.trailer.get(b"Info").ok()?;
    let obj = match info {
        lopdf::Object::Reference(r) => doc.get_object(*r).ok()?,
        other => other,
    };
    let lopdf::Object::Dictionary(dict) = obj else {
        return None;
    };
    match dict.get(b"Title").ok()? {
        lopdf::Object::String(bytes, _) => String::from_utf8(bytes.clone()).ok(),
        lopdf::Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}

/// Owns the single live rendered document, if any.
///
/// Acquiring always releases the held document first — release before
/// create, never the other way around — so the live count never exceeds
/// one across any sequence of opens and closes. Releasing when nothing is
/// held is a no-op.
#[derive(Debug, Default)]
pub struct ResourceLifecycle {
    held: Option<RenderedDocument>,
    next_id: u64,
}

impl ResourceLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `bytes` and takes ownership of the result, returning the
    /// handle the preview carries.
    ///
    /// The previously held document is released first, even when rendering
    /// the new bytes fails afterwards.
    ///
    /// # Errors
    ///
    /// [`CoreError::DecodeFailed`] when the bytes are not a loadable document.
    pub fn acquire(&mut self, bytes: Vec<u8>) -> CoreResult<RenderHandle> {
        self.release();

        self.next_id += 1;
        let handle = RenderHandle(self.next_id);
        let doc = RenderedDocument::render(handle, bytes)?;
        tracing::debug!(
            "render resource {} acquired ({} pages)",
            self.next_id,
            doc.page_count
        );
        self.held = Some(doc);
        Ok(handle)
    }

    /// Releases the held document. No-op when nothing is held.
    pub fn release(&mut self) {
        if let Some(doc) = self.held.take() {
            tracing::debug!("render resource {} released", doc.handle.0);
        }
    }

    /// Resolves a handle to the held document, if that handle is still live.
    pub fn resolve(&self, handle: RenderHandle) -> Option<&RenderedDocument> {
        self.held.as_ref().filter(|d| d.handle == handle)
    }

    /// Number of live rendering resources — always `0` or `1`.
    pub fn live_count(&self) -> usize {
        usize::from(self.held.is_some())
    }
}
