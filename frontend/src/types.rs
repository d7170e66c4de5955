//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **Files** - [`BrowserFile`], the browser `File` seen by the workflow
//! - **Session** - [`SessionSignal`], the reactive home of the upload session

use imgupload::{
    Phase, SessionHandle, UploadFile, UploadMode, UploadProgress, UploadSession, UploadStatus,
};
use leptos::*;
use web_sys::File;

use crate::services::ObjectUrl;

// =============================================================================
// Files
// =============================================================================

/// A file picked through an `<input type="file">`.
#[derive(Clone, Debug, PartialEq)]
pub struct BrowserFile(pub File);

impl UploadFile for BrowserFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn mime_type(&self) -> String {
        self.0.type_()
    }

    fn size(&self) -> u64 {
        self.0.size() as u64
    }
}

// =============================================================================
// Session
// =============================================================================

/// Upload session as held by the page: browser files, object-URL previews.
pub type AppSession = UploadSession<BrowserFile, ObjectUrl>;

/// Reactive handle on the page's [`AppSession`].
///
/// Reads subscribe the calling view; writes go through the session's
/// operations only.
#[derive(Clone, Copy)]
pub struct SessionSignal(RwSignal<AppSession>);

impl SessionSignal {
    pub fn new() -> Self {
        Self(create_rw_signal(AppSession::new()))
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    pub fn select_mode(&self, mode: UploadMode) {
        self.0.update(|s| s.select_mode(mode));
    }

    pub fn reset(&self) {
        self.0.update(|s| s.reset());
    }

    /// Select an image and create its preview URL.
    ///
    /// The previous preview URL is revoked when its selection is dropped.
    pub fn choose_image(&self, file: File) {
        let preview = match ObjectUrl::create(&file) {
            Ok(url) => Some(url),
            Err(e) => {
                log::warn!("Could not create preview for {}: {}", file.name(), e);
                None
            }
        };
        self.0.update(|s| {
            s.choose_image(BrowserFile(file), preview);
        });
    }

    pub fn choose_collection(&self, file: File) {
        self.0.update(|s| {
            s.choose_collection(BrowserFile(file));
        });
    }

    // -------------------------------------------------------------------------
    // Reactive reads
    // -------------------------------------------------------------------------

    pub fn mode(&self) -> UploadMode {
        self.0.with(|s| s.mode())
    }

    pub fn can_submit(&self) -> bool {
        self.0.with(|s| s.can_submit())
    }

    pub fn phase(&self) -> Phase {
        self.0.with(|s| s.phase())
    }

    pub fn progress(&self) -> UploadProgress {
        self.0.with(|s| s.progress())
    }

    pub fn status(&self) -> Option<UploadStatus> {
        self.0.with(|s| s.status().cloned())
    }

    pub fn image_preview_url(&self) -> Option<String> {
        self.0
            .with(|s| s.image().and_then(|i| i.preview()).map(|p| p.as_str().to_string()))
    }

    pub fn collection_name(&self) -> Option<String> {
        self.0.with(|s| s.collection().map(|c| c.name()))
    }
}

impl SessionSignal {
    // -------------------------------------------------------------------------
    // Memoized reads
    // -------------------------------------------------------------------------

    /// Preview URL of the selected image; progress ticks do not notify it.
    pub fn image_preview(&self) -> Memo<Option<String>> {
        let session = *self;
        create_memo(move |_| session.image_preview_url())
    }

    /// Name of the selected collection; progress ticks do not notify it.
    pub fn collection_label(&self) -> Memo<Option<String>> {
        let session = *self;
        create_memo(move |_| session.collection_name())
    }

    pub fn is_submitting(&self) -> Memo<bool> {
        let session = *self;
        create_memo(move |_| session.phase() == Phase::Submitting)
    }

    pub fn submittable(&self) -> Memo<bool> {
        let session = *self;
        create_memo(move |_| session.can_submit())
    }
}

impl Default for SessionSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionHandle for SessionSignal {
    type File = BrowserFile;
    type Preview = ObjectUrl;

    fn update<R>(&self, f: impl FnOnce(&mut AppSession) -> R) -> Option<R> {
        self.0.try_update(f)
    }

    fn with<R>(&self, f: impl FnOnce(&AppSession) -> R) -> Option<R> {
        self.0.try_with(f)
    }
}
