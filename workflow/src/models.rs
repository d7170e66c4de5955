//! Domain types shared by the session, the transports and the UI.
//!
//! # Categories
//!
//! - **Mode** - which upload flow the user picked
//! - **Files** - the [`UploadFile`] abstraction and the [`Selection`] that owns
//!   a chosen file together with its preview
//! - **Progress & Status** - what the presenter renders

use serde::{Deserialize, Serialize};

// =============================================================================
// Mode
// =============================================================================

/// Upload flow chosen in the mode selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UploadMode {
    /// Nothing chosen yet; the selector is shown.
    #[default]
    None,
    /// One image.
    SingleImage,
    /// An image and an archive collection.
    ImageWithCollection,
}

impl UploadMode {
    /// Whether this mode carries a collection field.
    pub fn takes_collection(&self) -> bool {
        matches!(self, UploadMode::ImageWithCollection)
    }

    /// Banner shown after a successful submission.
    pub fn success_message(&self) -> &'static str {
        match self {
            UploadMode::ImageWithCollection => "Image and collection uploaded successfully!",
            _ => "Image uploaded successfully!",
        }
    }

    /// Banner shown after any failed submission.
    pub fn failure_message(&self) -> &'static str {
        match self {
            UploadMode::ImageWithCollection => "Error uploading files. Please try again.",
            _ => "Error uploading image. Please try again.",
        }
    }

    /// Label of the submit button.
    pub fn action_label(&self) -> &'static str {
        match self {
            UploadMode::ImageWithCollection => "Upload Image and Collection",
            _ => "Upload Image",
        }
    }
}

// =============================================================================
// Files
// =============================================================================

/// A file picked by the user.
///
/// Implemented by the browser `File` wrapper and by the filesystem-backed
/// [`crate::LocalFile`]. The workflow never looks at the contents.
pub trait UploadFile: Clone + 'static {
    /// Display name, sent as the multipart filename.
    fn name(&self) -> String;

    /// Declared content type.
    fn mime_type(&self) -> String;

    /// Size in bytes.
    fn size(&self) -> u64;
}

/// A chosen file and the preview resource created for it.
///
/// The preview is released when the selection is dropped, which happens on
/// replacement and on mode reset.
#[derive(Debug)]
pub struct Selection<F, P> {
    file: F,
    preview: Option<P>,
}

impl<F: UploadFile, P> Selection<F, P> {
    /// Selection without a preview (collections only show their name).
    pub fn new(file: F) -> Self {
        Self { file, preview: None }
    }

    /// Selection owning a preview resource.
    pub fn with_preview(file: F, preview: P) -> Self {
        Self {
            file,
            preview: Some(preview),
        }
    }

    pub fn file(&self) -> &F {
        &self.file
    }

    pub fn preview(&self) -> Option<&P> {
        self.preview.as_ref()
    }

    pub fn name(&self) -> String {
        self.file.name()
    }
}

// =============================================================================
// Progress
// =============================================================================

/// Upload percentage in `[0, 100]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UploadProgress(u8);

impl UploadProgress {
    pub const ZERO: UploadProgress = UploadProgress(0);
    pub const COMPLETE: UploadProgress = UploadProgress(100);

    /// `floor(loaded * 100 / total)`, capped at 100.
    ///
    /// Returns `None` when the total is unknown (zero).
    pub fn from_bytes(loaded: u64, total: u64) -> Option<Self> {
        if total == 0 {
            return None;
        }
        let loaded = loaded.min(total) as u128;
        let percent = loaded * 100 / total as u128;
        Some(UploadProgress(percent as u8))
    }

    pub fn percent(&self) -> u8 {
        self.0
    }

    /// Presenter shows the bar only once something was sent.
    pub fn is_visible(&self) -> bool {
        self.0 > 0
    }
}

impl std::fmt::Display for UploadProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// =============================================================================
// Status
// =============================================================================

/// Kind of terminal status, used for styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    Success,
    Failure,
}

impl StatusKind {
    /// Bootstrap alert variant.
    pub fn variant(&self) -> &'static str {
        match self {
            StatusKind::Success => "success",
            StatusKind::Failure => "danger",
        }
    }
}

/// Terminal outcome of the latest submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadStatus {
    Success(String),
    Failure(String),
}

impl UploadStatus {
    pub fn kind(&self) -> StatusKind {
        match self {
            UploadStatus::Success(_) => StatusKind::Success,
            UploadStatus::Failure(_) => StatusKind::Failure,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            UploadStatus::Success(msg) | UploadStatus::Failure(msg) => msg,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UploadStatus::Success(_))
    }
}

// =============================================================================
// Phase
// =============================================================================

/// Where the session stands in `Idle → FilesSelected → Submitting → {Succeeded | Failed}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    FilesSelected,
    Submitting,
    Succeeded,
    Failed,
}
