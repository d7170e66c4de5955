//! UI Components for the upload application.
//!
//! # Layout Components
//! - [`UploadHeader`] - Card header with the title
//! - [`BackFooter`] - "Back to Options" button
//!
//! # Feature Components
//! - [`ModeSelector`] - Single image vs image + collection
//! - [`SingleImageUpload`] - Image picker, preview, submit
//! - [`ImageCollectionUpload`] - Image and archive pickers, submit
//! - [`FilePicker`] - Labelled file input
//! - [`ProgressSection`] - Upload progress bar
//! - [`StatusBanner`] - Success/failure banner

mod header;
mod footer;
mod mode_selector;
mod file_picker;
mod upload;
mod progress;

pub use header::*;
pub use footer::*;
pub use mode_selector::*;
pub use file_picker::*;
pub use upload::*;
pub use progress::*;
