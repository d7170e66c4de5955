//! Application configuration.
//!
//! Centralized configuration for the upload frontend. The page is served by
//! the same origin as the API, so endpoints stay relative.

use std::time::Duration;

use imgupload::UploadConfig;

/// Backend API base URL. Empty means same origin.
pub const BACKEND_URL: &str = "";

/// Application name, shown in the card header and the page title.
pub const APP_NAME: &str = "Image Upload App";

/// Ceiling for one upload request (seconds).
pub const UPLOAD_TIMEOUT_SECS: u64 = 120;

/// Maximum preview height for the single-image flow.
pub const SINGLE_PREVIEW_MAX_HEIGHT: &str = "300px";

/// Maximum preview height next to the collection picker.
pub const COLLECTION_PREVIEW_MAX_HEIGHT: &str = "200px";

/// Upload configuration used by both submitters.
pub fn upload_config() -> UploadConfig {
    UploadConfig {
        timeout_secs: UPLOAD_TIMEOUT_SECS,
        ..UploadConfig::with_backend_url(BACKEND_URL)
    }
}

pub fn upload_timeout() -> Duration {
    Duration::from_secs(UPLOAD_TIMEOUT_SECS)
}
