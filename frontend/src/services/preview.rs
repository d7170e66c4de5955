//! Local image previews backed by object URLs.

use web_sys::{File, Url};

/// A `blob:` URL pointing at a picked file.
///
/// The URL is revoked when the value is dropped, so replacing a selection or
/// resetting the mode releases the previewed data.
#[derive(Debug, PartialEq, Eq)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn create(file: &File) -> Result<Self, String> {
        Url::create_object_url_with_blob(file)
            .map(ObjectUrl)
            .map_err(|e| format!("create_object_url failed: {:?}", e))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        log::debug!("Releasing preview {}", self.0);
        let _ = Url::revoke_object_url(&self.0);
    }
}
