//! Multipart payload model.
//!
//! Transports turn an [`UploadForm`] into their own form encoding
//! (`FormData` in the browser, `reqwest::multipart::Form` natively).

use crate::models::UploadFile;

/// Field carrying the image.
pub const IMAGE_FIELD: &str = "image";

/// Field carrying the archive collection.
pub const COLLECTION_FIELD: &str = "collection";

/// One named file part.
#[derive(Clone, Debug)]
pub struct FormPart<F> {
    pub name: &'static str,
    pub file: F,
}

/// Ordered list of file parts sent as `multipart/form-data`.
#[derive(Clone, Debug)]
pub struct UploadForm<F> {
    parts: Vec<FormPart<F>>,
}

impl<F: UploadFile> UploadForm<F> {
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Append a part, keeping insertion order.
    pub fn part(mut self, name: &'static str, file: F) -> Self {
        self.parts.push(FormPart { name, file });
        self
    }

    pub fn parts(&self) -> &[FormPart<F>] {
        &self.parts
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.parts.iter().map(|p| p.name).collect()
    }

    pub fn get(&self, name: &str) -> Option<&F> {
        self.parts.iter().find(|p| p.name == name).map(|p| &p.file)
    }

    /// Sum of the file sizes, used as the progress denominator.
    pub fn total_size(&self) -> u64 {
        self.parts.iter().map(|p| p.file.size()).sum()
    }
}

impl<F: UploadFile> Default for UploadForm<F> {
    fn default() -> Self {
        Self::new()
    }
}
