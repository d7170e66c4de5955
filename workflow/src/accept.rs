//! File-picker accept filters.
//!
//! These mirror the HTML `accept` attribute and are advisory: a file that does
//! not match is still uploaded, callers may only warn about it.

/// Accept filter for the image picker.
pub const IMAGE_ACCEPT: &str = "image/*";

/// Accept filter for the collection picker.
pub const COLLECTION_ACCEPT: &str = ".zip,.rar,.7zip";

/// Whether a file matches an HTML-style accept list.
///
/// Entries are `.ext`, `type/*` or an exact MIME type, comma separated.
/// Matching is case-insensitive.
pub fn matches_accept(accept: &str, file_name: &str, mime_type: &str) -> bool {
    let name = file_name.to_ascii_lowercase();
    let mime = mime_type.to_ascii_lowercase();

    accept
        .split(',')
        .map(|entry| entry.trim().to_ascii_lowercase())
        .filter(|entry| !entry.is_empty())
        .any(|entry| {
            if entry.starts_with('.') {
                name.ends_with(&entry)
            } else if let Some(major) = entry.strip_suffix("/*") {
                mime.split('/').next() == Some(major)
            } else {
                mime == entry
            }
        })
}

/// Content type for a file name, from its extension.
pub fn guess_mime(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "tif" | "tiff" => "image/tiff",
        "avif" => "image/avif",
        "zip" => "application/zip",
        "rar" => "application/vnd.rar",
        "7z" | "7zip" => "application/x-7z-compressed",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_accept() {
        assert!(matches_accept(IMAGE_ACCEPT, "cat.png", "image/png"));
        assert!(matches_accept(IMAGE_ACCEPT, "CAT.JPG", "IMAGE/JPEG"));
        assert!(!matches_accept(IMAGE_ACCEPT, "cats.zip", "application/zip"));
    }

    #[test]
    fn test_collection_accept() {
        assert!(matches_accept(COLLECTION_ACCEPT, "cats.zip", "application/zip"));
        assert!(matches_accept(COLLECTION_ACCEPT, "cats.RAR", ""));
        assert!(matches_accept(COLLECTION_ACCEPT, "cats.7zip", ""));
        assert!(!matches_accept(COLLECTION_ACCEPT, "cats.tar.gz", "application/gzip"));
    }

    #[test]
    fn test_exact_mime_entry() {
        assert!(matches_accept("image/png, .gif", "x", "image/png"));
        assert!(matches_accept("image/png, .gif", "x.gif", ""));
        assert!(!matches_accept("image/png", "x.jpg", "image/jpeg"));
    }

    #[test]
    fn test_guess_mime() {
        assert_eq!(guess_mime("photo.JPEG"), "image/jpeg");
        assert_eq!(guess_mime("set.7zip"), "application/x-7z-compressed");
        assert_eq!(guess_mime("README"), "application/octet-stream");
    }
}
