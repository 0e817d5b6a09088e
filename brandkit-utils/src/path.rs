//! Filename helpers for the upload store.

/// Longest file name accepted for uploads.
pub const MAX_FILENAME_LEN: usize = 255;

/// Returns the name unchanged when it is a plain, single-component file name.
///
/// Rejects empty names, `.`/`..`, path separators, NUL and other control
/// characters, and names longer than [`MAX_FILENAME_LEN`].
pub fn sanitize_filename(name: &str) -> Option<&str> {
    let name = name.trim();
    if name.is_empty() || name.len() > MAX_FILENAME_LEN {
        return None;
    }
    if name == "." || name == ".." || name.contains("..") {
        return None;
    }
    if name
        .chars()
        .any(|c| c == '/' || c == '\\' || c == ':' || c.is_control())
    {
        return None;
    }
    // hidden files would collide with in-flight temp files
    if name.starts_with('.') {
        return None;
    }
    Some(name)
}

/// Lowercased extension without the dot, if any.
pub fn extension(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// File extension conventionally used for an image MIME type.
pub fn extension_for_mime(mime: &str) -> Option<&'static str> {
    match mime {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/svg+xml" => Some("svg"),
        "image/x-icon" | "image/vnd.microsoft.icon" => Some("ico"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        assert_eq!(sanitize_filename("logo.png"), Some("logo.png"));
        assert_eq!(sanitize_filename("  acme-banner_2.webp "), Some("acme-banner_2.webp"));
    }

    #[test]
    fn rejects_traversal_and_separators() {
        for bad in ["", ".", "..", "../etc/passwd", "a/b.png", "a\\b.png", "x..png", ".env", "c:x"] {
            assert_eq!(sanitize_filename(bad), None, "{bad:?} should be rejected");
        }
        assert_eq!(sanitize_filename(&"a".repeat(MAX_FILENAME_LEN + 1)), None);
    }

    #[test]
    fn extension_helpers() {
        assert_eq!(extension("Logo.PNG").as_deref(), Some("png"));
        assert_eq!(extension("README"), None);
        assert_eq!(extension_for_mime("image/svg+xml"), Some("svg"));
        assert_eq!(extension_for_mime("text/html"), None);
    }
}
