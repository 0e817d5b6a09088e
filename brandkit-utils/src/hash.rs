use sha2::{Digest, Sha256};

/// Calculate SHA-256 hash of input bytes
///
/// Returns lowercase hex string of length 64.
///
/// # Example
/// ```
/// use brandkit_utils::hash::sha256v;
///
/// let hash = sha256v(b"hello world", None);
/// assert_eq!(hash.len(), 64);
/// ```
pub fn sha256v(data: &[u8], extra: Option<&[u8]>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    if let Some(extra_data) = extra {
        hasher.update(extra_data);
    }
    hex::encode(hasher.finalize())
}

/// Weak ETag value (`W/"<sha256 prefix>"`) for the given bytes.
pub fn weak_etag(data: &[u8]) -> String {
    let digest = sha256v(data, None);
    format!("W/\"{}\"", &digest[..16])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256v() {
        let hash = sha256v(b"hello world", None);
        assert_eq!(
            hash,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
        assert_ne!(hash, sha256v(b"hello world", Some(b"salt")));
    }

    #[test]
    fn test_weak_etag() {
        assert_eq!(weak_etag(b"hello world"), "W/\"b94d27b9934d3e08\"");
    }
}
