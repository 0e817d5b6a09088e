use crate::enums::media::MediaKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Public URL, e.g. `/uploads/logos/acme.png`. Store this in `logo`/`banner`.
    pub url: String,
    /// Location on disk.
    pub path: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    pub filename: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub size: u64,
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageList {
    pub images: Vec<ImageInfo>,
    pub total: usize,
    pub types: Vec<MediaKind>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ImageListParams {
    #[serde(default, rename = "type")]
    pub kind: Option<MediaKind>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeleteImageParams {
    #[validate(length(min = 1, max = 255, message = "filename length must be 1..=255"))]
    pub filename: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteResult {
    pub success: bool,
    pub message: String,
}
