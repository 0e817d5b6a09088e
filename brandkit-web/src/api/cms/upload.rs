//! Multipart upload endpoint.
//!
//! Fields:
//! - `file`: the image (required)
//! - `type`: `logos` or `media` (required, `logo`/`banner` accepted)
//! - `filename`: stored name (optional, defaults to the part's file name or the content hash)

use crate::AppState;
use actix_multipart::{Field, Multipart};
use actix_web::web;
use brandkit_error::{web::WebError, WebResult};
use brandkit_models::{domain::prelude::UploadedFile, enums::media::MediaKind};
use brandkit_utils::path::{sanitize_filename, MAX_FILENAME_LEN};
use futures::StreamExt;
use std::sync::Arc;
use tracing::{info, instrument};

pub(super) const ROUTER_PREFIX: &str = "/upload";

pub(crate) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(upload));
}

/// Upper bound for plain text form fields.
const MAX_TEXT_FIELD_BYTES: usize = MAX_FILENAME_LEN * 4;

#[derive(Debug, Default)]
struct UploadForm {
    file: Option<FilePart>,
    kind: Option<String>,
    filename: Option<String>,
}

#[derive(Debug)]
struct FilePart {
    mime: String,
    original_name: Option<String>,
    bytes: Vec<u8>,
}

#[instrument(name = "upload", skip_all)]
async fn upload(
    state: web::Data<Arc<AppState>>,
    mut multipart: Multipart,
) -> WebResult<web::Json<UploadedFile>> {
    let form = read_form(&mut multipart, state.upload.max_bytes).await?;

    let kind: MediaKind = form
        .kind
        .as_deref()
        .ok_or(WebError::BadRequest("Missing `type` field".to_string()))?
        .parse()
        .map_err(WebError::BadRequest)?;
    let file = form
        .file
        .ok_or(WebError::BadRequest("No file uploaded".to_string()))?;

    if !state.upload.allowed_mimes.iter().any(|m| *m == file.mime) {
        return Err(WebError::BadRequest(format!(
            "Invalid content-type: `{}` (allowed: {:?})",
            if file.mime.is_empty() {
                "<empty>"
            } else {
                file.mime.as_str()
            },
            state.upload.allowed_mimes
        )));
    }

    // An explicit `filename` must be valid; the part's own name is only a hint.
    let filename = form.filename.or_else(|| {
        file.original_name
            .as_deref()
            .and_then(sanitize_filename)
            .map(str::to_string)
    });

    let stored = state
        .media
        .store(kind, filename.as_deref(), Some(&file.mime), file.bytes)
        .await?;
    info!(url = %stored.url, size = stored.size, "upload accepted");
    Ok(web::Json(stored))
}

/// Reads every part into memory, enforcing `max_bytes` on the file part.
///
/// # Errors
/// Returns 400 on oversized or empty files and malformed multipart bodies.
async fn read_form(multipart: &mut Multipart, max_bytes: usize) -> WebResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next().await {
        let mut field = field?;
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let mime = field
                    .content_type()
                    .map(|m| m.essence_str().to_string())
                    .unwrap_or_default();
                let original_name = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .map(str::to_string);
                let bytes = read_field(&mut field, max_bytes, "File").await?;
                if bytes.is_empty() {
                    return Err(WebError::BadRequest("Empty file uploaded".to_string()));
                }
                form.file = Some(FilePart {
                    mime,
                    original_name,
                    bytes,
                });
            }
            "type" | "filename" => {
                let bytes = read_field(&mut field, MAX_TEXT_FIELD_BYTES, "Field").await?;
                let value = String::from_utf8(bytes)
                    .map_err(|_| WebError::BadRequest(format!("`{name}` is not valid UTF-8")))?;
                let value = value.trim().to_string();
                if value.is_empty() {
                    continue;
                }
                if name == "type" {
                    form.kind = Some(value);
                } else {
                    form.filename = Some(value);
                }
            }
            // drain unknown parts so the stream can advance
            _ => {
                read_field(&mut field, MAX_TEXT_FIELD_BYTES, "Field").await?;
            }
        }
    }

    Ok(form)
}

async fn read_field(field: &mut Field, max_bytes: usize, what: &str) -> WebResult<Vec<u8>> {
    let mut buf: Vec<u8> = Vec::new();
    let mut total: usize = 0;
    while let Some(chunk) = field.next().await {
        let data = chunk?;
        total = total.saturating_add(data.len());
        if total > max_bytes {
            return Err(WebError::BadRequest(format!(
                "{what} too large: {total} bytes (max {max_bytes})"
            )));
        }
        buf.extend_from_slice(&data);
    }
    Ok(buf)
}
