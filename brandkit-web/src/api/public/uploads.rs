//! Serves files written by the upload endpoint.
//!
//! # Routes
//! - GET `{upload_prefix}/{type}/{filename}`

use crate::AppState;
use actix_files::NamedFile;
use actix_web::web;
use brandkit_error::{web::WebError, WebResult};
use brandkit_models::enums::media::MediaKind;
use std::{io, sync::Arc};

pub fn configure_upload_routes(cfg: &mut web::ServiceConfig, upload_prefix: &str) {
    let path = format!("{}/{{kind}}/{{filename}}", upload_prefix.trim_end_matches('/'));
    cfg.route(&path, web::get().to(serve_upload));
}

async fn serve_upload(
    state: web::Data<Arc<AppState>>,
    path: web::Path<(String, String)>,
) -> WebResult<NamedFile> {
    let (kind, filename) = path.into_inner();
    let kind: MediaKind = kind
        .parse()
        .map_err(|_| WebError::NotFound(format!("upload type `{kind}`")))?;
    let file_path = state.media.resolve(kind, &filename)?;

    let file = NamedFile::open_async(&file_path).await.map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            WebError::NotFound(format!("upload {kind}/{filename}"))
        } else {
            WebError::from(e)
        }
    })?;

    Ok(file.use_etag(true).use_last_modified(true))
}
