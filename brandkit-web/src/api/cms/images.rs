//! Uploaded image listing and deletion.

use crate::AppState;
use actix_web::web;
use brandkit_error::WebResult;
use brandkit_models::domain::prelude::{DeleteImageParams, DeleteResult, ImageList, ImageListParams};
use std::sync::Arc;

pub(super) const ROUTER_PREFIX: &str = "/images";

/// Configure image routes
///
/// # Routes
/// - GET `?type=` list uploads, every type when omitted
/// - DELETE `/delete?filename=&type=` remove one upload
pub(crate) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_images))
        .route("/delete", web::delete().to(delete_image));
}

async fn list_images(
    state: web::Data<Arc<AppState>>,
    params: actix_web_validator::Query<ImageListParams>,
) -> WebResult<web::Json<ImageList>> {
    Ok(web::Json(state.media.list(params.kind).await?))
}

async fn delete_image(
    state: web::Data<Arc<AppState>>,
    params: actix_web_validator::Query<DeleteImageParams>,
) -> WebResult<web::Json<DeleteResult>> {
    let params = params.into_inner();
    let result = state.media.delete(params.kind, &params.filename).await?;
    Ok(web::Json(result))
}
