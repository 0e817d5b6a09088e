//! Header layout endpoints.
//!
//! The draft lives in a single slot. Every promotion appends a new live row,
//! so `/history` lists past layouts.

use actix_web::{web, HttpResponse};
use brandkit_error::WebResult;
use brandkit_models::{
    domain::prelude::{HeaderHistoryParams, HeaderLayout, PromoteHeader},
    entities::prelude::{HeaderModel, HeaderStagingModel},
};
use brandkit_repository::HeaderRepository;
use sea_orm::DatabaseConnection;
use serde_json::json;

pub(super) const ROUTER_PREFIX: &str = "/header";

/// Configure header routes
///
/// # Routes
/// - GET `` current layout, or the built-in default
/// - POST `` publish a layout directly
/// - GET `/history` published layouts, newest first
/// - GET `/editable` newer of draft and current layout
/// - GET/POST/PUT `/staging` fetch, replace or promote the draft
pub(crate) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(get_current))
        .route("", web::post().to(create_published))
        .route("/history", web::get().to(get_history))
        .route("/editable", web::get().to(get_editable))
        .route("/staging", web::get().to(get_staging))
        .route("/staging", web::post().to(save_staging))
        .route("/staging", web::put().to(promote_staging));
}

async fn get_current() -> WebResult<HttpResponse> {
    Ok(
        match HeaderRepository::find_current::<DatabaseConnection>(None).await? {
            Some(header) => HttpResponse::Ok().json(header),
            None => HttpResponse::Ok().json(HeaderLayout::default()),
        },
    )
}

async fn create_published(
    payload: actix_web_validator::Json<HeaderLayout>,
) -> WebResult<web::Json<HeaderModel>> {
    let created =
        HeaderRepository::create_published::<DatabaseConnection>(payload.into_inner(), None)
            .await?;
    Ok(web::Json(created))
}

async fn get_history(
    params: actix_web_validator::Query<HeaderHistoryParams>,
) -> WebResult<web::Json<Vec<HeaderModel>>> {
    let rows = HeaderRepository::history::<DatabaseConnection>(params.limit, None).await?;
    Ok(web::Json(rows))
}

async fn get_editable() -> WebResult<HttpResponse> {
    let editable = HeaderRepository::find_editable::<DatabaseConnection>(None).await?;
    Ok(HttpResponse::Ok().json(editable))
}

async fn get_staging() -> WebResult<HttpResponse> {
    Ok(
        match HeaderRepository::find_staging::<DatabaseConnection>(None).await? {
            Some(staging) => HttpResponse::Ok().json(staging),
            None => HttpResponse::Ok().json(json!({})),
        },
    )
}

async fn save_staging(
    payload: actix_web_validator::Json<HeaderLayout>,
) -> WebResult<web::Json<HeaderStagingModel>> {
    let saved =
        HeaderRepository::save_staging::<DatabaseConnection>(payload.into_inner(), None).await?;
    Ok(web::Json(saved))
}

async fn promote_staging(
    payload: actix_web_validator::Json<PromoteHeader>,
) -> WebResult<web::Json<HeaderModel>> {
    let published =
        HeaderRepository::promote::<DatabaseConnection>(payload.into_inner(), None).await?;
    Ok(web::Json(published))
}
