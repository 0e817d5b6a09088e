//! Company profile endpoints.
//!
//! Edits land in the staging row; `PUT /staging` promotes it to the live row.

use actix_web::{
    http::header::{self, HeaderValue},
    web, HttpRequest, HttpResponse,
};
use brandkit_error::{web::WebError, WebResult};
use brandkit_models::{
    domain::prelude::{CompanyProfile, PromoteCompany},
    entities::prelude::{CompanyModel, CompanyStagingModel},
};
use brandkit_repository::CompanyRepository;
use brandkit_utils::hash::weak_etag;
use sea_orm::DatabaseConnection;
use serde_json::json;

pub(super) const ROUTER_PREFIX: &str = "/company";

/// Configure company routes
///
/// # Routes
/// - GET `` published profile
/// - GET `/logo` published logo and company name
/// - GET `/editable` newer of draft and published profile
/// - GET `/staging` current draft
/// - POST `/staging` replace the draft
/// - PUT `/staging` promote the draft
pub(crate) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(get_published))
        .route("/logo", web::get().to(get_logo))
        .route("/editable", web::get().to(get_editable))
        .route("/staging", web::get().to(get_staging))
        .route("/staging", web::post().to(save_staging))
        .route("/staging", web::put().to(promote_staging));
}

async fn get_published() -> WebResult<web::Json<CompanyModel>> {
    let company = CompanyRepository::find_published::<DatabaseConnection>(None)
        .await?
        .ok_or(WebError::NotFound("published company profile".to_string()))?;
    Ok(web::Json(company))
}

/// Polled by public pages, so it answers conditional requests.
async fn get_logo(req: HttpRequest) -> WebResult<HttpResponse> {
    let logo = CompanyRepository::find_logo::<DatabaseConnection>(None).await?;
    let body = serde_json::to_vec(&logo).map_err(|e| WebError::InternalError(e.to_string()))?;

    let etag = HeaderValue::from_str(&weak_etag(&body))
        .map_err(|e| WebError::InternalError(e.to_string()))?;
    if req
        .headers()
        .get(header::IF_NONE_MATCH)
        .is_some_and(|v| *v == etag)
    {
        return Ok(HttpResponse::NotModified()
            .insert_header((header::ETAG, etag))
            .finish());
    }

    Ok(HttpResponse::Ok()
        .content_type(header::ContentType::json())
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .insert_header((header::ETAG, etag))
        .body(body))
}

async fn get_editable() -> WebResult<HttpResponse> {
    let editable = CompanyRepository::find_editable::<DatabaseConnection>(None).await?;
    Ok(HttpResponse::Ok().json(editable))
}

async fn get_staging() -> WebResult<HttpResponse> {
    Ok(
        match CompanyRepository::find_latest_staging::<DatabaseConnection>(None).await? {
            Some(staging) => HttpResponse::Ok().json(staging),
            None => HttpResponse::Ok().json(json!({})),
        },
    )
}

async fn save_staging(
    payload: actix_web_validator::Json<CompanyProfile>,
) -> WebResult<web::Json<CompanyStagingModel>> {
    let saved =
        CompanyRepository::save_staging::<DatabaseConnection>(payload.into_inner(), None).await?;
    Ok(web::Json(saved))
}

async fn promote_staging(
    payload: actix_web_validator::Json<PromoteCompany>,
) -> WebResult<web::Json<CompanyModel>> {
    let published =
        CompanyRepository::promote::<DatabaseConnection>(payload.into_inner(), None).await?;
    Ok(web::Json(published))
}
