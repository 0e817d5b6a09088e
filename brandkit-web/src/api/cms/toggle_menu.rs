//! Toggle-menu button configuration, stored as one JSON object.

use actix_web::web;
use brandkit_error::WebResult;
use brandkit_models::domain::prelude::MenuConfigPayload;
use brandkit_repository::MenuConfigRepository;
use sea_orm::DatabaseConnection;

pub(super) const ROUTER_PREFIX: &str = "/toggle-menu";

pub(crate) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/config", web::get().to(get_config))
        .route("/config", web::post().to(save_config));
}

async fn get_config() -> WebResult<web::Json<MenuConfigPayload>> {
    let config = MenuConfigRepository::get::<DatabaseConnection>(None).await?;
    Ok(web::Json(MenuConfigPayload(config)))
}

async fn save_config(
    payload: actix_web_validator::Json<MenuConfigPayload>,
) -> WebResult<web::Json<MenuConfigPayload>> {
    let saved = MenuConfigRepository::save::<DatabaseConnection>(payload.into_inner().0, None).await?;
    Ok(web::Json(MenuConfigPayload(saved)))
}
