//! Public (non-API-prefix) routes.
//!
//! Mounted at the root so probes and stored image URLs do not depend on the
//! API router prefix.

mod health;
mod uploads;

use actix_web::web;

/// Configure all public root routes.
#[inline]
pub fn configure_public_routes(cfg: &mut web::ServiceConfig, upload_prefix: &str) {
    cfg.configure(health::configure_health_routes)
        .configure(|cfg| uploads::configure_upload_routes(cfg, upload_prefix));
}
