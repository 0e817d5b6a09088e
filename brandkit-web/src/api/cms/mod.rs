//! Content management routes for branding, header layout, uploads and the toggle menu.
mod company;
mod header;
mod images;
mod toggle_menu;
mod upload;

use actix_web::web;

/// Configure all content management routes
pub fn configure_cms_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope(company::ROUTER_PREFIX).configure(company::configure_routes))
        .service(web::scope(header::ROUTER_PREFIX).configure(header::configure_routes))
        .service(web::scope(images::ROUTER_PREFIX).configure(images::configure_routes))
        .service(web::scope(upload::ROUTER_PREFIX).configure(upload::configure_routes))
        .service(web::scope(toggle_menu::ROUTER_PREFIX).configure(toggle_menu::configure_routes));
}
