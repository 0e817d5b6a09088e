//! HTTP API for the brandkit admin backend.
mod api;
mod middleware;

use actix_web::{
    dev::{Server, ServerHandle},
    middleware::{Compress, Logger, NormalizePath},
    web::{self, Data},
    App, HttpServer,
};
use actix_web_validator::{JsonConfig, QueryConfig};
use async_trait::async_trait;
use brandkit_error::{init::InitContextError, web::WebError, BKError, BKResult};
use brandkit_models::{
    settings::{Settings, Upload},
    WebServer,
};
use brandkit_repository::MediaStore;
use middleware::cors::middleware;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    media: MediaStore,
    upload: Upload,
}

impl AppState {
    pub fn new(upload: &Upload) -> Self {
        AppState {
            media: MediaStore::new(upload),
            upload: upload.clone(),
        }
    }
}

/// BKWebServer handles the web server initialization and management
#[derive(Clone)]
pub struct BKWebServer {
    /// Server handle for graceful shutdown
    server: Arc<Mutex<Option<ServerHandle>>>,
}

impl BKWebServer {
    /// Create and configure the HTTP server
    async fn create_server(settings: &Settings) -> BKResult<Server> {
        let addr = format!("{}:{}", settings.web.host, settings.web.port);
        let router_prefix = settings.web.router_prefix.clone();
        let worker_count = settings.web.get_worker_count();
        let cors_config = settings.web.cors.clone();
        let json_limit = settings.web.json_limit;
        let state = AppState::new(&settings.upload);

        let server = HttpServer::new(move || {
            let public_prefix = state.upload.public_prefix.clone();
            App::new()
                .app_data(Data::new(Arc::new(state.clone())))
                .app_data(json_config(json_limit))
                .app_data(query_config())
                .wrap(middleware(&cors_config))
                .wrap(Logger::default())
                .wrap(Compress::default())
                .wrap(NormalizePath::trim())
                // Health probe and uploaded files, outside the router prefix.
                .configure(|cfg| api::configure_public_routes(cfg, &public_prefix))
                .service(web::scope(&router_prefix).configure(api::configure_routes))
        })
        .workers(worker_count)
        .bind(&addr)
        .map_err(|e| BKError::from(format!("Failed to bind HTTP server to {addr}: {e}")))?;

        info!(%addr, workers = worker_count, "HTTP server bound");
        Ok(server.run())
    }
}

/// JSON bodies: size limit plus validation failures rendered as `WebError`.
pub(crate) fn json_config(limit: usize) -> JsonConfig {
    JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _| WebError::BadRequest(err.to_string()).into())
}

pub(crate) fn query_config() -> QueryConfig {
    QueryConfig::default().error_handler(|err, _| WebError::BadRequest(err.to_string()).into())
}

#[async_trait]
impl WebServer for BKWebServer {
    #[inline]
    #[instrument(name = "init-web-server", skip_all)]
    /// Initialize and start the web server
    async fn init(settings: &Settings) -> BKResult<Arc<Self>, InitContextError> {
        let server = Self::create_server(settings).await.map_err(|e| {
            InitContextError::Primitive(format!("Failed to create web server: {e}"))
        })?;
        let server_handle = server.handle();

        tokio::spawn(async move {
            if let Err(e) = server.await {
                error!(error=%e, "Web server failed to start");
            }
        });

        let web_server = BKWebServer {
            server: Arc::new(Mutex::new(Some(server_handle))),
        };

        Ok(Arc::new(web_server))
    }

    #[inline]
    #[instrument(name = "web-server-stop", skip_all)]
    /// Gracefully stop the web server
    async fn stop(&self) -> BKResult<()> {
        info!("Stopping web server...");
        let mut server_guard = self.server.lock().await;
        if let Some(handle) = server_guard.take() {
            handle.stop(true).await;
        }
        info!("Web server stopped");

        Ok(())
    }
}
