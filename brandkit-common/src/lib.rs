//! Application context for brandkit.
//!
//! Owns settings, the logger and the long-lived subsystems (database manager,
//! web server), boots them in order and tears them down on shutdown signals.
mod logger;

pub use brandkit_error::{BKError, BKResult};

use brandkit_models::{constants::DATA_DIR, settings::Settings, DbManager, WebServer};
use logger::Logger;
use once_cell::sync::OnceCell;
use std::{
    future::Future,
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
#[cfg(windows)]
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, span, Level};

static APP_CONTEXT: OnceCell<RwLock<BKAppContext>> = OnceCell::new();

pub struct BKAppContext {
    /// Global settings
    settings: Option<Settings>,
    /// Global logger
    logger: Logger,
    /// Database manager
    db_manager: Option<Arc<dyn DbManager>>,
    /// Web server
    web_server: Option<Arc<dyn WebServer>>,
    /// Flag to prevent duplicate shutdowns
    shutting_down: AtomicBool,
    /// Shutdown token
    shutdown_token: CancellationToken,
}

impl BKAppContext {
    #[inline]
    pub async fn instance() -> BKResult<RwLockReadGuard<'static, BKAppContext>> {
        Ok(APP_CONTEXT
            .get()
            .ok_or(BKError::from("BKAppContext is not initialized"))?
            .read()
            .await)
    }

    #[inline]
    pub async fn instance_mut() -> BKResult<RwLockWriteGuard<'static, BKAppContext>> {
        Ok(APP_CONTEXT
            .get()
            .ok_or(BKError::from("BKAppContext is not initialized"))?
            .write()
            .await)
    }

    /// Initializes the global context exactly once.
    ///
    /// Loads settings, switches to the runtime directory, starts logging, then
    /// brings up the database (migrating it) and finally the web server.
    ///
    /// # Arguments
    /// * `config` - Path of the TOML config file. A missing file is not an error.
    pub async fn init<D, W>(config: String) -> BKResult<()>
    where
        D: DbManager + 'static,
        W: WebServer + 'static,
    {
        let settings = Settings::new(config)?;

        apply_runtime_dir(&settings.general.runtime_dir)?;

        let mut logger = Logger::from_settings(&settings.log);
        logger.initialize(&settings.log)?;

        let span = span!(Level::INFO, "init-app");
        let _guard = span.enter();

        ensure_runtime_directories(&settings)?;

        let mut ctx = BKAppContext {
            shutting_down: AtomicBool::new(false),
            shutdown_token: CancellationToken::new(),
            logger,
            settings: Some(settings),
            db_manager: None,
            web_server: None,
        };

        ctx.init_db_manager::<D>().await?;

        // The web server resolves connections through the global context, so
        // it must come last.
        APP_CONTEXT
            .set(RwLock::new(ctx))
            .map_err(|_| BKError::from("Failed to set BKAppContext"))?;

        Self::instance_mut().await?.init_web_server::<W>().await?;
        Ok(())
    }

    async fn init_db_manager<D: DbManager + 'static>(&mut self) -> BKResult<()> {
        self.db_manager = Some(D::init(self.settings()?).await?);
        info!("Database initialized successfully.");
        Ok(())
    }

    async fn init_web_server<W: WebServer + 'static>(&mut self) -> BKResult<()> {
        self.web_server = Some(W::init(self.settings()?).await?);
        info!("Web server initialized successfully.");
        Ok(())
    }

    #[inline]
    /// Gets a reference to the settings
    pub fn settings(&self) -> BKResult<&Settings> {
        self.settings
            .as_ref()
            .ok_or(BKError::from("Settings not initialized"))
    }

    #[inline]
    /// Gets a reference to the database manager
    pub fn db_manager(&self) -> BKResult<Arc<dyn DbManager>> {
        self.db_manager
            .as_ref()
            .ok_or(BKError::from("Database manager not initialized"))
            .map(Arc::clone)
    }

    #[inline]
    /// Gets a reference to the web server
    pub fn web_server(&self) -> BKResult<Arc<dyn WebServer>> {
        self.web_server
            .as_ref()
            .ok_or(BKError::from("Web server not initialized"))
            .map(Arc::clone)
    }

    #[inline]
    pub fn change_log_level(&self, level: Level) {
        self.logger.set_level(level);
    }

    #[inline]
    pub fn log_level(&self) -> Level {
        self.logger.get_level()
    }

    /// Blocks until a shutdown signal arrives, then stops every subsystem.
    pub async fn run(&self) -> BKResult<()> {
        self.listen_for_shutdown(async { self.graceful_shutdown().await })
            .await
    }

    /// Requests shutdown without an OS signal.
    pub fn request_shutdown(&self) {
        self.shutdown_token.cancel();
    }

    async fn listen_for_shutdown<F>(&self, shutdown_fn: F) -> BKResult<()>
    where
        F: Future<Output = BKResult<()>>,
    {
        let shutdown_token = self.shutdown_token.clone();

        #[cfg(unix)]
        {
            let register = |kind: SignalKind| {
                signal(kind).map_err(|e| {
                    BKError::ShutdownError(format!("failed to register signal handler: {e}"))
                })
            };
            let mut sigterm = register(SignalKind::terminate())?;
            let mut sigint = register(SignalKind::interrupt())?;
            let mut sighup = register(SignalKind::hangup())?;

            tokio::select! {
                _ = sigterm.recv() => {
                    info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    info!("Received SIGINT signal");
                }
                _ = sighup.recv() => {
                    info!("Received SIGHUP signal");
                }
                _ = shutdown_token.cancelled() => {}
            }
        }

        #[cfg(windows)]
        {
            tokio::select! {
                _ = ctrl_c() => {
                    info!("Received ctrl-c signal");
                }
                _ = shutdown_token.cancelled() => {}
            }
        }

        shutdown_fn.await
    }

    #[inline]
    #[instrument(name = "graceful-shutdown", skip_all)]
    /// Stops the web server first so no request outlives the database pool.
    pub async fn graceful_shutdown(&self) -> BKResult<()> {
        if self.shutting_down.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        info!("Starting graceful shutdown...");

        if let Some(web_server) = &self.web_server {
            if let Err(e) = web_server.stop().await {
                error!(error = %e, "Failed to stop web server");
            }
        }

        if let Some(db_manager) = &self.db_manager {
            db_manager.close().await?;
        }

        info!("Graceful shutdown completed successfully");
        Ok(())
    }
}

/// Switches the process working directory to `general.runtime_dir` so the
/// relative defaults (`./data`, `./uploads`, `logs`) land under it.
fn apply_runtime_dir(runtime_dir: &str) -> BKResult<()> {
    let dir = runtime_dir.trim();
    if dir.is_empty() || dir == "." {
        return Ok(());
    }

    std::fs::create_dir_all(dir)
        .map_err(|e| BKError::from(format!("Failed to create runtime_dir {}: {}", dir, e)))?;

    std::env::set_current_dir(dir).map_err(|e| {
        BKError::from(format!(
            "Failed to set current_dir to runtime_dir {}: {}",
            dir, e
        ))
    })?;

    Ok(())
}

/// Creates the data, log and upload directories. Safe to call repeatedly.
fn ensure_runtime_directories(settings: &Settings) -> BKResult<()> {
    let dirs = [
        Path::new(DATA_DIR),
        Path::new(&settings.log.dir),
        Path::new(&settings.upload.logos_dir),
        Path::new(&settings.upload.media_dir),
    ];

    for dir in dirs {
        std::fs::create_dir_all(dir).map_err(|e| {
            BKError::from(format!("Failed to create directory {}: {}", dir.display(), e))
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use brandkit_error::{init::InitContextError, storage::StorageError};
    use sea_orm::DatabaseConnection;

    struct FailingServer;

    #[async_trait]
    impl WebServer for FailingServer {
        async fn init(_settings: &Settings) -> BKResult<Arc<Self>, InitContextError> {
            Ok(Arc::new(FailingServer))
        }

        async fn stop(&self) -> BKResult<()> {
            Err(BKError::from("server already gone"))
        }
    }

    #[derive(Default)]
    struct RecordingDb {
        closed: AtomicBool,
    }

    #[async_trait]
    impl DbManager for RecordingDb {
        async fn init(_settings: &Settings) -> BKResult<Arc<Self>, InitContextError> {
            Ok(Arc::new(RecordingDb::default()))
        }

        fn get_connection(&self) -> BKResult<DatabaseConnection, StorageError> {
            Err(StorageError::StorageUnavailable)
        }

        async fn close(&self) -> BKResult<()> {
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    fn context(db: Arc<RecordingDb>) -> BKAppContext {
        BKAppContext {
            settings: None,
            logger: Logger::new(None),
            db_manager: Some(db),
            web_server: Some(Arc::new(FailingServer)),
            shutting_down: AtomicBool::new(false),
            shutdown_token: CancellationToken::new(),
        }
    }

    #[tokio::test]
    async fn web_server_stop_error_does_not_skip_db_close() {
        let db = Arc::new(RecordingDb::default());
        let ctx = context(db.clone());

        assert!(ctx.graceful_shutdown().await.is_ok());
        assert!(db.closed.load(Ordering::SeqCst));
        assert!(ctx.shutting_down.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn second_shutdown_is_a_no_op() {
        let db = Arc::new(RecordingDb::default());
        let ctx = context(db.clone());

        ctx.graceful_shutdown().await.unwrap();
        db.closed.store(false, Ordering::SeqCst);
        ctx.graceful_shutdown().await.unwrap();
        assert!(!db.closed.load(Ordering::SeqCst));
    }
}
