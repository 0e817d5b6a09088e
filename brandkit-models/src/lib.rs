pub mod constants;
pub mod domain;
pub mod entities;
pub mod enums;
mod idens;
pub mod initializer;
pub mod settings;

use async_trait::async_trait;
use brandkit_error::{init::InitContextError, storage::StorageError, BKResult};
use downcast_rs::{impl_downcast, DowncastSync};
use sea_orm::DatabaseConnection;
use settings::Settings;
use std::sync::Arc;

impl_downcast!(sync WebServer);
impl_downcast!(sync DbManager);

/// Database management interface.
///
/// Owns the connection pool and the schema lifecycle (migrations, seeding).
#[async_trait]
pub trait DbManager: DowncastSync + Send + Sync + 'static {
    /// Initializes the database manager with the provided settings.
    ///
    /// # Arguments
    /// * `settings` - The application settings
    ///
    /// # Returns
    /// An Arc-wrapped instance of the database manager
    async fn init(settings: &Settings) -> BKResult<Arc<Self>, InitContextError>
    where
        Self: Sized;

    /// Retrieves a database connection from the connection pool.
    fn get_connection(&self) -> BKResult<DatabaseConnection, StorageError>;

    /// Gracefully closes all database connections.
    async fn close(&self) -> BKResult<()>;
}

/// Web server interface for the admin HTTP API.
#[async_trait]
pub trait WebServer: DowncastSync + Send + Sync + 'static {
    /// Binds and starts the web server.
    async fn init(settings: &Settings) -> BKResult<Arc<Self>, InitContextError>
    where
        Self: Sized;

    /// Gracefully stops the web server.
    async fn stop(&self) -> BKResult<()>;
}
