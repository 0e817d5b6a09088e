#![allow(dead_code)]

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Once;
use tempfile::TempDir;
use tracing::Level;

static INIT_TRACING: Once = Once::new();

pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_target(false)
            .without_time()
            .try_init();
    });
}

/// Fresh in-memory database with the full schema applied.
///
/// A single pooled connection keeps every query on the same in-memory file.
pub async fn setup_db() -> DatabaseConnection {
    init_tracing();
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.unwrap();
    brandkit_storage::migrate(&db).await.unwrap();
    db
}

/// File-backed database with a real connection pool, for tests that need
/// several connections racing on the same rows.
pub async fn setup_file_db(dir: &TempDir) -> DatabaseConnection {
    init_tracing();
    let path = dir.path().join("brandkit-test.db");
    let mut opts = ConnectOptions::new(format!("sqlite://{}?mode=rwc", path.display()));
    opts.max_connections(8).sqlx_logging(false);
    let db = Database::connect(opts).await.unwrap();
    brandkit_storage::migrate(&db).await.unwrap();
    db
}
