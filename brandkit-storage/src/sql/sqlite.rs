use brandkit_error::BKResult;
use brandkit_models::settings::{BKDbConfig, Sqlite};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::{info, instrument, log::LevelFilter};

#[instrument(name = "init_sqlite_db", skip_all)]
/// Opens the SQLite pool. With `auto_create` the URL carries `mode=rwc` so a
/// missing file is created.
pub async fn init_db(config: &Sqlite) -> BKResult<DatabaseConnection> {
    let database_url = config.to_url();

    let mut opts = ConnectOptions::new(&database_url);
    opts.connect_timeout(Duration::from_millis(config.timeout))
        .idle_timeout(Duration::from_millis(config.idle_timeout))
        .max_lifetime(Duration::from_millis(config.max_lifetime))
        .max_connections(config.max_connections);

    #[cfg(debug_assertions)]
    {
        opts.sqlx_logging(true)
            .sqlx_logging_level(LevelFilter::Debug);
    }
    #[cfg(not(debug_assertions))]
    {
        opts.sqlx_logging(false)
            .sqlx_logging_level(LevelFilter::Off);
    }

    info!(
        "Connecting to SQLite database at: {}/{} (auto_create: {})",
        config.db_dir(),
        config.db_path(),
        config.auto_create
    );

    let db = Database::connect(opts).await?;
    info!("Successfully connected to SQLite database");

    Ok(db)
}
