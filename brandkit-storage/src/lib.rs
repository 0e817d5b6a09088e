mod migration;
mod sql;

use async_trait::async_trait;
use brandkit_error::{init::InitContextError, storage::StorageError, BKResult};
use brandkit_models::{settings::Settings, DbManager};
use migration::{Migrator, MigratorTrait};
use sea_orm::{DatabaseConnection, DbErr};
use sql::sqlite;
use std::sync::Arc;
use tracing::{info, instrument};

/// Global database manager struct
pub struct BKDbManager {
    db_conn: Option<DatabaseConnection>,
}

#[async_trait]
impl DbManager for BKDbManager {
    #[inline]
    #[instrument(name = "init-db-manager", skip_all)]
    async fn init(settings: &Settings) -> BKResult<Arc<Self>, InitContextError> {
        let db_conn = {
            let db = sqlite::init_db(&settings.db.sqlite).await.map_err(|e| {
                InitContextError::Primitive(format!("Failed to init SQLite database: {e}"))
            })?;

            migrate(&db).await.map_err(|e| {
                InitContextError::Primitive(format!("Failed to migrate SQLite database: {e}"))
            })?;

            db
        };

        let db_manager = Arc::new(BKDbManager {
            db_conn: Some(db_conn),
        });

        info!("Database manager initialized successfully");
        Ok(db_manager)
    }

    #[inline]
    fn get_connection(&self) -> BKResult<DatabaseConnection, StorageError> {
        self.db_conn
            .as_ref()
            .ok_or(StorageError::StorageUnavailable)
            .cloned()
    }

    #[inline]
    #[instrument(name = "db_close", skip_all)]
    async fn close(&self) -> BKResult<()> {
        info!("Closing database connections...");
        if let Some(db) = &self.db_conn {
            db.clone().close().await?;
        }
        info!("Database connections closed successfully");
        Ok(())
    }
}

/// Applies all pending migrations (schema, indexes, triggers, seed rows).
///
/// Also used by tests against an in-memory database.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(db, None).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandkit_models::{
        constants::MENU_CONFIG_SINGLETON_ID,
        entities::prelude::{Company, CompanyStaging, Header, HeaderStaging, MenuConfig},
    };
    use sea_orm::{ConnectOptions, Database, EntityTrait, PaginatorTrait};

    #[tokio::test]
    async fn migrate_creates_tables_and_seeds_menu_config() {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).sqlx_logging(false);
        let db = Database::connect(opts).await.unwrap();

        migrate(&db).await.unwrap();

        let seeded = MenuConfig::find_by_id(MENU_CONFIG_SINGLETON_ID)
            .one(&db)
            .await
            .unwrap()
            .expect("menu_config seed row");
        assert_eq!(seeded.config, serde_json::json!({}));
        assert!(seeded.updated_at.is_some());

        assert_eq!(Company::find().count(&db).await.unwrap(), 0);
        assert_eq!(CompanyStaging::find().count(&db).await.unwrap(), 0);
        assert_eq!(Header::find().count(&db).await.unwrap(), 0);
        assert_eq!(HeaderStaging::find().count(&db).await.unwrap(), 0);
    }
}
