use crate::get_db_connection;
use brandkit_error::StorageResult;
use brandkit_models::{
    constants::MENU_CONFIG_SINGLETON_ID,
    entities::prelude::{MenuConfig, MenuConfigActiveModel, MenuConfigColumn},
};
use chrono::Utc;
use sea_orm::{sea_query::OnConflict, ConnectionTrait, EntityTrait, JsonValue, Set};
use tracing::{info, instrument};

pub struct MenuConfigRepository;

impl MenuConfigRepository {
    /// Stored toggle-menu configuration, `{}` when nothing was saved yet.
    pub async fn get<C>(db: Option<&C>) -> StorageResult<JsonValue>
    where
        C: ConnectionTrait,
    {
        let row = match db {
            Some(conn) => MenuConfig::find_by_id(MENU_CONFIG_SINGLETON_ID).one(conn).await?,
            None => {
                let db = get_db_connection().await?;
                MenuConfig::find_by_id(MENU_CONFIG_SINGLETON_ID)
                    .one(&db)
                    .await?
            }
        };
        Ok(row
            .map(|m| m.config)
            .unwrap_or_else(|| JsonValue::Object(Default::default())))
    }

    /// Replaces the whole configuration.
    #[instrument(name = "menu-config-save", skip_all)]
    pub async fn save<C>(config: JsonValue, db: Option<&C>) -> StorageResult<JsonValue>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();
        let active = MenuConfigActiveModel {
            id: Set(MENU_CONFIG_SINGLETON_ID),
            config: Set(config.clone()),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        };
        let insert = MenuConfig::insert(active).on_conflict(
            OnConflict::column(MenuConfigColumn::Id)
                .update_columns([MenuConfigColumn::Config, MenuConfigColumn::UpdatedAt])
                .to_owned(),
        );
        match db {
            Some(conn) => insert.exec_without_returning(conn).await?,
            None => {
                let db = get_db_connection().await?;
                insert.exec_without_returning(&db).await?
            }
        };
        info!("menu config saved");
        Ok(config)
    }
}
