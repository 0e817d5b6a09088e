use crate::domain::prelude::NewMenuConfigWithId;
use brandkit_macros::Initializer;
use sea_orm::{DatabaseBackend, DeriveIden};
use sea_orm_migration::prelude::*;

#[derive(DeriveIden, Initializer)]
#[initializer(
    order = super::INIT_MENU_CONFIG_ORDER,
    create_table = create_menu_config_table,
    seed = NewMenuConfigWithId,
    seed_data = get_menu_config_seed_data
)]
pub enum MenuConfig {
    Table,
    Id,
    Config,
    CreatedAt,
    UpdatedAt,
}

fn create_menu_config_table(_: DatabaseBackend) -> TableCreateStatement {
    Table::create()
        .table(MenuConfig::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(MenuConfig::Id)
                .integer()
                .not_null()
                .primary_key(),
        )
        .col(
            ColumnDef::new(MenuConfig::Config)
                .json()
                .not_null()
                .comment("Toggle-menu button configuration"),
        )
        .col(
            ColumnDef::new(MenuConfig::CreatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(MenuConfig::UpdatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

async fn get_menu_config_seed_data() -> Result<Option<Vec<NewMenuConfigWithId>>, DbErr> {
    Ok(Some(vec![NewMenuConfigWithId::default()]))
}
