use super::header::layout_columns;
use crate::enums::common::ReviewStatus;
use brandkit_macros::Initializer;
use sea_orm::{ActiveEnum, DatabaseBackend, DeriveIden};
use sea_orm_migration::prelude::*;

#[derive(DeriveIden, Initializer)]
#[initializer(
    order = super::INIT_HEADER_STAGING_ORDER,
    create_table = create_header_staging_table
)]
pub enum HeaderStaging {
    Table,
    Id,
    BackgroundColor,
    HeaderHeight,
    HeaderPosition,
    BorderColor,
    BorderHeight,
    BorderShadow,
    LogoWidth,
    LogoHeight,
    LogoOrientation,
    Status,
    ReviewedBy,
    ReviewedAt,
    Version,
    CreatedAt,
    UpdatedAt,
}

fn create_header_staging_table(_: DatabaseBackend) -> TableCreateStatement {
    let mut table = Table::create();
    table.table(HeaderStaging::Table).if_not_exists().col(
        ColumnDef::new(HeaderStaging::Id)
            .string_len(64)
            .not_null()
            .primary_key()
            .comment("Fixed slot key"),
    );
    layout_columns(
        &mut table,
        [
            HeaderStaging::BackgroundColor,
            HeaderStaging::HeaderHeight,
            HeaderStaging::HeaderPosition,
            HeaderStaging::BorderColor,
            HeaderStaging::BorderHeight,
            HeaderStaging::BorderShadow,
            HeaderStaging::LogoWidth,
            HeaderStaging::LogoHeight,
            HeaderStaging::LogoOrientation,
        ],
    )
    .col(
        ColumnDef::new(HeaderStaging::Status)
            .string_len(16)
            .not_null()
            .default(ReviewStatus::Pending.to_value()),
    )
    .col(ColumnDef::new(HeaderStaging::ReviewedBy).string_len(128).null())
    .col(ColumnDef::new(HeaderStaging::ReviewedAt).timestamp().null())
    .col(
        ColumnDef::new(HeaderStaging::Version)
            .integer()
            .not_null()
            .default(1),
    )
    .col(
        ColumnDef::new(HeaderStaging::CreatedAt)
            .timestamp()
            .default(Expr::current_timestamp()),
    )
    .col(
        ColumnDef::new(HeaderStaging::UpdatedAt)
            .timestamp()
            .default(Expr::current_timestamp()),
    )
    .to_owned()
}
