use crate::enums::common::ReviewStatus;
use brandkit_macros::Initializer;
use sea_orm::{sea_query::IndexCreateStatement, ActiveEnum, DatabaseBackend, DeriveIden};
use sea_orm_migration::{prelude::*, schema::pk_auto};

#[derive(DeriveIden, Initializer)]
#[initializer(
    order = super::INIT_HEADER_ORDER,
    create_table = create_header_table,
    create_indexes = create_header_indexes
)]
pub enum Header {
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
    CreatedAt,
    UpdatedAt,
}

pub(super) fn layout_columns<T>(
    table: &mut TableCreateStatement,
    cols: [T; 9],
) -> &mut TableCreateStatement
where
    T: IntoIden,
{
    for col in cols {
        table.col(ColumnDef::new(col).string_len(255).not_null());
    }
    table
}

fn create_header_table(_: DatabaseBackend) -> TableCreateStatement {
    let mut table = Table::create();
    table.table(Header::Table).if_not_exists().col(pk_auto(Header::Id));
    layout_columns(
        &mut table,
        [
            Header::BackgroundColor,
            Header::HeaderHeight,
            Header::HeaderPosition,
            Header::BorderColor,
            Header::BorderHeight,
            Header::BorderShadow,
            Header::LogoWidth,
            Header::LogoHeight,
            Header::LogoOrientation,
        ],
    )
    .col(
        ColumnDef::new(Header::Status)
            .string_len(16)
            .not_null()
            .default(ReviewStatus::Published.to_value()),
    )
    .col(
        ColumnDef::new(Header::CreatedAt)
            .timestamp()
            .default(Expr::current_timestamp()),
    )
    .col(
        ColumnDef::new(Header::UpdatedAt)
            .timestamp()
            .default(Expr::current_timestamp()),
    )
    .to_owned()
}

fn create_header_indexes(_: DatabaseBackend) -> Option<Vec<IndexCreateStatement>> {
    Some(vec![Index::create()
        .name("idx_header_status_updated_at")
        .table(Header::Table)
        .col(Header::Status)
        .col(Header::UpdatedAt)
        .if_not_exists()
        .to_owned()])
}
