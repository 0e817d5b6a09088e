use crate::enums::common::ReviewStatus;
use brandkit_macros::Initializer;
use sea_orm::{sea_query::IndexCreateStatement, ActiveEnum, DatabaseBackend, DeriveIden};
use sea_orm_migration::{prelude::*, schema::pk_auto};

#[derive(DeriveIden, Initializer)]
#[initializer(
    order = super::INIT_COMPANY_ORDER,
    create_table = create_company_table,
    create_indexes = create_company_indexes
)]
pub enum Company {
    Table,
    Id,
    Name,
    RegistrationNumber,
    Address,
    Country,
    PostalCode,
    Email,
    Contact,
    Logo,
    Banner,
    Status,
    CreatedAt,
    UpdatedAt,
}

fn create_company_table(_: DatabaseBackend) -> TableCreateStatement {
    Table::create()
        .table(Company::Table)
        .if_not_exists()
        .col(pk_auto(Company::Id))
        .col(ColumnDef::new(Company::Name).string_len(255).null())
        .col(ColumnDef::new(Company::RegistrationNumber).string_len(64).null())
        .col(ColumnDef::new(Company::Address).string_len(512).null())
        .col(ColumnDef::new(Company::Country).string_len(128).null())
        .col(ColumnDef::new(Company::PostalCode).string_len(32).null())
        .col(ColumnDef::new(Company::Email).string_len(255).null())
        .col(ColumnDef::new(Company::Contact).string_len(255).null())
        .col(ColumnDef::new(Company::Logo).text().null().comment("Logo reference"))
        .col(ColumnDef::new(Company::Banner).text().null().comment("Banner reference"))
        .col(
            ColumnDef::new(Company::Status)
                .string_len(16)
                .not_null()
                .default(ReviewStatus::Published.to_value()),
        )
        .col(
            ColumnDef::new(Company::CreatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Company::UpdatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

fn create_company_indexes(_: DatabaseBackend) -> Option<Vec<IndexCreateStatement>> {
    Some(vec![Index::create()
        .name("idx_company_updated_at")
        .table(Company::Table)
        .col(Company::UpdatedAt)
        .if_not_exists()
        .to_owned()])
}
