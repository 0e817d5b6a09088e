use crate::enums::common::ReviewStatus;
use brandkit_macros::Initializer;
use sea_orm::{sea_query::IndexCreateStatement, ActiveEnum, DatabaseBackend, DeriveIden};
use sea_orm_migration::{prelude::*, schema::pk_auto};

#[derive(DeriveIden, Initializer)]
#[initializer(
    order = super::INIT_COMPANY_STAGING_ORDER,
    create_table = create_company_staging_table,
    create_indexes = create_company_staging_indexes
)]
pub enum CompanyStaging {
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
    ReviewedBy,
    ReviewedAt,
    Version,
    CreatedAt,
    UpdatedAt,
}

fn create_company_staging_table(_: DatabaseBackend) -> TableCreateStatement {
    Table::create()
        .table(CompanyStaging::Table)
        .if_not_exists()
        .col(pk_auto(CompanyStaging::Id))
        .col(ColumnDef::new(CompanyStaging::Name).string_len(255).null())
        .col(
            ColumnDef::new(CompanyStaging::RegistrationNumber)
                .string_len(64)
                .null(),
        )
        .col(ColumnDef::new(CompanyStaging::Address).string_len(512).null())
        .col(ColumnDef::new(CompanyStaging::Country).string_len(128).null())
        .col(ColumnDef::new(CompanyStaging::PostalCode).string_len(32).null())
        .col(ColumnDef::new(CompanyStaging::Email).string_len(255).null())
        .col(ColumnDef::new(CompanyStaging::Contact).string_len(255).null())
        .col(ColumnDef::new(CompanyStaging::Logo).text().null())
        .col(ColumnDef::new(CompanyStaging::Banner).text().null())
        .col(
            ColumnDef::new(CompanyStaging::Status)
                .string_len(16)
                .not_null()
                .default(ReviewStatus::Pending.to_value()),
        )
        .col(
            ColumnDef::new(CompanyStaging::ReviewedBy)
                .string_len(128)
                .null()
                .comment("Reviewer of the last promotion"),
        )
        .col(ColumnDef::new(CompanyStaging::ReviewedAt).timestamp().null())
        .col(
            ColumnDef::new(CompanyStaging::Version)
                .integer()
                .not_null()
                .default(1)
                .comment("Optimistic lock counter"),
        )
        .col(
            ColumnDef::new(CompanyStaging::CreatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(CompanyStaging::UpdatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

fn create_company_staging_indexes(_: DatabaseBackend) -> Option<Vec<IndexCreateStatement>> {
    Some(vec![Index::create()
        .name("idx_company_staging_updated_at")
        .table(CompanyStaging::Table)
        .col(CompanyStaging::UpdatedAt)
        .if_not_exists()
        .to_owned()])
}
