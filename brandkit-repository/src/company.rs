//! Company profile staging and promotion.
//!
//! Staging holds one mutable draft; production holds one live row that is
//! updated in place on every promotion.

use crate::{check_version, get_db_connection};
use brandkit_error::{storage::StorageError, StorageResult};
use brandkit_models::{
    domain::prelude::{resolve_fresher, CompanyLogo, CompanyProfile, Freshest, PromoteCompany},
    entities::prelude::{
        Company, CompanyActiveModel, CompanyColumn, CompanyModel, CompanyStaging,
        CompanyStagingActiveModel, CompanyStagingColumn, CompanyStagingModel,
    },
    enums::common::ReviewStatus,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{info, instrument};

pub struct CompanyRepository;

impl CompanyRepository {
    /// The live profile, if one was ever promoted.
    pub async fn find_published<C>(db: Option<&C>) -> StorageResult<Option<CompanyModel>>
    where
        C: ConnectionTrait,
    {
        match db {
            Some(conn) => latest_published(conn).await,
            None => {
                let db = get_db_connection().await?;
                latest_published(&db).await
            }
        }
    }

    /// Latest draft by `updated_at`.
    pub async fn find_latest_staging<C>(db: Option<&C>) -> StorageResult<Option<CompanyStagingModel>>
    where
        C: ConnectionTrait,
    {
        match db {
            Some(conn) => latest_staging(conn).await,
            None => {
                let db = get_db_connection().await?;
                latest_staging(&db).await
            }
        }
    }

    pub async fn find_staging_by_id<C>(
        id: i32,
        db: Option<&C>,
    ) -> StorageResult<Option<CompanyStagingModel>>
    where
        C: ConnectionTrait,
    {
        match db {
            Some(conn) => Ok(CompanyStaging::find_by_id(id).one(conn).await?),
            None => {
                let db = get_db_connection().await?;
                Ok(CompanyStaging::find_by_id(id).one(&db).await?)
            }
        }
    }

    /// Whichever of draft and live profile was touched last. Ties go to the live row.
    pub async fn find_editable<C>(
        db: Option<&C>,
    ) -> StorageResult<Freshest<CompanyStagingModel, CompanyModel>>
    where
        C: ConnectionTrait,
    {
        match db {
            Some(conn) => editable(conn).await,
            None => {
                let db = get_db_connection().await?;
                editable(&db).await
            }
        }
    }

    pub async fn find_logo<C>(db: Option<&C>) -> StorageResult<CompanyLogo>
    where
        C: ConnectionTrait,
    {
        Ok(CompanyLogo::from(Self::find_published(db).await?))
    }

    /// Replaces the whole draft with `profile`.
    ///
    /// The draft goes back to `PENDING`, loses its reviewer and gets a new version.
    #[instrument(name = "company-save-staging", skip_all)]
    pub async fn save_staging<C>(
        profile: CompanyProfile,
        db: Option<&C>,
    ) -> StorageResult<CompanyStagingModel>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let saved = match db {
            Some(conn) => save_staging_tx(conn, profile).await?,
            None => {
                let db = get_db_connection().await?;
                save_staging_tx(&db, profile).await?
            }
        };
        info!(id = saved.id, version = saved.version, "company draft saved");
        Ok(saved)
    }

    /// Approves the draft and copies it onto the live profile in one transaction.
    ///
    /// Fails with `EntityNotFound` for an unknown draft and with `Conflict` when
    /// the draft changed since the caller read it.
    #[instrument(name = "company-promote", skip_all, fields(staging_id = req.staging_id))]
    pub async fn promote<C>(req: PromoteCompany, db: Option<&C>) -> StorageResult<CompanyModel>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let reviewer = req.reviewed_by.clone();
        let published = match db {
            Some(conn) => promote_tx(conn, req).await?,
            None => {
                let db = get_db_connection().await?;
                promote_tx(&db, req).await?
            }
        };
        info!(id = published.id, reviewed_by = %reviewer, "company profile published");
        Ok(published)
    }
}

async fn latest_published<C: ConnectionTrait>(conn: &C) -> StorageResult<Option<CompanyModel>> {
    Ok(Company::find()
        .filter(CompanyColumn::Status.eq(ReviewStatus::Published))
        .order_by_desc(CompanyColumn::UpdatedAt)
        .order_by_desc(CompanyColumn::Id)
        .one(conn)
        .await?)
}

async fn latest_staging<C: ConnectionTrait>(conn: &C) -> StorageResult<Option<CompanyStagingModel>> {
    Ok(CompanyStaging::find()
        .order_by_desc(CompanyStagingColumn::UpdatedAt)
        .order_by_desc(CompanyStagingColumn::Id)
        .one(conn)
        .await?)
}

async fn editable<C: ConnectionTrait>(
    conn: &C,
) -> StorageResult<Freshest<CompanyStagingModel, CompanyModel>> {
    let (staging, production) = tokio::join!(latest_staging(conn), latest_published(conn));
    Ok(resolve_fresher(staging?, production?))
}

async fn save_staging_tx<C: TransactionTrait>(
    conn: &C,
    profile: CompanyProfile,
) -> StorageResult<CompanyStagingModel> {
    let saved = conn
        .transaction::<_, CompanyStagingModel, StorageError>(|txn| {
            Box::pin(async move {
                let now = Utc::now();
                let saved = match latest_staging(txn).await? {
                    Some(current) => {
                        let next_version = current.version + 1;
                        let mut active = current.into_active_model();
                        apply_to_staging(&mut active, profile);
                        active.status = Set(ReviewStatus::Pending);
                        active.reviewed_by = Set(None);
                        active.reviewed_at = Set(None);
                        active.version = Set(next_version);
                        active.updated_at = Set(Some(now));
                        active.update(txn).await?
                    }
                    None => {
                        let mut active = CompanyStagingActiveModel {
                            status: Set(ReviewStatus::Pending),
                            reviewed_by: Set(None),
                            reviewed_at: Set(None),
                            version: Set(1),
                            created_at: Set(Some(now)),
                            updated_at: Set(Some(now)),
                            ..Default::default()
                        };
                        apply_to_staging(&mut active, profile);
                        active.insert(txn).await?
                    }
                };
                Ok(saved)
            })
        })
        .await?;
    Ok(saved)
}

async fn promote_tx<C: TransactionTrait>(
    conn: &C,
    req: PromoteCompany,
) -> StorageResult<CompanyModel> {
    let published = conn
        .transaction::<_, CompanyModel, StorageError>(|txn| {
            Box::pin(async move {
                let now = Utc::now();
                // The write comes first so a concurrent promoter queues on the
                // write lock instead of deadlocking behind a read.
                let approved =
                    approve(txn, req.staging_id, req.version, &req.reviewed_by, now).await?;

                let staging = CompanyStaging::find_by_id(req.staging_id)
                    .one(txn)
                    .await?
                    .ok_or_else(|| {
                        StorageError::EntityNotFound(format!("company_staging {}", req.staging_id))
                    })?;
                if !approved {
                    check_version("company_staging", req.version, staging.version)?;
                    return Err(StorageError::Conflict(format!(
                        "company_staging {} is already approved",
                        staging.id
                    )));
                }

                let profile = CompanyProfile::from(&staging);
                let published = match latest_published(txn).await? {
                    Some(current) => {
                        let mut active = current.into_active_model();
                        apply_to_company(&mut active, profile);
                        active.status = Set(ReviewStatus::Published);
                        active.updated_at = Set(Some(now));
                        active.update(txn).await?
                    }
                    None => {
                        let mut active = CompanyActiveModel {
                            status: Set(ReviewStatus::Published),
                            created_at: Set(Some(now)),
                            updated_at: Set(Some(now)),
                            ..Default::default()
                        };
                        apply_to_company(&mut active, profile);
                        active.insert(txn).await?
                    }
                };
                Ok(published)
            })
        })
        .await?;
    Ok(published)
}

/// Compare-and-swap approval. Matches the expected `version` when the caller
/// sent one, otherwise any draft still pending. Returns whether a row changed.
async fn approve<C: ConnectionTrait>(
    conn: &C,
    staging_id: i32,
    expected_version: Option<i32>,
    reviewed_by: &str,
    now: DateTime<Utc>,
) -> StorageResult<bool> {
    let guard = match expected_version {
        Some(version) => CompanyStagingColumn::Version.eq(version),
        None => CompanyStagingColumn::Status.eq(ReviewStatus::Pending),
    };
    let result = CompanyStaging::update_many()
        .col_expr(
            CompanyStagingColumn::Status,
            Expr::value(ReviewStatus::Approved.to_value()),
        )
        .col_expr(CompanyStagingColumn::ReviewedBy, Expr::value(reviewed_by))
        .col_expr(CompanyStagingColumn::ReviewedAt, Expr::value(now))
        .col_expr(
            CompanyStagingColumn::Version,
            Expr::col(CompanyStagingColumn::Version).add(1),
        )
        .col_expr(CompanyStagingColumn::UpdatedAt, Expr::value(now))
        .filter(CompanyStagingColumn::Id.eq(staging_id))
        .filter(guard)
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}

fn apply_to_staging(active: &mut CompanyStagingActiveModel, p: CompanyProfile) {
    active.name = Set(p.name);
    active.registration_number = Set(p.registration_number);
    active.address = Set(p.address);
    active.country = Set(p.country);
    active.postal_code = Set(p.postal_code);
    active.email = Set(p.email);
    active.contact = Set(p.contact);
    active.logo = Set(p.logo);
    active.banner = Set(p.banner);
}

fn apply_to_company(active: &mut CompanyActiveModel, p: CompanyProfile) {
    active.name = Set(p.name);
    active.registration_number = Set(p.registration_number);
    active.address = Set(p.address);
    active.country = Set(p.country);
    active.postal_code = Set(p.postal_code);
    active.email = Set(p.email);
    active.contact = Set(p.contact);
    active.logo = Set(p.logo);
    active.banner = Set(p.banner);
}
