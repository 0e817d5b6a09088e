//! Header layout staging and promotion.
//!
//! The draft lives in a single fixed slot. Unlike the company profile,
//! production is append-only: every promotion inserts a new row and the
//! newest published row is the current layout.

use crate::{check_version, get_db_connection};
use brandkit_error::{storage::StorageError, StorageResult};
use brandkit_models::{
    constants::HEADER_STAGING_ID,
    domain::prelude::{resolve_fresher, Freshest, HeaderLayout, PromoteHeader},
    entities::prelude::{
        Header, HeaderActiveModel, HeaderColumn, HeaderModel, HeaderStaging,
        HeaderStagingActiveModel, HeaderStagingColumn, HeaderStagingModel,
    },
    enums::common::ReviewStatus,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{info, instrument};

/// Rows returned by [`HeaderRepository::history`] when no limit is given.
pub const DEFAULT_HISTORY_LIMIT: u64 = 20;

pub struct HeaderRepository;

impl HeaderRepository {
    /// Newest published layout.
    pub async fn find_current<C>(db: Option<&C>) -> StorageResult<Option<HeaderModel>>
    where
        C: ConnectionTrait,
    {
        match db {
            Some(conn) => current(conn).await,
            None => {
                let db = get_db_connection().await?;
                current(&db).await
            }
        }
    }

    /// Published layouts, newest first.
    pub async fn history<C>(limit: Option<u64>, db: Option<&C>) -> StorageResult<Vec<HeaderModel>>
    where
        C: ConnectionTrait,
    {
        let query = Header::find()
            .filter(HeaderColumn::Status.eq(ReviewStatus::Published))
            .order_by_desc(HeaderColumn::UpdatedAt)
            .order_by_desc(HeaderColumn::Id)
            .limit(limit.unwrap_or(DEFAULT_HISTORY_LIMIT));
        match db {
            Some(conn) => Ok(query.all(conn).await?),
            None => {
                let db = get_db_connection().await?;
                Ok(query.all(&db).await?)
            }
        }
    }

    /// Publishes a layout directly, bypassing review.
    #[instrument(name = "header-create-published", skip_all)]
    pub async fn create_published<C>(layout: HeaderLayout, db: Option<&C>) -> StorageResult<HeaderModel>
    where
        C: ConnectionTrait,
    {
        let active = published_row(layout, Utc::now());
        let created = match db {
            Some(conn) => active.insert(conn).await?,
            None => {
                let db = get_db_connection().await?;
                active.insert(&db).await?
            }
        };
        info!(id = created.id, "header layout published directly");
        Ok(created)
    }

    pub async fn find_staging<C>(db: Option<&C>) -> StorageResult<Option<HeaderStagingModel>>
    where
        C: ConnectionTrait,
    {
        match db {
            Some(conn) => staging_slot(conn).await,
            None => {
                let db = get_db_connection().await?;
                staging_slot(&db).await
            }
        }
    }

    /// Whichever of draft and current layout was touched last. Ties go to the live row.
    pub async fn find_editable<C>(
        db: Option<&C>,
    ) -> StorageResult<Freshest<HeaderStagingModel, HeaderModel>>
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

    /// Upserts the fixed draft slot with the full layout.
    #[instrument(name = "header-save-staging", skip_all)]
    pub async fn save_staging<C>(
        layout: HeaderLayout,
        db: Option<&C>,
    ) -> StorageResult<HeaderStagingModel>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let saved = match db {
            Some(conn) => save_staging_tx(conn, layout).await?,
            None => {
                let db = get_db_connection().await?;
                save_staging_tx(&db, layout).await?
            }
        };
        info!(version = saved.version, "header draft saved");
        Ok(saved)
    }

    /// Approves the draft and appends a new published layout in one transaction.
    #[instrument(name = "header-promote", skip_all, fields(staging_id = %req.staging_id))]
    pub async fn promote<C>(req: PromoteHeader, db: Option<&C>) -> StorageResult<HeaderModel>
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
        info!(id = published.id, reviewed_by = %reviewer, "header layout published");
        Ok(published)
    }
}

async fn current<C: ConnectionTrait>(conn: &C) -> StorageResult<Option<HeaderModel>> {
    Ok(Header::find()
        .filter(HeaderColumn::Status.eq(ReviewStatus::Published))
        .order_by_desc(HeaderColumn::UpdatedAt)
        .order_by_desc(HeaderColumn::Id)
        .one(conn)
        .await?)
}

async fn staging_slot<C: ConnectionTrait>(conn: &C) -> StorageResult<Option<HeaderStagingModel>> {
    Ok(HeaderStaging::find_by_id(HEADER_STAGING_ID.to_string())
        .one(conn)
        .await?)
}

async fn editable<C: ConnectionTrait>(
    conn: &C,
) -> StorageResult<Freshest<HeaderStagingModel, HeaderModel>> {
    let (staging, production) = tokio::join!(staging_slot(conn), current(conn));
    Ok(resolve_fresher(staging?, production?))
}

async fn save_staging_tx<C: TransactionTrait>(
    conn: &C,
    layout: HeaderLayout,
) -> StorageResult<HeaderStagingModel> {
    let saved = conn
        .transaction::<_, HeaderStagingModel, StorageError>(|txn| {
            Box::pin(async move {
                let now = Utc::now();
                let saved = match staging_slot(txn).await? {
                    Some(current) => {
                        let next_version = current.version + 1;
                        let mut active = current.into_active_model();
                        apply_to_staging(&mut active, layout);
                        active.status = Set(ReviewStatus::Pending);
                        active.reviewed_by = Set(None);
                        active.reviewed_at = Set(None);
                        active.version = Set(next_version);
                        active.updated_at = Set(Some(now));
                        active.update(txn).await?
                    }
                    None => {
                        let mut active = HeaderStagingActiveModel {
                            id: Set(HEADER_STAGING_ID.to_string()),
                            status: Set(ReviewStatus::Pending),
                            reviewed_by: Set(None),
                            reviewed_at: Set(None),
                            version: Set(1),
                            created_at: Set(Some(now)),
                            updated_at: Set(Some(now)),
                            ..Default::default()
                        };
                        apply_to_staging(&mut active, layout);
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
    req: PromoteHeader,
) -> StorageResult<HeaderModel> {
    let published = conn
        .transaction::<_, HeaderModel, StorageError>(|txn| {
            Box::pin(async move {
                let now = Utc::now();
                // Write before reading, see the company promotion.
                let approved =
                    approve(txn, &req.staging_id, req.version, &req.reviewed_by, now).await?;

                let staging = HeaderStaging::find_by_id(req.staging_id.clone())
                    .one(txn)
                    .await?
                    .ok_or_else(|| {
                        StorageError::EntityNotFound(format!("header_staging {}", req.staging_id))
                    })?;
                if !approved {
                    check_version("header_staging", req.version, staging.version)?;
                    return Err(StorageError::Conflict(format!(
                        "header_staging {} is already approved",
                        staging.id
                    )));
                }

                let published = published_row(HeaderLayout::from(&staging), now)
                    .insert(txn)
                    .await?;
                Ok(published)
            })
        })
        .await?;
    Ok(published)
}

async fn approve<C: ConnectionTrait>(
    conn: &C,
    staging_id: &str,
    expected_version: Option<i32>,
    reviewed_by: &str,
    now: DateTime<Utc>,
) -> StorageResult<bool> {
    let guard = match expected_version {
        Some(version) => HeaderStagingColumn::Version.eq(version),
        None => HeaderStagingColumn::Status.eq(ReviewStatus::Pending),
    };
    let result = HeaderStaging::update_many()
        .col_expr(
            HeaderStagingColumn::Status,
            Expr::value(ReviewStatus::Approved.to_value()),
        )
        .col_expr(HeaderStagingColumn::ReviewedBy, Expr::value(reviewed_by))
        .col_expr(HeaderStagingColumn::ReviewedAt, Expr::value(now))
        .col_expr(
            HeaderStagingColumn::Version,
            Expr::col(HeaderStagingColumn::Version).add(1),
        )
        .col_expr(HeaderStagingColumn::UpdatedAt, Expr::value(now))
        .filter(HeaderStagingColumn::Id.eq(staging_id))
        .filter(guard)
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}

fn published_row(layout: HeaderLayout, now: DateTime<Utc>) -> HeaderActiveModel {
    HeaderActiveModel {
        background_color: Set(layout.background_color),
        header_height: Set(layout.header_height),
        header_position: Set(layout.header_position),
        border_color: Set(layout.border_color),
        border_height: Set(layout.border_height),
        border_shadow: Set(layout.border_shadow),
        logo_width: Set(layout.logo_width),
        logo_height: Set(layout.logo_height),
        logo_orientation: Set(layout.logo_orientation),
        status: Set(ReviewStatus::Published),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
        ..Default::default()
    }
}

fn apply_to_staging(active: &mut HeaderStagingActiveModel, layout: HeaderLayout) {
    active.background_color = Set(layout.background_color);
    active.header_height = Set(layout.header_height);
    active.header_position = Set(layout.header_position);
    active.border_color = Set(layout.border_color);
    active.border_height = Set(layout.border_height);
    active.border_shadow = Set(layout.border_shadow);
    active.logo_width = Set(layout.logo_width);
    active.logo_height = Set(layout.logo_height);
    active.logo_orientation = Set(layout.logo_orientation);
}
