use brandkit_common::BKAppContext;
use brandkit_error::storage::StorageError;
use sea_orm::DatabaseConnection;

pub mod company;
pub mod header;
pub mod media;
pub mod menu_config;

pub use company::CompanyRepository;
pub use header::HeaderRepository;
pub use media::MediaStore;
pub use menu_config::MenuConfigRepository;

#[inline]
pub async fn get_db_connection() -> Result<DatabaseConnection, StorageError> {
    let ctx = BKAppContext::instance()
        .await
        .map_err(|_| StorageError::StorageUnavailable)?;
    ctx.db_manager()
        .map_err(|_| StorageError::StorageUnavailable)?
        .get_connection()
}

/// Rejects a promotion whose expected version no longer matches the row.
pub(crate) fn check_version(
    entity: &str,
    expected: Option<i32>,
    actual: i32,
) -> Result<(), StorageError> {
    match expected {
        Some(expected) if expected != actual => Err(StorageError::Conflict(format!(
            "{entity} version is {actual}, request expected {expected}"
        ))),
        _ => Ok(()),
    }
}
