use thiserror::Error;

#[derive(Error, Debug, Default)]
pub enum StorageError {
    #[error("database unavailable")]
    #[default]
    StorageUnavailable,

    #[error("database error: `{0}`")]
    DBError(#[from] sea_orm::DbErr),

    #[error("entity not found: {0}")]
    EntityNotFound(String),

    /// Optimistic version check failed, another writer got there first
    #[error("conflict: {0}")]
    Conflict(String),

    /// Upload store failure (filesystem)
    #[error("file store error: {0}")]
    FileStore(#[from] std::io::Error),

    /// Rejected input detected at the storage boundary (e.g. unsafe file names)
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
