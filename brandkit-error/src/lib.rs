pub mod init;
pub mod storage;
pub mod web;

use anyhow::Error as AnyhowError;
use config::ConfigError;
use init::InitContextError;
use sea_orm::{DbErr, TransactionError};
use serde_json::Error as SerdeJsonError;
use std::{error::Error as StdError, io::Error as IoError};
use storage::StorageError;
use thiserror::Error;
use tokio::task::JoinError;
use web::WebError;

pub type BKResult<T, E = BKError> = anyhow::Result<T, E>;
pub type WebResult<T, E = WebError> = anyhow::Result<T, E>;
pub type StorageResult<T, E = StorageError> = Result<T, E>;

#[derive(Error, Debug, Default)]
pub enum BKError {
    #[error("service unavailable")]
    #[default]
    ServiceUnavailable,
    #[error("{0}")]
    JoinError(#[from] JoinError),
    #[error("{0}")]
    StdError(#[from] Box<dyn StdError + Send + Sync>),
    #[error("{0}")]
    IoError(#[from] IoError),
    #[error("{0}")]
    Msg(String),
    #[error("{0}")]
    Anyhow(#[from] AnyhowError),
    #[error("{0}")]
    Json(#[from] SerdeJsonError),
    #[error("{0}")]
    ConfigError(#[from] ConfigError),
    #[error("{0}")]
    StorageError(#[from] StorageError),
    #[error("{0}")]
    InitContextError(#[from] InitContextError),
    #[error("{0}")]
    WebError(#[from] WebError),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Shutdown error: {0}")]
    ShutdownError(String),
}

impl From<String> for BKError {
    #[inline]
    fn from(e: String) -> Self {
        BKError::Msg(e)
    }
}

impl From<&str> for BKError {
    #[inline]
    fn from(e: &str) -> Self {
        BKError::Msg(e.to_string())
    }
}

impl From<DbErr> for BKError {
    #[inline]
    fn from(e: DbErr) -> Self {
        BKError::StorageError(StorageError::DBError(e))
    }
}

impl From<TransactionError<StorageError>> for StorageError {
    #[inline]
    fn from(e: TransactionError<StorageError>) -> Self {
        match e {
            TransactionError::Connection(db_err) => StorageError::DBError(db_err),
            TransactionError::Transaction(err) => err,
        }
    }
}
