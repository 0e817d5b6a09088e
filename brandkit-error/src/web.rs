use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::{storage::StorageError, BKError};

#[derive(Error, Debug)]
pub enum WebError {
    #[error("BadRequest: `{0}`")]
    BadRequest(String),
    #[error("`{0}` not found")]
    NotFound(String),
    #[error("Conflict: `{0}`")]
    Conflict(String),
    #[error("InternalError: `{0}`")]
    InternalError(String),
    #[error("DBError: `{0}`")]
    StorageError(StorageError),
    #[error("MultipartError: `{0}`")]
    MultipartError(String),
}

impl From<StorageError> for WebError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::EntityNotFound(entity) => WebError::NotFound(entity),
            StorageError::Conflict(msg) => WebError::Conflict(msg),
            StorageError::InvalidInput(msg) => WebError::BadRequest(msg),
            other => WebError::StorageError(other),
        }
    }
}

impl From<std::io::Error> for WebError {
    fn from(e: std::io::Error) -> Self {
        WebError::InternalError(e.to_string())
    }
}

impl From<BKError> for WebError {
    fn from(e: BKError) -> Self {
        match e {
            BKError::StorageError(err) => WebError::from(err),
            BKError::WebError(err) => err,
            other => WebError::InternalError(other.to_string()),
        }
    }
}

impl From<actix_multipart::MultipartError> for WebError {
    fn from(e: actix_multipart::MultipartError) -> Self {
        WebError::MultipartError(e.to_string())
    }
}

impl ResponseError for WebError {
    fn error_response(&self) -> HttpResponse {
        let mut body = json!({
            "message": self.to_string()
        });
        match self {
            WebError::BadRequest(_) => {
                body["error"] = json!("Bad Request");
                HttpResponse::BadRequest().json(body)
            }
            WebError::NotFound(_) => {
                body["error"] = json!("Not Found");
                HttpResponse::NotFound().json(body)
            }
            WebError::Conflict(_) => {
                body["error"] = json!("Conflict");
                HttpResponse::Conflict().json(body)
            }
            WebError::InternalError(_) => {
                body["error"] = json!("Internal Server Error");
                HttpResponse::InternalServerError().json(body)
            }
            WebError::StorageError(_) => {
                body["error"] = json!("Storage Error");
                HttpResponse::InternalServerError().json(body)
            }
            WebError::MultipartError(msg) => {
                body["error"] = json!("Multipart Error");
                body["message"] = json!(msg);
                HttpResponse::BadRequest().json(body)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn storage_errors_map_to_http_status() {
        let not_found = WebError::from(StorageError::EntityNotFound("company_staging".into()));
        assert_eq!(not_found.error_response().status(), StatusCode::NOT_FOUND);

        let conflict = WebError::from(StorageError::Conflict("stale version".into()));
        assert_eq!(conflict.error_response().status(), StatusCode::CONFLICT);

        let invalid = WebError::from(StorageError::InvalidInput("bad name".into()));
        assert_eq!(invalid.error_response().status(), StatusCode::BAD_REQUEST);

        let unavailable = WebError::from(StorageError::StorageUnavailable);
        assert_eq!(
            unavailable.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn app_error_unwraps_storage_kind() {
        let err = WebError::from(BKError::StorageError(StorageError::Conflict("x".into())));
        assert!(matches!(err, WebError::Conflict(_)));
    }
}
