use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};
use recipebook_core::{CatalogError, ConfigError};
use serde_json::json;
use thiserror::Error;

/// Startup and serving failures.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Per-request failure. The only place catalog errors become status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Maps the error to `(status, machine-readable kind)`.
    pub fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            Self::Catalog(CatalogError::Validation(_)) => (StatusCode::BAD_REQUEST, "validation"),
            Self::Catalog(CatalogError::NotFound { .. }) => (StatusCode::NOT_FOUND, "not_found"),
            Self::Catalog(CatalogError::Cascade { .. } | CatalogError::Store(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage")
            }
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.classify();
        let message = self.to_string();
        if status.is_server_error() {
            error!(
                "event=http_error module=http status=error code={} kind={} error={}",
                status.as_u16(),
                kind,
                message
            );
        } else {
            warn!(
                "event=http_error module=http status=rejected code={} kind={} error={}",
                status.as_u16(),
                kind,
                message
            );
        }
        (status, Json(json!({ "error": kind, "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use recipebook_core::{CatalogError, StoreError, ValidationError};
    use uuid::Uuid;

    #[test]
    fn classifies_catalog_errors() {
        let not_found = ApiError::from(CatalogError::NotFound {
            collection: "recipes",
            id: Uuid::new_v4(),
        });
        assert_eq!(not_found.classify(), (StatusCode::NOT_FOUND, "not_found"));

        let invalid = ApiError::from(CatalogError::Validation(ValidationError::EmptyName));
        assert_eq!(invalid.classify(), (StatusCode::BAD_REQUEST, "validation"));

        let storage = ApiError::from(CatalogError::Store(StoreError::Configuration(
            "x".to_string(),
        )));
        assert_eq!(
            storage.classify(),
            (StatusCode::INTERNAL_SERVER_ERROR, "storage")
        );
    }

    #[test]
    fn bad_request_keeps_message() {
        let err = ApiError::BadRequest("malformed id `x`".to_string());
        assert_eq!(err.classify().0, StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "malformed id `x`");
    }
}
