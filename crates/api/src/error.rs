//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`; every error body is JSON `{"detail": "..."}`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use vitrine_core::CheckoutError;

use crate::services::CatalogError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog operation failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Checkout request was rejected.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Request body could not be read as the expected JSON shape.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Request was refused before the body was parsed, e.g. a missing
    /// `Content-Type: application/json` header.
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                Self::InvalidBody(rejection.body_text())
            }
            _ => Self::Rejected {
                status: rejection.status(),
                detail: rejection.body_text(),
            },
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(CatalogError::ServiceUnavailable) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Catalog(CatalogError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Catalog(CatalogError::Validation(_))
            | Self::Checkout(_)
            | Self::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Rejected { status, .. } => *status,
            Self::Catalog(CatalogError::Store(_)) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let detail = match &self {
            Self::Catalog(CatalogError::Store(_)) | Self::Internal(_) => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;
    use crate::db::StoreError;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    async fn get_detail(err: AppError) -> String {
        let bytes = err.into_response().into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        body["detail"].as_str().unwrap().to_owned()
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(CatalogError::ServiceUnavailable.into()),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            get_status(CatalogError::NotFound("abc".into()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(CatalogError::Validation("bad".into()).into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(
                CheckoutError::InvalidQuantity {
                    index: 0,
                    id: "a".into(),
                    qty: 0,
                }
                .into()
            ),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(AppError::InvalidBody("missing field".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(CatalogError::Store(StoreError::DataCorruption("x".into())).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Rejected {
                status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
                detail: "Expected request with `Content-Type: application/json`".into(),
            }),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            get_status(AppError::Internal("test".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_detail_messages() {
        assert_eq!(
            get_detail(CatalogError::ServiceUnavailable.into()).await,
            "Database not available"
        );
        assert_eq!(
            get_detail(CatalogError::NotFound("abc".into()).into()).await,
            "Product abc not found"
        );
    }

    #[tokio::test]
    async fn test_internal_details_are_hidden() {
        let err: AppError =
            CatalogError::Store(StoreError::DataCorruption("row 7 is garbage".into())).into();
        assert_eq!(get_detail(err).await, "Internal server error");
    }
}
