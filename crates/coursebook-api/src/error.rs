//! API error types and HTTP response mapping.
//!
//! Every error response carries a `{"detail": "<message>"}` JSON body with
//! a fixed, endpoint-specific message. Storage failures are logged and
//! mapped to an opaque 500; the body never leaks internals.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use coursebook_catalog::CatalogError;
use coursebook_core::Error as CoreError;

/// API result type.
pub type ApiResult<T> = Result<T, ApiError>;

/// Standard JSON error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorBody {
    /// Human-readable message (safe for clients).
    pub detail: String,
}

/// HTTP API error.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    /// Returns an error response for missing resources.
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }

    /// Returns an error response for values that failed validation.
    pub fn unprocessable_entity(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, detail)
    }

    /// Returns an error response for conflicting writes.
    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, detail)
    }

    /// Returns an internal error response.
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the human-readable error message.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }

    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ApiErrorBody {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(value: CatalogError) -> Self {
        match value {
            CatalogError::Validation { message } => Self::unprocessable_entity(message),
            CatalogError::NotFound { entity, id } => {
                Self::not_found(format!("{entity} not found: {id}"))
            }
            CatalogError::AlreadyExists { entity, id } => {
                Self::conflict(format!("{entity} already exists: {id}"))
            }
            CatalogError::Storage { .. } | CatalogError::Serialization { .. } => {
                tracing::error!(error = %value, "catalog operation failed");
                Self::internal("Internal Server Error")
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidId { message } | CoreError::InvalidInput(message) => {
                Self::unprocessable_entity(message)
            }
            CoreError::NotFound(message) => Self::not_found(message),
            CoreError::Storage { .. }
            | CoreError::Serialization { .. }
            | CoreError::Internal { .. } => {
                tracing::error!(error = %value, "storage operation failed");
                Self::internal("Internal Server Error")
            }
        }
    }
}
