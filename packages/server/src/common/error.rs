//! Unified error type for the REST surface.
//!
//! Every failure a handler can produce maps onto one of these variants, and
//! each variant owns its status code: NotFound -> 404, Validation and
//! Conflict -> 422, IndexSync and Internal -> 500. Index-sync failures keep
//! their own variant (rather than folding into Internal) so handlers and
//! tests can tell the two apart even though they share a status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// A single field-level validation failure.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,

    #[error("request validation failed")]
    Validation(Vec<FieldError>),

    #[error("conflicting resource state")]
    Conflict,

    #[error("missing or unknown API key")]
    Unauthorized,

    /// Search index rejected or never received the partial update while the
    /// server runs in strict sync mode.
    #[error("search index update failed: {0}")]
    IndexSync(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        ApiError::Validation(errors)
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::Conflict => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::IndexSync(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => ApiError::NotFound,
            sqlx::Error::Database(db_err)
                if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
            {
                ApiError::Conflict
            }
            _ => ApiError::Internal(err.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            ApiError::Validation(errors) => json!({ "errors": errors }),
            ApiError::IndexSync(message) => {
                tracing::warn!(error = %message, "Index sync failure surfaced to client");
                json!({ "errors": [{ "index-sync-failed": { "message": message } }] })
            }
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "Unhandled internal error");
                json!({ "errors": [{ "message": "internal server error" }] })
            }
            other => json!({ "errors": [{ "message": other.to_string() }] }),
        };

        (status, Json(body)).into_response()
    }
}
