//! Error types for herdbook operations.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

use crate::validate::Violation;

/// Errors that can occur during persistence gateway operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The referenced record was not found in the store.
    NotFound,
    /// The underlying store failed unexpectedly.
    Internal(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "Record not found in store"),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            _ => StoreError::Internal(e.to_string()),
        }
    }
}

impl std::error::Error for StoreError {}

/// Body of a 400 response: the field-level violation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorsBody {
    /// The violations that caused the request to be rejected.
    pub errors: Vec<Violation>,
}

/// Body of a 404 or 500 response: a single message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    /// Human-readable description of the failure.
    pub message: String,
}

/// API-level failure taxonomy, mapped onto HTTP statuses.
///
/// Validation failures are recoverable by resubmitting corrected input;
/// missing-record failures are not retried; internal failures carry a
/// generic body while the cause is logged server-side.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// One or more field rules were violated.
    Validation(Vec<Violation>),
    /// The referenced id has no corresponding record.
    NotFound,
    /// The store failed unexpectedly; details stay server-side.
    Internal,
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => ApiError::NotFound,
            StoreError::Internal(_) => ApiError::Internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(ErrorsBody { errors })).into_response()
            }
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(MessageBody {
                    message: "Livestock not found".to_string(),
                }),
            )
                .into_response(),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageBody {
                    message: "Internal server error".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
