//! Error handling for the recordshelf API
//!
//! One error type for the HTTP edge, built with thiserror and mapped to
//! status codes through Axum's IntoResponse trait. Every failure path ends up
//! here, so every failure produces a distinct status and a JSON body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::repositories::RepositoryError;

/// API error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client-side handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Main API error type
#[derive(Error, Debug)]
pub enum ApiError {
    // ========== Resource Errors ==========
    /// Requested resource not found
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    // ========== Request Errors ==========
    /// Request body could not be decoded
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Path parameter could not be parsed
    #[error("invalid path parameter '{name}': {reason}")]
    InvalidPathParam { name: &'static str, reason: String },

    /// Request body exceeded the body size limit
    #[error("request body too large: {0}")]
    PayloadTooLarge(String),

    /// Request decoded but failed validation
    #[error("validation error: {0}")]
    ValidationError(String),

    // ========== Database Errors ==========
    /// Database query failed
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// A row came back that could not be mapped onto the model
    #[error("row mapping error: {0}")]
    RowMapping(String),

    /// Pool exhausted or closed
    #[error("database connection unavailable")]
    DatabaseUnavailable,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,

            Self::InvalidBody(_) | Self::InvalidPathParam { .. } | Self::ValidationError(_) => {
                StatusCode::BAD_REQUEST
            }

            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,

            Self::DatabaseUnavailable => StatusCode::SERVICE_UNAVAILABLE,

            Self::Database(_) | Self::RowMapping(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for client-side handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::InvalidPathParam { .. } => "INVALID_PATH_PARAM",
            Self::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::RowMapping(_) => "ROW_MAPPING_ERROR",
            Self::DatabaseUnavailable => "DATABASE_UNAVAILABLE",
        }
    }

    /// Message safe to show a client
    ///
    /// Server-side failures keep driver details in the log only.
    pub fn public_message(&self) -> String {
        match self {
            Self::Database(_) => "database operation failed".to_string(),
            Self::RowMapping(_) => "stored data could not be read".to_string(),
            other => other.to_string(),
        }
    }

    /// Create a not found error for a specific resource
    pub fn not_found(resource_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Log the error with appropriate severity based on status code
    pub fn log(&self) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Server error occurred"
            );
        } else {
            tracing::debug!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Client error"
            );
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status_code();
        let error_response = ErrorResponse {
            code: self.error_code().to_string(),
            message: self.public_message(),
            details: None,
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

// ========== Conversion Implementations ==========

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => Self::DatabaseUnavailable,
            other => Self::Database(other),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => Self::not_found("record", id),
            RepositoryError::Query(e) => e.into(),
            RepositoryError::Mapping(e) => Self::RowMapping(e.to_string()),
        }
    }
}
