//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Username or email already exists")]
    DuplicateIdentifier,

    #[error("NIM already registered")]
    DuplicateStudentId,

    /// Unknown identifier and wrong password share this variant so the
    /// two cases stay indistinguishable to the caller.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidFile(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<crate::repositories::UserStoreError> for ApiError {
    fn from(err: crate::repositories::UserStoreError) -> Self {
        use crate::repositories::UserStoreError;
        match err {
            UserStoreError::DuplicateIdentifier => ApiError::DuplicateIdentifier,
            UserStoreError::DuplicateStudentId => ApiError::DuplicateStudentId,
            UserStoreError::NotFound => ApiError::NotFound("User not found".to_string()),
            UserStoreError::Storage(e) => ApiError::Internal(e),
        }
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::DuplicateIdentifier => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::DuplicateStudentId => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::Unauthenticated => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::InvalidFile(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Internal(err) => {
                // Log the chain; the client gets a generic message with no
                // filesystem paths or backtrace detail.
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorBody { message });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
