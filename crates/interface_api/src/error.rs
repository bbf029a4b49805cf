//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use domain_lostfound::LostFoundError;

use crate::auth::AuthError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    /// The store could not be reached or rejected a write
    #[error("{0}")]
    Store(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone()),
            ApiError::Store(msg) => (StatusCode::SERVICE_UNAVAILABLE, "store_error", msg.clone()),
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg.clone()),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<LostFoundError> for ApiError {
    fn from(err: LostFoundError) -> Self {
        match err {
            LostFoundError::ItemNotFound(_) | LostFoundError::ClaimNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            LostFoundError::Validation(msg) => ApiError::Validation(msg),
            LostFoundError::IncorrectPassword | LostFoundError::InvalidCredentials => {
                ApiError::Unauthorized(err.to_string())
            }
            LostFoundError::InvalidStatusTransition { .. } => ApiError::Conflict(err.to_string()),
            LostFoundError::Store { .. } => {
                error!(error = ?err, "Store failure");
                ApiError::Store(err.to_string())
            }
            LostFoundError::PartialApproval { .. } => {
                error!(error = ?err, "Partial approval");
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingRole(_) => ApiError::Forbidden(err.to_string()),
            AuthError::TokenCreation => ApiError::Internal(err.to_string()),
            AuthError::InvalidToken | AuthError::TokenExpired => ApiError::Unauthorized(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{ClaimId, PortError};

    #[test]
    fn test_domain_error_mapping() {
        let not_found: ApiError = LostFoundError::ClaimNotFound(ClaimId::new()).into();
        assert!(matches!(not_found, ApiError::NotFound(_)));

        let login: ApiError = LostFoundError::IncorrectPassword.into();
        assert_eq!(login.to_string(), "Incorrect password. Please try again.");

        let store: ApiError = LostFoundError::Store {
            context: "Failed to create claim",
            source: PortError::connection("refused"),
        }
        .into();
        assert_eq!(store.to_string(), "Failed to create claim");
    }

    #[test]
    fn test_status_codes() {
        let response = ApiError::Forbidden("faculty only".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = ApiError::Validation("title".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
