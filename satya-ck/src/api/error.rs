//! API error type and HTTP status mapping

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request body (400)
    #[error("{0}")]
    BadRequest(String),

    /// Missing or unknown session token (401)
    #[error("{0}")]
    Unauthorized(String),

    /// Errors raised by satya-common
    #[error(transparent)]
    Common(#[from] satya_common::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid JSON payload: {}", rejection.body_text()))
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        use satya_common::Error as E;
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::Common(err) => match err {
                E::InvalidSubmission(_) => (StatusCode::BAD_REQUEST, "INVALID_SUBMISSION"),
                E::EmptySubmission => (StatusCode::BAD_REQUEST, "EMPTY_SUBMISSION"),
                E::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
                E::WeakPassword(_) => (StatusCode::BAD_REQUEST, "WEAK_PASSWORD"),
                E::AuthenticationRequired(_) => (StatusCode::UNAUTHORIZED, "AUTHENTICATION_REQUIRED"),
                E::UserNotFound => (StatusCode::UNAUTHORIZED, "USER_NOT_FOUND"),
                E::WrongPassword => (StatusCode::UNAUTHORIZED, "WRONG_PASSWORD"),
                E::EmailInUse => (StatusCode::CONFLICT, "EMAIL_IN_USE"),
                E::IdentityBackend(_) => (StatusCode::BAD_GATEWAY, "IDENTITY_BACKEND_ERROR"),
                E::Config(_) | E::Database(_) | E::Io(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Internal error: {}", self);
            "An internal error occurred during analysis.".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
