//! HTTP error mapping.
//!
//! Every failure leaves the API as `{ "code": "...", "message": "..." }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::ErrorCode;
use crate::domain::reading::ReadingError;
use crate::domain::user::UserError;

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Application errors as seen by the HTTP layer.
#[derive(Debug)]
pub enum ApiError {
    Reading(ReadingError),
    User(UserError),
    /// The request body could not be decoded.
    InvalidBody(String),
}

impl From<ReadingError> for ApiError {
    fn from(err: ReadingError) -> Self {
        ApiError::Reading(err)
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        ApiError::User(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Reading(err) => match err {
                ReadingError::Validation(_) => StatusCode::BAD_REQUEST,
                ReadingError::BookSessionNotFound(_) | ReadingError::ReadingSessionNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                ReadingError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::User(err) => match err {
                UserError::Validation(_) => StatusCode::BAD_REQUEST,
                UserError::UserNotFound | UserError::ProfileNotFound => StatusCode::NOT_FOUND,
                UserError::EmailTaken | UserError::ProfileExists => StatusCode::CONFLICT,
                UserError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                UserError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn code(&self) -> ErrorCode {
        match self {
            ApiError::Reading(err) => err.code(),
            ApiError::User(err) => err.code(),
            ApiError::InvalidBody(_) => ErrorCode::ValidationFailed,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            match &self {
                ApiError::Reading(err) => tracing::error!(error = %err, "request failed"),
                ApiError::User(err) => tracing::error!(error = %err, "request failed"),
                ApiError::InvalidBody(_) => {}
            }
            "Internal server error".to_string()
        } else {
            match &self {
                ApiError::Reading(err) => err.to_string(),
                ApiError::User(err) => err.to_string(),
                ApiError::InvalidBody(reason) => format!("Invalid request body: {}", reason),
            }
        };

        let code = if status == StatusCode::INTERNAL_SERVER_ERROR {
            ErrorCode::InternalError
        } else {
            self.code()
        };

        (status, Json(ErrorResponse::new(code.to_string(), message))).into_response()
    }
}
