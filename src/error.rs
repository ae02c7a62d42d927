// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use thiserror::Error;

use crate::auth::AuthError;

/// Every failure a handler can report. The external code and message are
/// fixed per variant; underlying causes are logged, never returned.
#[derive(Debug, Error)]
pub enum ApiError {
    // 400 Bad Request
    #[error("Bad request")]
    BadRequest,

    // 404 Not Found
    #[error("Resource not found")]
    NotFound,

    // 500 Internal Server Error
    #[error("Server error")]
    Internal,

    // 400 / 401 / 403 / 500 from the token validator
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Auth(err) => err.status_code(),
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self.status_code().as_u16(),
            "message": self.to_string(),
        })
    }
}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

/// Collapse any error into a fixed `ApiError`, logging what was discarded.
pub trait OrApiError<T> {
    fn or_api_error(self, err: ApiError) -> Result<T, ApiError>;

    fn or_bad_request(self) -> Result<T, ApiError>
    where
        Self: Sized,
    {
        self.or_api_error(ApiError::BadRequest)
    }

    fn or_not_found(self) -> Result<T, ApiError>
    where
        Self: Sized,
    {
        self.or_api_error(ApiError::NotFound)
    }

    fn or_internal(self) -> Result<T, ApiError>
    where
        Self: Sized,
    {
        self.or_api_error(ApiError::Internal)
    }
}

impl<T, E: std::fmt::Display> OrApiError<T> for Result<T, E> {
    fn or_api_error(self, err: ApiError) -> Result<T, ApiError> {
        self.map_err(|cause| {
            tracing::warn!("Request failed with {}: {}", err.status_code(), cause);
            err
        })
    }
}

impl<T> OrApiError<T> for Option<T> {
    fn or_api_error(self, err: ApiError) -> Result<T, ApiError> {
        self.ok_or(err)
    }
}
