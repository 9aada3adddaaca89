//! Client-facing error taxonomy.
//!
//! Every variant is a caller mistake and maps to `400 Bad Request` with a
//! `{"detail": "..."}` body whose text is the variant's `Display` output.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// Errors surfaced by the HTTP handlers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Identifier not present in the timezone database
    #[error("Unknown timezone: {timezone}")]
    UnknownTimezone {
        /// The identifier exactly as the caller sent it
        timezone: String,
    },
    /// Datetime string could not be parsed
    #[error("Invalid datetime format")]
    InvalidDatetime,
    /// A required request field was absent
    #[error("Missing field: {field}")]
    MissingField {
        /// Name of the first missing field
        field: &'static str,
    },
    /// Request body was not a usable JSON object
    #[error("Invalid request body")]
    InvalidBody,
}

impl ApiError {
    /// Convenience constructor for [`ApiError::UnknownTimezone`]
    pub fn unknown_timezone(timezone: &str) -> Self {
        ApiError::UnknownTimezone {
            timezone: timezone.to_string(),
        }
    }

    /// HTTP status for this error. All variants are client errors.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "detail": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}

/// Result alias used by the timezone service and handlers
pub type ApiResult<T> = Result<T, ApiError>;
