use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// A single field-level validation failure, reported back to the client
/// as `{path, message}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Validation failures: either a single cross-field message (e.g. the
/// "either clientId or projectId" rule) or a list of per-field errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidationErrors {
    Message(String),
    Fields(Vec<FieldError>),
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationErrors::Message(msg) => write!(f, "{}", msg),
            ValidationErrors::Fields(fields) => {
                let parts: Vec<String> = fields
                    .iter()
                    .map(|e| format!("{}: {}", e.path, e.message))
                    .collect();
                write!(f, "{}", parts.join(", "))
            }
        }
    }
}

/// The custom error type for the application.
#[derive(Debug, Error)]
pub enum Error {
    /// An error originating from the sqlx library.
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A validation error with field-level details.
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// A not found error. Covers both genuinely missing rows and rows
    /// owned by another user, which must be indistinguishable.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A conflict error (resource already exists).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A failed login. The message never reveals which factor was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A missing, malformed, or expired identity token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// An internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// A validation error carrying a single top-level message.
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(ValidationErrors::Message(message.into()))
    }

    /// A validation error for a single named field.
    pub fn field(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation(ValidationErrors::Fields(vec![FieldError::new(path, message)]))
    }
}

/// A type alias for `Result<T, Error>` to simplify function signatures.
pub type Result<T> = std::result::Result<T, Error>;

/// Convert custom Error to HTTP response
///
/// Each variant maps to an appropriate HTTP status code and a JSON body
/// with a `message` field matching the wire format clients expect.
/// Internal detail (database errors, configuration failures) is logged
/// and never echoed to the caller.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Error::Validation(ValidationErrors::Message(msg)) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "message": msg }),
            ),
            Error::Validation(ValidationErrors::Fields(errors)) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "message": "Validation error",
                    "errors": errors,
                }),
            ),
            Error::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                serde_json::json!({ "message": msg }),
            ),
            Error::Conflict(msg) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "message": msg }),
            ),
            Error::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                serde_json::json!({ "message": "Invalid credentials" }),
            ),
            Error::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                serde_json::json!({ "message": msg }),
            ),
            Error::Sqlx(e) => {
                tracing::error!(error = %e, "database error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "message": "Internal Server Error" }),
                )
            }
            Error::Config(e) => {
                tracing::error!(error = %e, "configuration error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "message": "Internal Server Error" }),
                )
            }
            Error::Internal(msg) => {
                tracing::error!(error = %msg, "internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "message": "Internal Server Error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_fields_map_to_400() {
        let error = Error::field("email", "Invalid email address");
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = Error::NotFound("Client not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn conflict_maps_to_400() {
        let response =
            Error::Conflict("User with this email already exists".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_credentials_maps_to_401() {
        let response = Error::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let response =
            Error::Unauthorized("Missing Authorization header".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn internal_detail_is_suppressed() {
        let response = Error::Internal("connection pool exhausted".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
