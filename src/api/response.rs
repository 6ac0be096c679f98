//! Response types for the salary benchmark API.
//!
//! This module defines the response bodies and the error handling for the
//! HTTP API.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::{BenchmarkError, ConstraintKind};
use crate::models::{ExperienceBand, JobTitle};

/// Body returned by a successful `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The logged-in user.
    pub username: String,
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexResponse {
    /// The logged-in user.
    pub username: String,
    /// Number of job titles.
    pub job_titles: i64,
    /// Number of experience bands.
    pub experience_bands: i64,
    /// Number of salary bands.
    pub salary_bands: i64,
}

/// Body of `GET /salary-bands/options`: the choices for the new band form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryBandOptions {
    /// Job titles ordered by title.
    pub job_titles: Vec<JobTitle>,
    /// Experience bands ordered by minimum years.
    pub experience_bands: Vec<ExperienceBand>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// The request carried no valid session cookie.
    pub fn unauthenticated() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: ApiError::new("UNAUTHENTICATED", "Please log in to continue."),
        }
    }

    /// The submitted username or password was wrong.
    pub fn invalid_credentials() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: ApiError::new("INVALID_CREDENTIALS", "Invalid username or password."),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        let error = match rejection {
            JsonRejection::JsonDataError(err) => ApiError::malformed_json(err.body_text()),
            JsonRejection::JsonSyntaxError(err) => {
                ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
            }
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
            }
            _ => ApiError::malformed_json("Failed to parse request body"),
        };
        ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl From<BenchmarkError> for ApiErrorResponse {
    fn from(error: BenchmarkError) -> Self {
        match error {
            BenchmarkError::Validation { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(message),
            },
            BenchmarkError::ConstraintViolation { kind, message } => {
                let summary = match kind {
                    ConstraintKind::ForeignKey => "Job title or experience band does not exist.",
                    ConstraintKind::Unique => "A record with this key already exists.",
                    ConstraintKind::NotNull | ConstraintKind::Check => {
                        "The record is missing required data."
                    }
                };
                ApiErrorResponse {
                    status: StatusCode::CONFLICT,
                    error: ApiError::with_details("CONSTRAINT_VIOLATION", summary, message),
                }
            }
            BenchmarkError::NotFound { entity, key } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("NOT_FOUND", format!("{} not found: {}", entity, key)),
            },
            BenchmarkError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            BenchmarkError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            BenchmarkError::SourceNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "SOURCE_ERROR",
                    "Seed source error",
                    format!("Seed source not found: {}", path),
                ),
            },
            BenchmarkError::SourceParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "SOURCE_ERROR",
                    "Seed source error",
                    format!("Failed to read {}: {}", path, message),
                ),
            },
            BenchmarkError::Database(err) => {
                error!(error = %err, "Database failure while handling request");
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::new("INTERNAL_ERROR", "Storage error"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_validation_maps_to_400() {
        let response: ApiErrorResponse =
            BenchmarkError::validation("Job title and experience band are required.").into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "VALIDATION_ERROR");
        assert_eq!(
            response.error.message,
            "Job title and experience band are required."
        );
    }

    #[test]
    fn test_foreign_key_maps_to_409() {
        let response: ApiErrorResponse = BenchmarkError::ConstraintViolation {
            kind: ConstraintKind::ForeignKey,
            message: "FOREIGN KEY constraint failed".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.error.code, "CONSTRAINT_VIOLATION");
        assert_eq!(
            response.error.details.as_deref(),
            Some("FOREIGN KEY constraint failed")
        );
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response: ApiErrorResponse = BenchmarkError::NotFound {
            entity: "salary band",
            key: "9".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error.message, "salary band not found: 9");
    }

    #[test]
    fn test_database_error_hides_details() {
        let response: ApiErrorResponse = BenchmarkError::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.error.details.is_none());
    }

    #[test]
    fn test_auth_errors_are_401() {
        assert_eq!(
            ApiErrorResponse::unauthenticated().status,
            StatusCode::UNAUTHORIZED
        );
        let invalid = ApiErrorResponse::invalid_credentials();
        assert_eq!(invalid.status, StatusCode::UNAUTHORIZED);
        assert_eq!(invalid.error.message, "Invalid username or password.");
    }
}
