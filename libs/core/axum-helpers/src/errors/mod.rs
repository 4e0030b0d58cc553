pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error response structure.
///
/// Every error leaving the API has this shape:
///
/// ```json
/// {
///   "code": 1001,
///   "error": "VALIDATION_ERROR",
///   "message": "Request validation failed",
///   "details": { "fields": ["lat"], "errors": { "lat": [ ... ] } }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details (e.g., validation field errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Query extraction error: {0}")]
    QueryExtractorRejection(#[from] QueryRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Mapping error: {0}")]
    Mapping(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// HTTP status this error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::QueryExtractorRejection(_) | AppError::ValidationError(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Mapping(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Error code reported in the response body.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::QueryExtractorRejection(_) => ErrorCode::InvalidQuery,
            AppError::ValidationError(_) => ErrorCode::ValidationError,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Mapping(_) => ErrorCode::MappingError,
            AppError::ServiceUnavailable(_) => ErrorCode::ServiceUnavailable,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.error_code();

        let (message, details) = match self {
            AppError::QueryExtractorRejection(e) => {
                tracing::info!(error_code = code.code(), "Query extraction error: {}", e);
                (e.body_text(), None)
            }
            AppError::ValidationError(e) => {
                tracing::info!(error_code = code.code(), "Validation error: {}", e);
                (
                    code.default_message().to_string(),
                    Some(validation_details(&e)),
                )
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = code.code(), "Not found: {}", msg);
                (msg, None)
            }
            AppError::Mapping(msg) => {
                tracing::error!(error_code = code.code(), "Mapping error: {}", msg);
                (msg, None)
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(error_code = code.code(), "Service unavailable: {}", msg);
                (msg, None)
            }
        };

        let body = Json(ErrorResponse {
            code: code.code(),
            error: code.as_str().to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Machine-readable form of validation failures.
///
/// `fields` lists every offending field (sorted), `errors` carries the
/// individual failures per field.
pub fn validation_details(errors: &ValidationErrors) -> Value {
    let mut fields: Vec<String> = Vec::new();
    let mut per_field = serde_json::Map::new();

    for (field, field_errors) in errors.field_errors() {
        let entries: Vec<Value> = field_errors
            .iter()
            .map(|err| {
                json!({
                    "code": err.code,
                    "message": err.message,
                    "params": err.params,
                })
            })
            .collect();
        fields.push(field.to_string());
        per_field.insert(field.to_string(), Value::Array(entries));
    }

    fields.sort();

    json!({
        "fields": fields,
        "errors": Value::Object(per_field),
    })
}

/// Build an error response without going through [`AppError`].
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    let body = Json(ErrorResponse {
        code: error_code.code(),
        error: error_code.as_str().to_string(),
        message,
        details: None,
    });

    (status, body).into_response()
}
