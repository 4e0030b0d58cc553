//! Type-safe error codes for API responses.
//!
//! Each code carries a client-facing identifier (`"VALIDATION_ERROR"`), an
//! integer for logs and dashboards (`1001`) and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Request validation failed");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// A query or path parameter is missing, malformed or out of range
    ValidationError,

    /// The query string could not be decoded at all
    InvalidQuery,

    /// Requested resource was not found
    NotFound,

    /// No route matches the request method
    MethodNotAllowed,

    // Server errors
    /// A dependency (database) is unreachable or failing
    ServiceUnavailable,

    // Data errors (2000-2999)
    /// A stored document does not match the expected shape
    MappingError,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier for programmatic handling by clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::MappingError => "MAPPING_ERROR",
        }
    }

    /// Integer code for structured logs and metrics.
    ///
    /// - 1000-1999: client and generic server errors
    /// - 2000-2999: stored data errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidQuery => 1003,
            Self::NotFound => 1004,
            Self::ServiceUnavailable => 1011,
            Self::MethodNotAllowed => 1012,

            Self::MappingError => 2010,
        }
    }

    /// Default human-readable message. Handlers may override it.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidQuery => "Query string could not be parsed",
            Self::NotFound => "Resource not found",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::MappingError => "Stored record does not match the expected shape",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
