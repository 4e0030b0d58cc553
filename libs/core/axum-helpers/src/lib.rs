//! # Axum Helpers
//!
//! Shared plumbing for the HTTP services in this workspace.
//!
//! - **[`server`]**: router assembly with OpenAPI docs, `/health`, graceful shutdown
//! - **[`http`]**: CORS and security header middleware
//! - **[`errors`]**: structured error responses with error codes
//! - **[`extractors`]**: query extraction with field-level validation errors

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router,
};

pub use http::{cors_layer_from_env, create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{FromQueryParams, ValidatedQuery};
