//! Custom extractors for Axum handlers.

pub mod validated_query;

pub use validated_query::{FromQueryParams, ValidatedQuery};
