//! Query-string extractor with typed parsing and validation.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::ValidationErrors;

/// Conversion from raw query parameters into a validated value.
///
/// `Params` is what serde reads from the query string. Keep its fields as
/// `Option<String>` so that a missing or non-numeric value is reported per
/// field by [`FromQueryParams::from_params`] instead of failing the whole
/// decode with a single opaque message.
pub trait FromQueryParams: Sized {
    type Params: DeserializeOwned + Send;

    fn from_params(params: Self::Params) -> Result<Self, ValidationErrors>;
}

/// Extractor for validated query parameters.
///
/// Rejects with [`AppError::ValidationError`] (422, offending fields listed in
/// `details`) when conversion fails.
///
/// # Example
/// ```ignore
/// async fn nearest(ValidatedQuery(query): ValidatedQuery<NearestVendorsQuery>) -> String {
///     format!("{} within {}m", query.category, query.max_distance)
/// }
/// ```
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: FromQueryParams,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T::Params>::from_request_parts(parts, state).await?;
        let value = T::from_params(params)?;
        Ok(ValidatedQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;
    use serde::Deserialize;
    use validator::ValidationError;

    #[derive(Deserialize)]
    struct RadiusParams {
        radius: Option<String>,
    }

    #[derive(Debug, PartialEq)]
    struct Radius(u32);

    impl FromQueryParams for Radius {
        type Params = RadiusParams;

        fn from_params(params: RadiusParams) -> Result<Self, ValidationErrors> {
            params
                .radius
                .and_then(|raw| raw.parse().ok())
                .map(Radius)
                .ok_or_else(|| {
                    let mut errors = ValidationErrors::new();
                    errors.add("radius", ValidationError::new("number"));
                    errors
                })
        }
    }

    async fn extract(uri: &str) -> Result<Radius, AppError> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        ValidatedQuery::<Radius>::from_request_parts(&mut parts, &())
            .await
            .map(|ValidatedQuery(value)| value)
    }

    #[tokio::test]
    async fn test_extracts_valid_query() {
        assert_eq!(extract("/search?radius=250").await.unwrap(), Radius(250));
    }

    #[tokio::test]
    async fn test_rejects_invalid_query_with_422() {
        let err = extract("/search?radius=far").await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn test_rejects_missing_query_with_422() {
        let err = extract("/search").await.unwrap_err();
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
