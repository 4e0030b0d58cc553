use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Invalid query: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Client not found: {0}")]
    ClientNotFound(String),

    /// A stored record does not have the shape the API returns
    #[error("Record '{id}' cannot be mapped: {reason}")]
    Mapping { id: String, reason: String },

    #[error("Spatial store unavailable: {0}")]
    Upstream(String),
}

pub type LocationResult<T> = Result<T, LocationError>;

impl LocationError {
    pub fn mapping(id: impl Into<String>, reason: impl Into<String>) -> Self {
        LocationError::Mapping {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// Convert LocationError to AppError for standardized error responses
impl From<LocationError> for AppError {
    fn from(err: LocationError) -> Self {
        match err {
            LocationError::Validation(errors) => AppError::ValidationError(errors),
            LocationError::ClientNotFound(_) => AppError::NotFound("Client not found".to_string()),
            mapping @ LocationError::Mapping { .. } => AppError::Mapping(mapping.to_string()),
            LocationError::Upstream(msg) => AppError::ServiceUnavailable(msg),
        }
    }
}

impl IntoResponse for LocationError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for LocationError {
    fn from(err: mongodb::error::Error) -> Self {
        LocationError::Upstream(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_per_variant() {
        let cases = [
            (
                LocationError::Validation(ValidationErrors::new()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                LocationError::ClientNotFound("c1".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                LocationError::mapping("v9", "missing field `location`"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                LocationError::Upstream("server selection timeout".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_client_not_found_message_hides_id() {
        let app: AppError = LocationError::ClientNotFound("c1".into()).into();
        assert!(matches!(app, AppError::NotFound(ref msg) if msg == "Client not found"));
    }

    #[test]
    fn test_mapping_message_names_record() {
        let app: AppError = LocationError::mapping("v9", "missing field `firstName`").into();
        assert!(matches!(
            app,
            AppError::Mapping(ref msg) if msg == "Record 'v9' cannot be mapped: missing field `firstName`"
        ));
    }
}
