use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

/// Variable holding comma-separated allowed origins
pub const CORS_ALLOWED_ORIGIN: &str = "CORS_ALLOWED_ORIGIN";

/// CORS layer for a read-only API: GET and preflight only, no credentials.
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Build the CORS layer from `CORS_ALLOWED_ORIGIN`.
///
/// Returns `Ok(None)` when the variable is unset (same-origin and native
/// clients only) and an error when it is set but empty or unparsable.
///
/// Example: `CORS_ALLOWED_ORIGIN=http://localhost:3000,https://app.example.com`
pub fn cors_layer_from_env() -> io::Result<Option<CorsLayer>> {
    let Ok(origins_str) = std::env::var(CORS_ALLOWED_ORIGIN) else {
        return Ok(None);
    };

    let allowed_origins = parse_origins(&origins_str)?;
    info!(origins = %origins_str, "CORS configured");

    Ok(Some(create_cors_layer(allowed_origins)))
}

fn parse_origins(origins_str: &str) -> io::Result<Vec<HeaderValue>> {
    let allowed_origins: Vec<HeaderValue> = origins_str
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(HeaderValue::from_str)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid {} value: {}", CORS_ALLOWED_ORIGIN, e),
            )
        })?;

    if allowed_origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} cannot be empty", CORS_ALLOWED_ORIGIN),
        ));
    }

    Ok(allowed_origins)
}
