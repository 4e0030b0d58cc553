use axum::{Json, Router, extract::State, routing::get};
use core_config::AppInfo;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::errors::AppError;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// A boxed database probe result with a string error
pub type HealthCheckFuture = Pin<Box<dyn Future<Output = Result<(), String>> + Send>>;

type Probe = Arc<dyn Fn() -> HealthCheckFuture + Send + Sync>;

#[derive(Clone)]
struct HealthState {
    app: AppInfo,
    probe: Probe,
}

/// `GET /health`: 200 when the database probe succeeds, 503 otherwise.
async fn health_handler(State(state): State<HealthState>) -> Result<Json<HealthResponse>, AppError> {
    match (state.probe)().await {
        Ok(()) => Ok(Json(HealthResponse {
            status: "healthy",
            database: "connected",
            name: state.app.name,
            version: state.app.version,
        })),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            Err(AppError::ServiceUnavailable(format!(
                "Database connection failed: {}",
                e
            )))
        }
    }
}

/// Creates a router with the `/health` endpoint.
///
/// `probe` is called on every request; pass a closure pinging the database.
///
/// # Example
/// ```ignore
/// let client = mongo_client.clone();
/// let app = router.merge(health_router(app_info!(), move || {
///     let client = client.clone();
///     async move { database::mongodb::ping(&client).await.map_err(|e| e.to_string()) }
/// }));
/// ```
pub fn health_router<F, Fut>(app_info: AppInfo, probe: F) -> Router
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), String>> + Send + 'static,
{
    let probe: Probe = Arc::new(move || Box::pin(probe()) as HealthCheckFuture);

    Router::new()
        .route("/health", get(health_handler))
        .with_state(HealthState {
            app: app_info,
            probe,
        })
}
