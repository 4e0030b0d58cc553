//! Health check endpoint

use axum::Router;
use axum_helpers::health_router;

use crate::state::AppState;

/// `/health`, answering 503 while MongoDB does not respond to `ping`
pub fn router(state: &AppState) -> Router {
    let client = state.mongo_client.clone();

    health_router(state.config.app, move || {
        let client = client.clone();
        async move {
            let status = database::mongodb::check_health_detailed(&client).await;
            tracing::debug!(
                healthy = status.healthy,
                response_time_ms = status.response_time_ms,
                "MongoDB ping"
            );
            if status.healthy {
                Ok(())
            } else {
                Err(status.message.unwrap_or_else(|| "ping failed".to_string()))
            }
        }
    })
}
