//! API routes module

pub mod health;
pub mod locations;

use axum::Router;

use crate::state::AppState;

/// Create all API routes. They are mounted at the root by `create_router`.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(locations::router(state))
        .merge(health::router(state))
}
