use axum::Router;
use domain_locations::{LocationService, MongoLocationRepository, handlers};

use crate::state::AppState;

fn repository(state: &AppState) -> MongoLocationRepository {
    MongoLocationRepository::with_collection(state.db.clone(), &state.config.collection)
}

pub fn router(state: &AppState) -> Router {
    handlers::router(LocationService::new(repository(state)))
}

/// Create the `2dsphere` index on the vendor collection
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    repository(state).ensure_indexes().await?;
    Ok(())
}
