use axum_helpers::server::{create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.redacted_url());

    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;

    let db = mongo_client.database(config.mongodb.database());

    info!(
        database = config.mongodb.database(),
        collection = %config.collection,
        "Successfully connected to MongoDB"
    );

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    if state.config.ensure_indexes {
        api::locations::init_indexes(&state).await?;
    }

    let api_routes = api::routes(&state);
    let app = create_router::<openapi::ApiDoc>(api_routes, &state.config.server)?;

    info!("Starting Vendor Locator API (30s shutdown timeout)");

    let client = state.mongo_client.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            client.shutdown().await;
            info!("MongoDB connection closed successfully");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Vendor Locator API shutdown complete");
    Ok(())
}
