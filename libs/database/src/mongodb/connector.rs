use mongodb::{Client, options::ClientOptions};
use std::time::Duration;
use tracing::info;

use super::MongoConfig;
use super::health::ping;
use crate::common::{RetryConfig, retry, retry_with_backoff};

/// Error type for MongoDB connection setup
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Connect to `url` with default pool settings and verify the server answers `ping`.
///
/// ```ignore
/// let client = database::mongodb::connect("mongodb://localhost:27017").await?;
/// ```
pub async fn connect(url: &str) -> Result<Client, MongoError> {
    connect_from_config(&MongoConfig::new(url)).await
}

/// Connect using a MongoConfig.
///
/// The driver connects lazily, so a `ping` is issued before returning to
/// surface bad URLs and unreachable servers at startup.
pub async fn connect_from_config(config: &MongoConfig) -> Result<Client, MongoError> {
    info!(url = %config.redacted_url(), "Attempting to connect to MongoDB");

    let mut options = ClientOptions::parse(config.url.as_str()).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)?;

    ping(&client)
        .await
        .map_err(|e| MongoError::ConnectionFailed(e.to_string()))?;

    info!("Successfully connected to MongoDB");
    Ok(client)
}

/// [`connect_from_config`] with exponential backoff.
///
/// `None` uses [`RetryConfig::default`].
///
/// ```ignore
/// let config = MongoConfig::from_env()?;
/// let retry = RetryConfig::new().with_max_retries(5);
/// let client = connect_from_config_with_retry(&config, Some(retry)).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: &MongoConfig,
    retry_config: Option<RetryConfig>,
) -> Result<Client, MongoError> {
    match retry_config {
        Some(policy) => retry_with_backoff(|| connect_from_config(config), policy).await,
        None => retry(|| connect_from_config(config)).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_rejects_malformed_url() {
        let result = connect("not-a-mongodb-url").await;
        assert!(matches!(result, Err(MongoError::Mongo(_))));
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_connect() {
        let mongo_url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        assert!(connect(&mongo_url).await.is_ok());
    }
}
