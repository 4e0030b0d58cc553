use mongodb::{Client, bson::doc};
use std::time::Instant;

/// Health check status for MongoDB
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    /// Driver error when unhealthy
    pub message: Option<String>,
    pub response_time_ms: u64,
}

/// Send `{ ping: 1 }` to the `admin` database.
///
/// `ping` needs no privileges, unlike `listDatabases`, so it works with
/// least-privilege users.
pub async fn ping(client: &Client) -> Result<(), mongodb::error::Error> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
}

/// Ping with timing and the error message on failure.
///
/// ```ignore
/// let status = check_health_detailed(&client).await;
/// if !status.healthy {
///     tracing::warn!(error = ?status.message, "MongoDB unhealthy");
/// }
/// ```
pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let start = Instant::now();
    let result = ping(client).await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(()) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
            response_time_ms,
        },
    }
}
