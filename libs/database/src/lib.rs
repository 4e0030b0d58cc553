//! Database connectors and connection utilities.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB client setup, ping-based health checks
//! - `config` - Load connection settings through `core_config::FromEnv`
//! - `all` - Everything above
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "main");
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let users = client.database(config.database()).collection::<Document>("users");
//! ```

// Always available modules
pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;
