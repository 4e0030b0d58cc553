use core_config::{AppInfo, FromEnv, app_info, env_flag, env_or_default, server::ServerConfig};

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Collection holding vendor and client records
pub const DEFAULT_COLLECTION: &str = "users";

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// `MONGODB_COLLECTION`
    pub collection: String,
    /// `MONGODB_ENSURE_INDEXES`: create the `2dsphere` index at startup
    pub ensure_indexes: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
            collection: env_or_default("MONGODB_COLLECTION", DEFAULT_COLLECTION),
            ensure_indexes: env_flag("MONGODB_ENSURE_INDEXES", false)?,
        })
    }
}
