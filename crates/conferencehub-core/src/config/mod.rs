//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field carries a serde default, so an empty configuration
//! yields a runnable in-memory server with all fan-out channels disabled.

pub mod app;
pub mod auth;
pub mod data;
pub mod logging;
pub mod messaging;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::app::ServerConfig;
pub use self::auth::AuthConfig;
pub use self::data::DataConfig;
pub use self::logging::LoggingConfig;
pub use self::messaging::{
    DispatchConfig, EventHubConfig, KeyVaultConfig, MessagingConfig, ServiceBusConfig,
    ThumbnailQueueConfig,
};
pub use self::storage::SlideStorageConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Seed data settings.
    #[serde(default)]
    pub data: DataConfig,
    /// Organizer route gating.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Slide storage settings.
    #[serde(default)]
    pub storage: SlideStorageConfig,
    /// Downstream fan-out channels.
    #[serde(default)]
    pub messaging: MessagingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default`, the environment-specific overlay
    /// `config/{env}`, and environment variables prefixed with
    /// `CONFERENCEHUB__` (e.g. `CONFERENCEHUB__SERVER__PORT=9000`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config", env)
    }

    /// Same as [`AppConfig::load`] but reading from an explicit directory.
    pub fn load_from(dir: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CONFERENCEHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
