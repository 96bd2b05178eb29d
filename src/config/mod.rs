//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `LOGISTICS_DESK`
//! prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use logistics_desk::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod directory;
mod error;
mod notifier;
mod server;
mod storage;
mod timeouts;

pub use directory::DirectoryConfig;
pub use error::{ConfigError, ValidationError};
pub use notifier::NotifierConfig;
pub use server::{Environment, LogFormat, ServerConfig};
pub use storage::{StorageBackend, StorageConfig};
pub use timeouts::TimeoutConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields an in-memory
/// service on port 8080 that logs its notifications.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Order and actor storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Bounds for storage and notification calls
    #[serde(default)]
    pub timeouts: TimeoutConfig,

    /// Notification gateway
    #[serde(default)]
    pub notifier: NotifierConfig,

    /// Directory seeding
    #[serde(default)]
    pub directory: DirectoryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `LOGISTICS_DESK` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// - `LOGISTICS_DESK__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `LOGISTICS_DESK__STORAGE__BACKEND=postgres` -> `storage.backend`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("LOGISTICS_DESK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid value found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.storage.validate()?;
        self.timeouts.validate()?;
        self.notifier.validate(self.is_production())?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
