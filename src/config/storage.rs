//! Storage configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Which order/actor store backs the service.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// PostgreSQL connection URL (postgres backend only)
    #[serde(default)]
    pub url: String,

    /// Minimum connections to maintain
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Maximum connections allowed
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
}

impl StorageConfig {
    /// Get acquire timeout as Duration
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == StorageBackend::Memory {
            return Ok(());
        }
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__URL"));
        }
        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > 100 {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            url: String::new(),
            min_connections: default_min_connections(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
        }
    }
}

fn default_min_connections() -> u32 {
    2
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postgres(url: &str) -> StorageConfig {
        StorageConfig {
            backend: StorageBackend::Postgres,
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn memory_backend_needs_no_url() {
        assert!(StorageConfig::default().validate().is_ok());
    }

    #[test]
    fn postgres_backend_requires_url() {
        assert_eq!(
            postgres("").validate(),
            Err(ValidationError::MissingRequired("STORAGE__URL"))
        );
        assert_eq!(
            postgres("mysql://localhost/db").validate(),
            Err(ValidationError::InvalidDatabaseUrl)
        );
        assert!(postgres("postgres://localhost/desk").validate().is_ok());
    }

    #[test]
    fn pool_bounds_are_checked() {
        let config = StorageConfig {
            min_connections: 20,
            max_connections: 5,
            ..postgres("postgres://localhost/desk")
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidPoolSize));
    }

    #[test]
    fn acquire_timeout_is_in_seconds() {
        assert_eq!(
            StorageConfig::default().acquire_timeout(),
            Duration::from_secs(5)
        );
    }
}
