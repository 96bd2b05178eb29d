//! Port call timeouts

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_CALL_TIMEOUT_MS: u64 = 60_000;

/// Upper bounds for storage and notification calls.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_storage_ms")]
    pub storage_ms: u64,

    #[serde(default = "default_notification_ms")]
    pub notification_ms: u64,
}

impl TimeoutConfig {
    pub fn storage(&self) -> Duration {
        Duration::from_millis(self.storage_ms)
    }

    pub fn notification(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=MAX_CALL_TIMEOUT_MS).contains(&self.storage_ms) {
            return Err(ValidationError::InvalidCallTimeout("storage"));
        }
        if !(1..=MAX_CALL_TIMEOUT_MS).contains(&self.notification_ms) {
            return Err(ValidationError::InvalidCallTimeout("notification"));
        }
        Ok(())
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            storage_ms: default_storage_ms(),
            notification_ms: default_notification_ms(),
        }
    }
}

fn default_storage_ms() -> u64 {
    3_000
}

fn default_notification_ms() -> u64 {
    5_000
}
