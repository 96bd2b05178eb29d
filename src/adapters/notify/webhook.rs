//! Webhook Notifier - delivers notifications to a messaging gateway.
//!
//! Each notification is POSTed as JSON to the configured URL. A bearer token
//! is attached when one is configured. The gateway owns the actual chat
//! delivery; a non-2xx answer counts as a failed notification.
//!
//! ```ignore
//! let config = WebhookConfig::new("https://gateway.internal/notify")
//!     .with_token(SecretString::new(token))
//!     .with_timeout(Duration::from_secs(5));
//! let notifier = WebhookNotifier::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{Notification, Notifier};

/// Gateway endpoint and credentials.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub url: String,
    token: Option<SecretString>,
    pub timeout: Duration,
}

impl WebhookConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: None,
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct WebhookNotifier {
    config: WebhookConfig,
    client: Client,
}

impl WebhookNotifier {
    /// # Errors
    ///
    /// - `InternalError` if the HTTP client cannot be built
    pub fn new(config: WebhookConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("failed to build webhook client: {}", e),
                )
            })?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), DomainError> {
        let mut request = self.client.post(&self.config.url).json(notification);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            let code = if e.is_timeout() {
                ErrorCode::Timeout
            } else {
                ErrorCode::NotificationFailed
            };
            DomainError::new(code, format!("webhook request failed: {}", e))
                .with_detail("recipient", notification.recipient.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::new(
                ErrorCode::NotificationFailed,
                format!("gateway answered {}", status),
            )
            .with_detail("recipient", notification.recipient.to_string()));
        }

        tracing::debug!(
            recipient = %notification.recipient,
            kind = ?notification.kind,
            "notification delivered"
        );
        Ok(())
    }
}
