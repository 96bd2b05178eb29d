//! Notification gateway configuration

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;

/// Where notifications go. Without a webhook URL they are only logged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotifierConfig {
    pub webhook_url: Option<String>,

    /// Bearer token for the gateway
    pub token: Option<SecretString>,
}

impl NotifierConfig {
    pub fn is_webhook_enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        let Some(url) = &self.webhook_url else {
            return Ok(());
        };
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ValidationError::InvalidWebhookUrl);
        }
        if production && !url.starts_with("https://") {
            return Err(ValidationError::WebhookMustBeHttps);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_url(url: &str) -> NotifierConfig {
        NotifierConfig {
            webhook_url: Some(url.to_string()),
            token: None,
        }
    }

    #[test]
    fn no_webhook_is_valid() {
        let config = NotifierConfig::default();
        assert!(!config.is_webhook_enabled());
        assert!(config.validate(true).is_ok());
    }

    #[test]
    fn plain_http_only_outside_production() {
        let config = with_url("http://gateway:8081/notify");
        assert!(config.validate(false).is_ok());
        assert_eq!(
            config.validate(true),
            Err(ValidationError::WebhookMustBeHttps)
        );
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        assert_eq!(
            with_url("ftp://gateway").validate(false),
            Err(ValidationError::InvalidWebhookUrl)
        );
    }
}
