//! Notifier that only logs.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::ports::{Notification, Notifier};

/// Used when no delivery gateway is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNotifier;

impl LoggingNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), DomainError> {
        tracing::info!(
            target: "notifications",
            recipient = %notification.recipient,
            kind = ?notification.kind,
            order_id = %notification.order_id,
            text = %notification.text,
            "notification"
        );
        Ok(())
    }
}
