//! In-memory notifier for tests.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{Notification, Notifier};

/// Records delivered notifications; optionally fails for chosen recipients.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    delivered: Mutex<Vec<Notification>>,
    failing: HashSet<String>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects every notification addressed to one of `recipients`.
    pub fn failing_for<I, S>(recipients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            delivered: Mutex::new(Vec::new()),
            failing: recipients.into_iter().map(Into::into).collect(),
        }
    }

    /// Delivered notifications, oldest first.
    pub fn delivered(&self) -> Vec<Notification> {
        self.delivered
            .lock()
            .map(|delivered| delivered.clone())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut delivered) = self.delivered.lock() {
            delivered.clear();
        }
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), DomainError> {
        if self.failing.contains(notification.recipient.as_str()) {
            return Err(DomainError::new(
                ErrorCode::NotificationFailed,
                format!("recipient {} unreachable", notification.recipient),
            ));
        }

        self.delivered
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "notifier lock poisoned"))?
            .push(notification.clone());
        Ok(())
    }
}
