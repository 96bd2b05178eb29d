//! Notifier port - outbound messages to actors.
//!
//! Delivery is best-effort. Callers log failures and move on; a failed
//! notification never undoes the lifecycle change that triggered it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ActorId, DomainError, OrderId};

/// Why an actor is being told something.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A new order awaits approval.
    AwaitingApproval,
    Approved,
    Declined,
    /// An approved order is open for claiming.
    Available,
    Claimed,
    /// A delivery step was taken.
    Progress,
    Completed,
}

/// One message for one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub recipient: ActorId,
    pub kind: NotificationKind,
    pub order_id: OrderId,
    pub text: String,
}

impl Notification {
    pub fn new(
        recipient: ActorId,
        kind: NotificationKind,
        order_id: OrderId,
        text: impl Into<String>,
    ) -> Self {
        Self {
            recipient,
            kind,
            order_id,
            text: text.into(),
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one notification.
    ///
    /// # Errors
    ///
    /// - `NotificationFailed` or `Timeout` when the channel rejects or stalls
    async fn notify(&self, notification: &Notification) -> Result<(), DomainError>;
}
