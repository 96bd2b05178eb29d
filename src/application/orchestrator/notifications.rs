//! Who hears about a lifecycle change, and delivery to them.

use std::sync::Arc;

use futures::future::join_all;

use crate::domain::directory::Role;
use crate::domain::foundation::ActorId;
use crate::domain::order::{Order, OrderStatus};
use crate::ports::{ActorDirectory, Notification, NotificationKind, Notifier};

use super::render::notification_text;

/// A notification target before it is resolved to actor ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    Actor(ActorId),
    /// Every actor holding the role.
    Role(Role),
}

/// Recipients owed an update about the status `order` has just reached.
pub fn audience_for(order: &Order) -> Vec<(Audience, NotificationKind)> {
    let requester = || Audience::Actor(order.requester().clone());

    match order.status() {
        OrderStatus::PendingApproval => {
            vec![(Audience::Role(Role::Approver), NotificationKind::AwaitingApproval)]
        }
        OrderStatus::Approved => vec![
            (requester(), NotificationKind::Approved),
            (Audience::Role(Role::Fulfiller), NotificationKind::Available),
        ],
        OrderStatus::Declined => vec![(requester(), NotificationKind::Declined)],
        OrderStatus::Assigned => vec![(requester(), NotificationKind::Claimed)],
        OrderStatus::PickedUp | OrderStatus::InTransit => {
            vec![(requester(), NotificationKind::Progress)]
        }
        OrderStatus::Completed => vec![
            (requester(), NotificationKind::Completed),
            (Audience::Role(Role::Approver), NotificationKind::Completed),
        ],
        OrderStatus::Created | OrderStatus::Archived => Vec::new(),
    }
}

/// Best-effort delivery of lifecycle notifications.
///
/// Nothing here fails the caller: directory and delivery errors are logged
/// and the remaining recipients still get their message.
pub struct NotificationFanout {
    directory: Arc<dyn ActorDirectory>,
    notifier: Arc<dyn Notifier>,
}

impl NotificationFanout {
    pub fn new(directory: Arc<dyn ActorDirectory>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            directory,
            notifier,
        }
    }

    /// Notifies everyone owed an update about `order`, except `sender`.
    ///
    /// Returns how many notifications were delivered.
    pub async fn announce(&self, order: &Order, sender: &ActorId) -> usize {
        let notifications = self.resolve(order, sender).await;
        if notifications.is_empty() {
            return 0;
        }

        let results = join_all(notifications.iter().map(|n| self.notifier.notify(n))).await;

        let mut delivered = 0;
        for (notification, result) in notifications.iter().zip(results) {
            match result {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!(
                    order_id = %order.id(),
                    recipient = %notification.recipient,
                    kind = ?notification.kind,
                    error = %e,
                    "notification delivery failed"
                ),
            }
        }

        tracing::info!(
            order_id = %order.id(),
            status = %order.status(),
            delivered,
            attempted = notifications.len(),
            "notifications sent"
        );
        delivered
    }

    async fn resolve(&self, order: &Order, sender: &ActorId) -> Vec<Notification> {
        let mut notifications: Vec<Notification> = Vec::new();

        for (audience, kind) in audience_for(order) {
            let recipients = match audience {
                Audience::Actor(id) => vec![id],
                Audience::Role(role) => match self.directory.list(Some(role)).await {
                    Ok(actors) => actors.into_iter().map(|a| a.id).collect(),
                    Err(e) => {
                        tracing::warn!(
                            order_id = %order.id(),
                            role = %role,
                            error = %e,
                            "could not list notification recipients"
                        );
                        Vec::new()
                    }
                },
            };

            for recipient in recipients {
                if &recipient == sender
                    || notifications.iter().any(|n| n.recipient == recipient)
                {
                    continue;
                }
                let text = notification_text(kind, order);
                notifications.push(Notification::new(recipient, kind, order.id(), text));
            }
        }
        notifications
    }
}
