//! Notification text.

use crate::domain::foundation::OrderId;
use crate::domain::order::Order;
use crate::ports::NotificationKind;

pub fn notification_text(kind: NotificationKind, order: &Order) -> String {
    let reference = short_reference(order.id());
    let cargo = &order.payload().cargo.name;

    match kind {
        NotificationKind::AwaitingApproval => {
            format!("New order {reference} ({cargo}) is waiting for approval.")
        }
        NotificationKind::Approved => format!("Your order {reference} ({cargo}) was approved."),
        NotificationKind::Declined => format!(
            "Your order {reference} ({cargo}) was declined: {}",
            order.decline_reason().unwrap_or("no reason given")
        ),
        NotificationKind::Available => format!(
            "Order {reference} ({cargo}) is available, deliver by {}.",
            order.payload().deadline.format("%Y-%m-%d %H:%M")
        ),
        NotificationKind::Claimed => {
            format!("Your order {reference} ({cargo}) was taken by a courier.")
        }
        NotificationKind::Progress => {
            format!("Order {reference} ({cargo}) is now {}.", order.status())
        }
        NotificationKind::Completed => format!("Order {reference} ({cargo}) was delivered."),
    }
}

fn short_reference(id: OrderId) -> String {
    id.to_string().chars().take(8).collect()
}
