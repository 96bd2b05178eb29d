//! Order lifecycle events.
//!
//! Published after a transition has been durably stored:
//! - `OrderSubmitted` - New order awaiting approval
//! - `OrderApproved` - Order released to fulfillers
//! - `OrderDeclined` - Order rejected with a reason
//! - `OrderClaimed` - Fulfiller assigned
//! - `OrderAdvanced` - Delivery moved forward
//! - `OrderArchived` - Order closed

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, ActorId, EventId, OrderId, Timestamp};

use super::{Order, OrderStatus};

// ════════════════════════════════════════════════════════════════════════════
// OrderSubmitted
// ════════════════════════════════════════════════════════════════════════════

/// Published when a requester submits a new order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSubmitted {
    pub event_id: EventId,
    pub order_id: OrderId,
    pub requester: ActorId,
    pub cargo_name: String,
    pub submitted_at: Timestamp,
}

domain_event! {
    OrderSubmitted: "order.submitted.v1",
    aggregate: Order(order_id),
    occurred_at: submitted_at,
}

impl OrderSubmitted {
    pub fn from_order(order: &Order) -> Self {
        Self {
            event_id: EventId::new(),
            order_id: order.id(),
            requester: order.requester().clone(),
            cargo_name: order.payload().cargo.name.clone(),
            submitted_at: *order.created_at(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// OrderApproved
// ════════════════════════════════════════════════════════════════════════════

/// Published when an approver accepts a pending order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderApproved {
    pub event_id: EventId,
    pub order_id: OrderId,
    pub approver: ActorId,
    pub requester: ActorId,
    pub approved_at: Timestamp,
}

domain_event! {
    OrderApproved: "order.approved.v1",
    aggregate: Order(order_id),
    occurred_at: approved_at,
}

// ════════════════════════════════════════════════════════════════════════════
// OrderDeclined
// ════════════════════════════════════════════════════════════════════════════

/// Published when an approver rejects a pending order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDeclined {
    pub event_id: EventId,
    pub order_id: OrderId,
    pub approver: ActorId,
    pub requester: ActorId,
    pub reason: String,
    pub declined_at: Timestamp,
}

domain_event! {
    OrderDeclined: "order.declined.v1",
    aggregate: Order(order_id),
    occurred_at: declined_at,
}

// ════════════════════════════════════════════════════════════════════════════
// OrderClaimed
// ════════════════════════════════════════════════════════════════════════════

/// Published when a fulfiller wins the claim on an approved order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderClaimed {
    pub event_id: EventId,
    pub order_id: OrderId,
    pub fulfiller: ActorId,
    pub requester: ActorId,
    pub claimed_at: Timestamp,
}

domain_event! {
    OrderClaimed: "order.claimed.v1",
    aggregate: Order(order_id),
    occurred_at: claimed_at,
}

// ════════════════════════════════════════════════════════════════════════════
// OrderAdvanced
// ════════════════════════════════════════════════════════════════════════════

/// Published on each delivery step taken by the assigned fulfiller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAdvanced {
    pub event_id: EventId,
    pub order_id: OrderId,
    pub fulfiller: ActorId,
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub advanced_at: Timestamp,
}

domain_event! {
    OrderAdvanced: "order.advanced.v1",
    aggregate: Order(order_id),
    occurred_at: advanced_at,
}

// ════════════════════════════════════════════════════════════════════════════
// OrderArchived
// ════════════════════════════════════════════════════════════════════════════

/// Published when an approver closes a declined or completed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderArchived {
    pub event_id: EventId,
    pub order_id: OrderId,
    pub approver: ActorId,
    pub archived_from: OrderStatus,
    pub archived_at: Timestamp,
}

domain_event! {
    OrderArchived: "order.archived.v1",
    aggregate: Order(order_id),
    occurred_at: archived_at,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainEvent, SerializableDomainEvent};
    use crate::domain::order::aggregate::fixtures::pending_order;

    #[test]
    fn submitted_event_describes_the_order() {
        let order = pending_order();
        let event = OrderSubmitted::from_order(&order);
        assert_eq!(event.aggregate_id(), order.id().to_string());
        assert_eq!(event.cargo_name, "Pallet of tiles");
    }

    #[test]
    fn claimed_envelope_carries_version_and_payload() {
        let event = OrderClaimed {
            event_id: EventId::new(),
            order_id: OrderId::new(),
            fulfiller: ActorId::new("f-1").unwrap(),
            requester: ActorId::new("req-1").unwrap(),
            claimed_at: Timestamp::now(),
        };
        let envelope = event.to_envelope();
        assert_eq!(envelope.event_type, "order.claimed.v1");
        assert_eq!(envelope.schema_version, 1);
        assert_eq!(envelope.aggregate_type, "Order");
        assert_eq!(envelope.payload["fulfiller"], "f-1");
    }

    #[test]
    fn advanced_payload_round_trips_statuses() {
        let event = OrderAdvanced {
            event_id: EventId::new(),
            order_id: OrderId::new(),
            fulfiller: ActorId::new("f-1").unwrap(),
            from: OrderStatus::Assigned,
            to: OrderStatus::PickedUp,
            advanced_at: Timestamp::now(),
        };
        let decoded: OrderAdvanced = serde_json::from_value(event.to_envelope().payload).unwrap();
        assert_eq!(decoded.to, OrderStatus::PickedUp);
    }
}
