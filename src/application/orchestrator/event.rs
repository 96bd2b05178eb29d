//! Inbound conversational events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ActorId, OrderId};
use crate::domain::order::OrderStatus;

/// One message or button press from one actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEvent {
    pub actor_id: ActorId,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl InboundEvent {
    pub fn new(actor_id: ActorId, kind: EventKind) -> Self {
        Self { actor_id, kind }
    }
}

/// What the actor did.
///
/// Session inputs go to the actor's live session; lifecycle buttons bypass
/// the session machine entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Greeting; drops any live session and shows the role menu.
    Start,
    NewOrder,
    Text { text: String },
    Cancel,
    Confirm,
    Reject,

    Approve { order_id: OrderId },
    /// Opens the decline-reason flow for an order.
    BeginDecline { order_id: OrderId },
    Claim { order_id: OrderId },
    Advance { order_id: OrderId, target: OrderStatus },
    Archive { order_id: OrderId },

    ListMine,
    ListPending,
    ListAvailable,
    ListActive,
    ListHistory,
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Start => "start",
            EventKind::NewOrder => "new_order",
            EventKind::Text { .. } => "text",
            EventKind::Cancel => "cancel",
            EventKind::Confirm => "confirm",
            EventKind::Reject => "reject",
            EventKind::Approve { .. } => "approve",
            EventKind::BeginDecline { .. } => "begin_decline",
            EventKind::Claim { .. } => "claim",
            EventKind::Advance { .. } => "advance",
            EventKind::Archive { .. } => "archive",
            EventKind::ListMine => "list_mine",
            EventKind::ListPending => "list_pending",
            EventKind::ListAvailable => "list_available",
            EventKind::ListActive => "list_active",
            EventKind::ListHistory => "list_history",
        }
    }
}
