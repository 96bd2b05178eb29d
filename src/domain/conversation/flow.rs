//! Flow kinds and their step tables.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::OrderId;

use super::Field;

/// Steps of the order-creation flow, in prompt order.
pub const CREATE_ORDER_STEPS: [Field; 12] = [
    Field::CargoName,
    Field::Weight,
    Field::Count,
    Field::Size,
    Field::Documents,
    Field::PickupContact,
    Field::PickupAddress,
    Field::DeliveryAddress,
    Field::DeliveryContact,
    Field::PaymentRequired,
    Field::Deadline,
    Field::Note,
];

/// The decline-reason flow collects a single field.
pub const DECLINE_REASON_STEPS: [Field; 1] = [Field::DeclineReason];

/// Which fixed step sequence a session follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlowKind {
    CreateOrder,
    /// The target order travels as metadata, not as a collected field.
    DeclineReason { order_id: OrderId },
}

impl FlowKind {
    pub fn steps(&self) -> &'static [Field] {
        match self {
            FlowKind::CreateOrder => &CREATE_ORDER_STEPS,
            FlowKind::DeclineReason { .. } => &DECLINE_REASON_STEPS,
        }
    }

    /// Whether the flow stops at `confirming` after its last step.
    pub fn requires_confirmation(&self) -> bool {
        matches!(self, FlowKind::CreateOrder)
    }

    pub fn name(&self) -> &'static str {
        match self {
            FlowKind::CreateOrder => "create_order",
            FlowKind::DeclineReason { .. } => "decline_reason",
        }
    }
}
