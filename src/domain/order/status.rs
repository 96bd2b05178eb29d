//! OrderStatus state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Lifecycle status of a delivery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Transient; advanced to `PendingApproval` during submission.
    Created,
    PendingApproval,
    Approved,
    Declined,
    Assigned,
    PickedUp,
    InTransit,
    Completed,
    /// Retention marker for closed orders.
    Archived,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 9] = [
        OrderStatus::Created,
        OrderStatus::PendingApproval,
        OrderStatus::Approved,
        OrderStatus::Declined,
        OrderStatus::Assigned,
        OrderStatus::PickedUp,
        OrderStatus::InTransit,
        OrderStatus::Completed,
        OrderStatus::Archived,
    ];

    /// Statuses in which a fulfiller is carrying the order.
    pub const ACTIVE_DELIVERY: [OrderStatus; 3] = [
        OrderStatus::Assigned,
        OrderStatus::PickedUp,
        OrderStatus::InTransit,
    ];

    /// Returns true when a fulfiller must be assigned.
    pub fn requires_fulfiller(&self) -> bool {
        matches!(
            self,
            OrderStatus::Assigned
                | OrderStatus::PickedUp
                | OrderStatus::InTransit
                | OrderStatus::Completed
        )
    }

    /// Returns true for targets reachable through `advance`.
    pub fn is_advance_target(&self) -> bool {
        matches!(
            self,
            OrderStatus::PickedUp | OrderStatus::InTransit | OrderStatus::Completed
        )
    }

    /// Returns the stable storage name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::PendingApproval => "pending_approval",
            OrderStatus::Approved => "approved",
            OrderStatus::Declined => "declined",
            OrderStatus::Assigned => "assigned",
            OrderStatus::PickedUp => "picked_up",
            OrderStatus::InTransit => "in_transit",
            OrderStatus::Completed => "completed",
            OrderStatus::Archived => "archived",
        }
    }
}

impl StateMachine for OrderStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        use OrderStatus::*;
        match self {
            Created => vec![PendingApproval],
            PendingApproval => vec![Approved, Declined],
            Approved => vec![Assigned],
            Assigned => vec![PickedUp],
            PickedUp => vec![InTransit],
            InTransit => vec![Completed],
            Declined => vec![Archived],
            Completed => vec![Archived],
            Archived => vec![],
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| {
                ValidationError::invalid_format("status", format!("unknown status '{}'", s))
            })
    }
}
