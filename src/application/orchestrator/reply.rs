//! Replies returned to the actor who sent an event.

use serde::Serialize;

use crate::domain::conversation::{Field, FieldMap};
use crate::domain::directory::Role;
use crate::domain::foundation::RejectionKind;
use crate::domain::order::Order;

/// Entries of a role's main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuOption {
    NewOrder,
    MyOrders,
    PendingOrders,
    AvailableOrders,
    ActiveOrders,
    History,
}

pub fn menu_for(role: Role) -> Vec<MenuOption> {
    match role {
        Role::Requester => vec![MenuOption::NewOrder, MenuOption::MyOrders],
        Role::Approver => vec![MenuOption::PendingOrders],
        Role::Fulfiller => vec![
            MenuOption::AvailableOrders,
            MenuOption::ActiveOrders,
            MenuOption::History,
        ],
    }
}

/// Structured answer to one inbound event. Rendering is up to the channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum Reply {
    Menu {
        role: Role,
        options: Vec<MenuOption>,
    },
    /// The sender is not in the directory.
    NotRegistered,
    /// Ask for the next field.
    Prompt { field: Field },
    /// Ask for the same field again.
    Retry {
        field: Field,
        kind: RejectionKind,
        reason: String,
    },
    /// Everything collected; show it back and wait for confirm or reject.
    ConfirmDraft { fields: FieldMap },
    Cancelled,
    Discarded,
    Submitted { order: Order },
    Updated { order: Order },
    Orders { orders: Vec<Order> },
}

impl Reply {
    /// The order a lifecycle reply carries.
    pub fn order(&self) -> Option<&Order> {
        match self {
            Reply::Submitted { order } | Reply::Updated { order } => Some(order),
            _ => None,
        }
    }

    pub fn into_orders(self) -> Option<Vec<Order>> {
        match self {
            Reply::Orders { orders } => Some(orders),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_has_a_menu() {
        for role in [Role::Requester, Role::Approver, Role::Fulfiller] {
            assert!(!menu_for(role).is_empty());
        }
    }

    #[test]
    fn reply_is_tagged() {
        let json = serde_json::to_value(Reply::Prompt {
            field: Field::Weight,
        })
        .unwrap();
        assert_eq!(json["reply"], "prompt");
        assert_eq!(json["field"], "weight");
    }
}
