//! Lifecycle commands accepted by `transition_order`.

use serde::{Deserialize, Serialize};

use super::OrderStatus;

/// A state-changing request against an existing order.
///
/// The caller is supplied alongside the command; for `Claim` the caller is
/// the fulfiller taking the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum LifecycleCommand {
    Approve,
    Decline { reason: String },
    Claim,
    Advance { target: OrderStatus },
    Archive,
}

impl LifecycleCommand {
    /// Short verb used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleCommand::Approve => "approve",
            LifecycleCommand::Decline { .. } => "decline",
            LifecycleCommand::Claim => "claim",
            LifecycleCommand::Advance { .. } => "advance",
            LifecycleCommand::Archive => "archive",
        }
    }
}
