//! Order aggregate.
//!
//! All status changes go through the methods below, which enforce the
//! role gate, the state machine and the fulfiller/decline-reason pairing.
//! Atomicity across concurrent callers is provided by the repository's
//! version check, not by the aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::directory::{Actor, Role};
use crate::domain::foundation::{ActorId, OrderId, StateMachine, Timestamp};
use crate::domain::validation::required_text;

use super::{LifecycleCommand, OrderError, OrderPayload, OrderStatus};

/// A delivery order.
///
/// # Invariants
///
/// - `fulfiller` is set iff status is assigned, picked_up, in_transit or completed
/// - `decline_reason` is set iff status is declined
/// - archived orders keep whatever the state before archiving carried
/// - `version` increases by one on every successful mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    requester: ActorId,
    fulfiller: Option<ActorId>,
    status: OrderStatus,
    payload: OrderPayload,
    decline_reason: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
    version: u64,
}

impl Order {
    /// Submits a new order on behalf of a requester.
    ///
    /// The order passes through `created` and is returned in `pending_approval`.
    ///
    /// # Errors
    ///
    /// - `Authorization` if the caller is not a requester
    /// - `Validation` if the payload breaks a field constraint
    pub fn submit(requester: &Actor, payload: OrderPayload) -> Result<Self, OrderError> {
        if !requester.has_role(Role::Requester) {
            return Err(OrderError::unauthorized(
                &requester.id,
                requester.role,
                "submit",
                "only requesters create orders",
            ));
        }
        payload.validate()?;

        let now = Timestamp::now();
        let mut order = Self {
            id: OrderId::new(),
            requester: requester.id.clone(),
            fulfiller: None,
            status: OrderStatus::Created,
            payload,
            decline_reason: None,
            created_at: now,
            updated_at: now,
            version: 0,
        };
        order.move_to(OrderStatus::PendingApproval, "submit")?;
        Ok(order)
    }

    /// Reconstitute an order from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: OrderId,
        requester: ActorId,
        fulfiller: Option<ActorId>,
        status: OrderStatus,
        payload: OrderPayload,
        decline_reason: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
        version: u64,
    ) -> Self {
        Self {
            id,
            requester,
            fulfiller,
            status,
            payload,
            decline_reason,
            created_at,
            updated_at,
            version,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn requester(&self) -> &ActorId {
        &self.requester
    }

    pub fn fulfiller(&self) -> Option<&ActorId> {
        self.fulfiller.as_ref()
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn payload(&self) -> &OrderPayload {
        &self.payload
    }

    pub fn decline_reason(&self) -> Option<&str> {
        self.decline_reason.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Optimistic concurrency token, compared by the repository on save.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns true if the given actor carries this order.
    pub fn is_fulfilled_by(&self, actor: &ActorId) -> bool {
        self.fulfiller.as_ref() == Some(actor)
    }

    /// Checks the fulfiller and decline-reason pairing against the status.
    pub fn invariants_hold(&self) -> bool {
        if self.status == OrderStatus::Archived {
            return true;
        }
        let fulfiller_ok = self.fulfiller.is_some() == self.status.requires_fulfiller();
        let reason_ok = self.decline_reason.is_some() == (self.status == OrderStatus::Declined);
        fulfiller_ok && reason_ok
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies a lifecycle command on behalf of `caller`.
    pub fn apply(&mut self, caller: &Actor, command: &LifecycleCommand) -> Result<(), OrderError> {
        match command {
            LifecycleCommand::Approve => self.approve(caller),
            LifecycleCommand::Decline { reason } => self.decline(caller, reason),
            LifecycleCommand::Claim => self.claim(caller),
            LifecycleCommand::Advance { target } => self.advance(caller, *target),
            LifecycleCommand::Archive => self.archive(caller),
        }
    }

    /// Approves a pending order.
    ///
    /// # Errors
    ///
    /// - `Authorization` if the caller is not an approver
    /// - `InvalidTransition` unless the order is pending approval
    pub fn approve(&mut self, approver: &Actor) -> Result<(), OrderError> {
        Self::require_role(approver, Role::Approver, "approve")?;
        self.move_to(OrderStatus::Approved, "approve")
    }

    /// Declines a pending order with a mandatory reason.
    ///
    /// The reason is validated before anything else is touched.
    pub fn decline(&mut self, approver: &Actor, reason: &str) -> Result<(), OrderError> {
        Self::require_role(approver, Role::Approver, "decline")?;
        let reason = required_text("reason", reason)?;
        self.move_to(OrderStatus::Declined, "decline")?;
        self.decline_reason = Some(reason);
        Ok(())
    }

    /// Assigns an approved, unassigned order to the calling fulfiller.
    ///
    /// # Errors
    ///
    /// - `Authorization` if the caller is not a fulfiller
    /// - `AlreadyClaimed` if any fulfiller is already assigned
    /// - `InvalidTransition` if the order is not approved
    pub fn claim(&mut self, fulfiller: &Actor) -> Result<(), OrderError> {
        Self::require_role(fulfiller, Role::Fulfiller, "claim")?;
        if self.fulfiller.is_some() {
            return Err(OrderError::AlreadyClaimed(self.id));
        }
        self.move_to(OrderStatus::Assigned, "claim")?;
        self.fulfiller = Some(fulfiller.id.clone());
        Ok(())
    }

    /// Moves the delivery one step forward.
    ///
    /// # Errors
    ///
    /// - `Authorization` if the caller is not this order's fulfiller
    /// - `InvalidTransition` if `target` is not the next delivery step
    pub fn advance(&mut self, fulfiller: &Actor, target: OrderStatus) -> Result<(), OrderError> {
        Self::require_role(fulfiller, Role::Fulfiller, "advance")?;
        if !self.is_fulfilled_by(&fulfiller.id) {
            return Err(OrderError::unauthorized(
                &fulfiller.id,
                fulfiller.role,
                "advance",
                "only the assigned fulfiller moves this order",
            ));
        }
        if !target.is_advance_target() {
            return Err(OrderError::invalid_transition(self.id, self.status, "advance"));
        }
        self.move_to(target, "advance")
    }

    /// Closes a declined or completed order.
    pub fn archive(&mut self, approver: &Actor) -> Result<(), OrderError> {
        Self::require_role(approver, Role::Approver, "archive")?;
        self.move_to(OrderStatus::Archived, "archive")
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn require_role(actor: &Actor, role: Role, action: &'static str) -> Result<(), OrderError> {
        if actor.has_role(role) {
            Ok(())
        } else {
            Err(OrderError::unauthorized(
                &actor.id,
                actor.role,
                action,
                format!("requires the {} role", role),
            ))
        }
    }

    fn move_to(&mut self, target: OrderStatus, action: &'static str) -> Result<(), OrderError> {
        let next = self
            .status
            .transition_to(target)
            .map_err(|_| OrderError::invalid_transition(self.id, self.status, action))?;
        self.status = next;
        self.updated_at = Timestamp::now();
        self.version += 1;
        Ok(())
    }
}
