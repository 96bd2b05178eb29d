//! TransitionOrderHandler - Command handler for lifecycle transitions.
//!
//! Each attempt loads the order, applies the command to the aggregate and
//! writes it back with a version check. When the write loses a race the
//! order is re-read and the command re-applied against the winner's state,
//! so a losing claim surfaces as `AlreadyClaimed` and a losing approve or
//! decline as `InvalidTransition`.

use std::sync::Arc;

use crate::domain::directory::Actor;
use crate::domain::foundation::{
    ActorId, CommandMetadata, EventEnvelope, EventId, OrderId, SerializableDomainEvent, Timestamp,
};
use crate::domain::order::{
    LifecycleCommand, Order, OrderAdvanced, OrderApproved, OrderArchived, OrderClaimed,
    OrderDeclined, OrderError, OrderStatus,
};
use crate::ports::{ActorDirectory, EventPublisher, OrderRepository};

/// Version conflicts tolerated before giving up on a contended order.
const MAX_CONFLICT_ATTEMPTS: usize = 16;

/// Command to move an order through its lifecycle.
#[derive(Debug, Clone)]
pub struct TransitionOrderCommand {
    pub order_id: OrderId,
    pub caller_id: ActorId,
    pub command: LifecycleCommand,
}

/// Result of a successful transition.
#[derive(Debug, Clone)]
pub struct TransitionOrderResult {
    pub order: Order,
    pub previous_status: OrderStatus,
    pub caller: Actor,
}

/// Handler for lifecycle transitions.
pub struct TransitionOrderHandler {
    directory: Arc<dyn ActorDirectory>,
    repository: Arc<dyn OrderRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl TransitionOrderHandler {
    pub fn new(
        directory: Arc<dyn ActorDirectory>,
        repository: Arc<dyn OrderRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            directory,
            repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: TransitionOrderCommand,
        metadata: CommandMetadata,
    ) -> Result<TransitionOrderResult, OrderError> {
        let caller = self
            .directory
            .resolve(&cmd.caller_id)
            .await?
            .ok_or_else(|| OrderError::actor_not_found(&cmd.caller_id))?;

        for attempt in 1..=MAX_CONFLICT_ATTEMPTS {
            let mut order = self
                .repository
                .find_by_id(cmd.order_id)
                .await?
                .ok_or_else(|| OrderError::order_not_found(cmd.order_id))?;

            let previous_status = order.status();
            let expected_version = order.version();

            if let Err(e) = order.apply(&caller, &cmd.command) {
                tracing::warn!(
                    order_id = %cmd.order_id,
                    caller = %caller.id,
                    command = cmd.command.name(),
                    code = %e.code(),
                    "lifecycle command rejected"
                );
                return Err(e);
            }

            if self
                .repository
                .save_if_version(&order, expected_version)
                .await?
            {
                tracing::info!(
                    order_id = %order.id(),
                    caller = %caller.id,
                    from = %previous_status,
                    to = %order.status(),
                    "order transitioned"
                );
                self.publish(&order, previous_status, &caller, &cmd.command, &metadata)
                    .await;
                return Ok(TransitionOrderResult {
                    order,
                    previous_status,
                    caller,
                });
            }

            tracing::debug!(
                order_id = %cmd.order_id,
                attempt,
                "version conflict, re-reading order"
            );
        }

        Err(OrderError::transport(format!(
            "order {} is too contended, try again",
            cmd.order_id
        )))
    }

    async fn publish(
        &self,
        order: &Order,
        previous_status: OrderStatus,
        caller: &Actor,
        command: &LifecycleCommand,
        metadata: &CommandMetadata,
    ) {
        let envelope = lifecycle_envelope(order, previous_status, caller, command)
            .with_correlation_id(metadata.correlation_id())
            .with_actor_id(metadata.actor_id.to_string());

        if let Err(e) = self.event_publisher.publish(envelope).await {
            tracing::warn!(order_id = %order.id(), error = %e, "failed to publish lifecycle event");
        }
    }
}

fn lifecycle_envelope(
    order: &Order,
    previous_status: OrderStatus,
    caller: &Actor,
    command: &LifecycleCommand,
) -> EventEnvelope {
    let now = Timestamp::now();
    match command {
        LifecycleCommand::Approve => OrderApproved {
            event_id: EventId::new(),
            order_id: order.id(),
            approver: caller.id.clone(),
            requester: order.requester().clone(),
            approved_at: now,
        }
        .to_envelope(),
        LifecycleCommand::Decline { .. } => OrderDeclined {
            event_id: EventId::new(),
            order_id: order.id(),
            approver: caller.id.clone(),
            requester: order.requester().clone(),
            reason: order.decline_reason().unwrap_or_default().to_string(),
            declined_at: now,
        }
        .to_envelope(),
        LifecycleCommand::Claim => OrderClaimed {
            event_id: EventId::new(),
            order_id: order.id(),
            fulfiller: caller.id.clone(),
            requester: order.requester().clone(),
            claimed_at: now,
        }
        .to_envelope(),
        LifecycleCommand::Advance { .. } => OrderAdvanced {
            event_id: EventId::new(),
            order_id: order.id(),
            fulfiller: caller.id.clone(),
            from: previous_status,
            to: order.status(),
            advanced_at: now,
        }
        .to_envelope(),
        LifecycleCommand::Archive => OrderArchived {
            event_id: EventId::new(),
            order_id: order.id(),
            approver: caller.id.clone(),
            archived_from: previous_status,
            archived_at: now,
        }
        .to_envelope(),
    }
}
