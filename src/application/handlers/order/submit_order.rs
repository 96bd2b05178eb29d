//! SubmitOrderHandler - Command handler for new orders.

use std::sync::Arc;

use crate::domain::foundation::{ActorId, CommandMetadata, SerializableDomainEvent};
use crate::domain::order::{Order, OrderError, OrderPayload, OrderSubmitted};
use crate::ports::{ActorDirectory, EventPublisher, OrderRepository};

/// Command to submit a new order.
#[derive(Debug, Clone)]
pub struct SubmitOrderCommand {
    pub requester_id: ActorId,
    pub payload: OrderPayload,
}

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmitOrderResult {
    pub order: Order,
    pub event: OrderSubmitted,
}

/// Handler for submitting orders.
pub struct SubmitOrderHandler {
    directory: Arc<dyn ActorDirectory>,
    repository: Arc<dyn OrderRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl SubmitOrderHandler {
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
        cmd: SubmitOrderCommand,
        metadata: CommandMetadata,
    ) -> Result<SubmitOrderResult, OrderError> {
        // 1. Resolve the caller
        let requester = self
            .directory
            .resolve(&cmd.requester_id)
            .await?
            .ok_or_else(|| OrderError::actor_not_found(&cmd.requester_id))?;

        // 2. Create in pending_approval (role gate + payload check)
        let order = Order::submit(&requester, cmd.payload)?;

        // 3. Persist
        self.repository.insert(&order).await?;

        tracing::info!(
            order_id = %order.id(),
            requester = %requester.id,
            "order submitted"
        );

        // 4. Publish event; the order is already durable
        let event = OrderSubmitted::from_order(&order);
        let envelope = event
            .to_envelope()
            .with_correlation_id(metadata.correlation_id())
            .with_actor_id(metadata.actor_id.to_string());

        if let Err(e) = self.event_publisher.publish(envelope).await {
            tracing::warn!(order_id = %order.id(), error = %e, "failed to publish order.submitted");
        }

        Ok(SubmitOrderResult { order, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{InMemoryActorDirectory, InMemoryOrderRepository};
    use crate::domain::directory::Role;
    use crate::domain::foundation::{DomainError, ErrorCode, OrderId};
    use crate::domain::order::test_support::{actor, sample_payload};
    use crate::domain::order::OrderStatus;
    use async_trait::async_trait;

    struct UnavailableRepository;

    #[async_trait]
    impl OrderRepository for UnavailableRepository {
        async fn insert(&self, _order: &Order) -> Result<(), DomainError> {
            Err(DomainError::storage("connection refused"))
        }

        async fn find_by_id(&self, _id: OrderId) -> Result<Option<Order>, DomainError> {
            Err(DomainError::storage("connection refused"))
        }

        async fn save_if_version(&self, _order: &Order, _v: u64) -> Result<bool, DomainError> {
            Err(DomainError::storage("connection refused"))
        }

        async fn list_by_status(
            &self,
            _status: Option<OrderStatus>,
        ) -> Result<Vec<Order>, DomainError> {
            Err(DomainError::storage("connection refused"))
        }

        async fn list_for_requester(&self, _id: &ActorId) -> Result<Vec<Order>, DomainError> {
            Err(DomainError::storage("connection refused"))
        }

        async fn list_for_fulfiller(
            &self,
            _id: &ActorId,
            _statuses: &[OrderStatus],
        ) -> Result<Vec<Order>, DomainError> {
            Err(DomainError::storage("connection refused"))
        }
    }

    fn directory() -> Arc<InMemoryActorDirectory> {
        Arc::new(InMemoryActorDirectory::with_actors([
            actor("req-1", Role::Requester),
            actor("appr-1", Role::Approver),
        ]))
    }

    fn command(requester: &str) -> SubmitOrderCommand {
        SubmitOrderCommand {
            requester_id: ActorId::new(requester).unwrap(),
            payload: sample_payload(),
        }
    }

    fn metadata(actor_id: &str) -> CommandMetadata {
        CommandMetadata::new(ActorId::new(actor_id).unwrap()).with_correlation_id("corr-1")
    }

    #[tokio::test]
    async fn submits_pending_order_and_publishes_event() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let handler = SubmitOrderHandler::new(directory(), repo.clone(), bus.clone());

        let result = handler
            .handle(command("req-1"), metadata("req-1"))
            .await
            .unwrap();

        assert_eq!(result.order.status(), OrderStatus::PendingApproval);
        assert!(repo.find_by_id(result.order.id()).await.unwrap().is_some());

        let events = bus.events_of_type("order.submitted.v1");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].metadata.correlation_id.as_deref(), Some("corr-1"));
        assert_eq!(events[0].metadata.actor_id.as_deref(), Some("req-1"));
    }

    #[tokio::test]
    async fn approver_cannot_submit() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let handler =
            SubmitOrderHandler::new(directory(), repo.clone(), Arc::new(InMemoryEventBus::new()));

        let err = handler
            .handle(command("appr-1"), metadata("appr-1"))
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::Authorization { .. }));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn unknown_requester_is_not_found() {
        let handler = SubmitOrderHandler::new(
            directory(),
            Arc::new(InMemoryOrderRepository::new()),
            Arc::new(InMemoryEventBus::new()),
        );

        let err = handler
            .handle(command("ghost"), metadata("ghost"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ActorNotFound);
    }

    #[tokio::test]
    async fn storage_failure_is_retryable_transport_error() {
        let bus = Arc::new(InMemoryEventBus::new());
        let handler =
            SubmitOrderHandler::new(directory(), Arc::new(UnavailableRepository), bus.clone());

        let err = handler
            .handle(command("req-1"), metadata("req-1"))
            .await
            .unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(bus.event_count(), 0);
    }
}
