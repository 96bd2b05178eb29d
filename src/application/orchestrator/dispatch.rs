//! Orchestrator - routes inbound events to sessions and lifecycle commands.

use std::future::Future;
use std::sync::Arc;

use crate::application::handlers::{
    ActorOrdersView, ListActorOrdersHandler, ListActorOrdersQuery, ListOrdersHandler,
    ListOrdersQuery, SubmitOrderCommand, SubmitOrderHandler, TransitionOrderCommand,
    TransitionOrderHandler,
};
use crate::application::SessionEngine;
use crate::domain::conversation::{CompletedFlow, FlowKind, SessionInput, StepOutcome};
use crate::domain::directory::{Actor, Role};
use crate::domain::foundation::{ActorId, CommandMetadata, OrderId};
use crate::domain::order::{LifecycleCommand, OrderError, OrderStatus};
use crate::ports::{ActorDirectory, EventPublisher, Notifier, OrderRepository};

use super::locks::KeyedLocks;
use super::notifications::NotificationFanout;
use super::reply::menu_for;
use super::{EventKind, InboundEvent, OrchestratorError, Reply};

/// Bridges actor events to the session engine and the lifecycle handlers.
///
/// Events from one actor are handled strictly in arrival order; the actor's
/// lock is held for the whole event, submission and notification included.
pub struct Orchestrator {
    directory: Arc<dyn ActorDirectory>,
    sessions: Arc<SessionEngine>,
    submit_order: SubmitOrderHandler,
    transition_order: TransitionOrderHandler,
    list_orders: ListOrdersHandler,
    list_actor_orders: ListActorOrdersHandler,
    fanout: NotificationFanout,
    actor_locks: KeyedLocks<ActorId>,
}

impl Orchestrator {
    pub fn new(
        directory: Arc<dyn ActorDirectory>,
        repository: Arc<dyn OrderRepository>,
        notifier: Arc<dyn Notifier>,
        event_publisher: Arc<dyn EventPublisher>,
        sessions: Arc<SessionEngine>,
    ) -> Self {
        Self {
            submit_order: SubmitOrderHandler::new(
                directory.clone(),
                repository.clone(),
                event_publisher.clone(),
            ),
            transition_order: TransitionOrderHandler::new(
                directory.clone(),
                repository.clone(),
                event_publisher,
            ),
            list_orders: ListOrdersHandler::new(repository.clone()),
            list_actor_orders: ListActorOrdersHandler::new(directory.clone(), repository),
            fanout: NotificationFanout::new(directory.clone(), notifier),
            directory,
            sessions,
            actor_locks: KeyedLocks::new(),
        }
    }

    /// Handles one inbound event and returns the reply for its sender.
    ///
    /// # Errors
    ///
    /// - `Order(..)` when a lifecycle command or query fails
    /// - `Session(..)` when a session input has no session or does not fit
    pub async fn handle(&self, event: InboundEvent) -> Result<Reply, OrchestratorError> {
        let lookup = read_retrying("directory.resolve", || async {
            self.directory
                .resolve(&event.actor_id)
                .await
                .map_err(OrderError::from)
        })
        .await?;

        let Some(actor) = lookup else {
            tracing::info!(actor = %event.actor_id, "event from unregistered actor");
            return Ok(Reply::NotRegistered);
        };

        // Only registered actors get a lock entry.
        let _turn = self.actor_locks.lock(&actor.id).await;

        tracing::debug!(actor = %actor.id, role = %actor.role, event = event.kind.name(), "handling event");

        let reply = match event.kind {
            EventKind::Start => {
                self.sessions.discard(&actor.id).await;
                Reply::Menu {
                    role: actor.role,
                    options: menu_for(actor.role),
                }
            }
            EventKind::Text { text } => {
                self.session_input(&actor, SessionInput::Text(text)).await?
            }
            EventKind::Cancel => self.session_input(&actor, SessionInput::Cancel).await?,
            EventKind::Confirm => self.session_input(&actor, SessionInput::Confirm).await?,
            EventKind::Reject => self.session_input(&actor, SessionInput::Reject).await?,
            EventKind::NewOrder => {
                require_role(&actor, Role::Requester, "create orders")?;
                self.start_flow(&actor, FlowKind::CreateOrder).await
            }
            EventKind::BeginDecline { order_id } => {
                require_role(&actor, Role::Approver, "decline orders")?;
                self.start_flow(&actor, FlowKind::DeclineReason { order_id })
                    .await
            }
            EventKind::Approve { order_id } => {
                self.transition(&actor, order_id, LifecycleCommand::Approve)
                    .await?
            }
            EventKind::Claim { order_id } => {
                self.transition(&actor, order_id, LifecycleCommand::Claim)
                    .await?
            }
            EventKind::Advance { order_id, target } => {
                self.transition(&actor, order_id, LifecycleCommand::Advance { target })
                    .await?
            }
            EventKind::Archive { order_id } => {
                self.transition(&actor, order_id, LifecycleCommand::Archive)
                    .await?
            }
            EventKind::ListMine => self.actor_listing(&actor, ActorOrdersView::Requested).await?,
            EventKind::ListActive => self.actor_listing(&actor, ActorOrdersView::Active).await?,
            EventKind::ListHistory => self.actor_listing(&actor, ActorOrdersView::History).await?,
            EventKind::ListPending => {
                self.status_listing(OrderStatus::PendingApproval).await?
            }
            EventKind::ListAvailable => self.status_listing(OrderStatus::Approved).await?,
        };
        Ok(reply)
    }

    async fn start_flow(&self, actor: &Actor, flow: FlowKind) -> Reply {
        match self.sessions.start(&actor.id, flow).await {
            Some(field) => Reply::Prompt { field },
            None => Reply::Menu {
                role: actor.role,
                options: menu_for(actor.role),
            },
        }
    }

    async fn session_input(
        &self,
        actor: &Actor,
        input: SessionInput,
    ) -> Result<Reply, OrchestratorError> {
        let outcome = self.sessions.input(&actor.id, input).await?;

        let reply = match outcome {
            StepOutcome::Advanced { next } => Reply::Prompt { field: next },
            StepOutcome::Rejected { field, error } => Reply::Retry {
                field,
                kind: error.kind(),
                reason: error.to_string(),
            },
            StepOutcome::AwaitingConfirmation { fields } => Reply::ConfirmDraft { fields },
            StepOutcome::Cancelled => Reply::Cancelled,
            StepOutcome::Discarded => Reply::Discarded,
            StepOutcome::Completed(CompletedFlow::OrderDraft(payload)) => {
                let result = self
                    .submit_order
                    .handle(
                        SubmitOrderCommand {
                            requester_id: actor.id.clone(),
                            payload,
                        },
                        chat_metadata(actor),
                    )
                    .await?;
                self.fanout.announce(&result.order, &actor.id).await;
                Reply::Submitted {
                    order: result.order,
                }
            }
            StepOutcome::Completed(CompletedFlow::DeclineReason { order_id, reason }) => {
                self.transition(actor, order_id, LifecycleCommand::Decline { reason })
                    .await?
            }
        };
        Ok(reply)
    }

    /// Lifecycle commands are never retried here; a transport failure goes
    /// back to the actor, who re-issues the command.
    async fn transition(
        &self,
        actor: &Actor,
        order_id: OrderId,
        command: LifecycleCommand,
    ) -> Result<Reply, OrchestratorError> {
        let result = self
            .transition_order
            .handle(
                TransitionOrderCommand {
                    order_id,
                    caller_id: actor.id.clone(),
                    command,
                },
                chat_metadata(actor),
            )
            .await?;

        self.fanout.announce(&result.order, &actor.id).await;
        Ok(Reply::Updated {
            order: result.order,
        })
    }

    async fn status_listing(&self, status: OrderStatus) -> Result<Reply, OrchestratorError> {
        let orders = read_retrying("orders.list_by_status", || {
            self.list_orders.handle(ListOrdersQuery {
                status: Some(status),
            })
        })
        .await?;
        Ok(Reply::Orders { orders })
    }

    async fn actor_listing(
        &self,
        actor: &Actor,
        view: ActorOrdersView,
    ) -> Result<Reply, OrchestratorError> {
        let orders = read_retrying("orders.list_for_actor", || {
            self.list_actor_orders.handle(ListActorOrdersQuery {
                actor_id: actor.id.clone(),
                view,
            })
        })
        .await?;
        Ok(Reply::Orders { orders })
    }
}

fn chat_metadata(actor: &Actor) -> CommandMetadata {
    CommandMetadata::new(actor.id.clone()).with_source("chat")
}

fn require_role(actor: &Actor, role: Role, action: &'static str) -> Result<(), OrderError> {
    if actor.has_role(role) {
        Ok(())
    } else {
        Err(OrderError::unauthorized(
            &actor.id,
            actor.role,
            action,
            format!("only a {} may {}", role, action),
        ))
    }
}

/// Runs an idempotent read, retrying once on a transport failure.
async fn read_retrying<T, F, Fut>(operation: &'static str, read: F) -> Result<T, OrderError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, OrderError>>,
{
    match read().await {
        Err(e) if e.is_retryable() => {
            tracing::warn!(operation, error = %e, "read failed, retrying once");
            read().await
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{InMemoryActorDirectory, InMemoryOrderRepository};
    use crate::adapters::notify::RecordingNotifier;
    use crate::domain::conversation::test_support::CREATE_ORDER_ANSWERS;
    use crate::domain::conversation::Field;
    use crate::domain::foundation::{DomainError, ErrorCode};
    use crate::domain::order::test_support::{actor, approved_order, pending_order};
    use crate::domain::order::Order;
    use crate::ports::NotificationKind;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Harness {
        orchestrator: Orchestrator,
        repository: Arc<InMemoryOrderRepository>,
        notifier: Arc<RecordingNotifier>,
    }

    fn harness() -> Harness {
        let directory = Arc::new(InMemoryActorDirectory::with_actors([
            actor("req-1", Role::Requester),
            actor("appr-1", Role::Approver),
            actor("f-1", Role::Fulfiller),
            actor("f-2", Role::Fulfiller),
        ]));
        let repository = Arc::new(InMemoryOrderRepository::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let orchestrator = Orchestrator::new(
            directory,
            repository.clone(),
            notifier.clone(),
            Arc::new(InMemoryEventBus::new()),
            Arc::new(SessionEngine::new()),
        );
        Harness {
            orchestrator,
            repository,
            notifier,
        }
    }

    fn event(actor_id: &str, kind: EventKind) -> InboundEvent {
        InboundEvent::new(ActorId::new(actor_id).unwrap(), kind)
    }

    fn text(actor_id: &str, value: &str) -> InboundEvent {
        event(
            actor_id,
            EventKind::Text {
                text: value.to_string(),
            },
        )
    }

    async fn seed(repository: &InMemoryOrderRepository, order: &Order) {
        repository.insert(order).await.unwrap();
    }

    #[tokio::test]
    async fn start_shows_role_menu() {
        let h = harness();
        let reply = h
            .orchestrator
            .handle(event("f-1", EventKind::Start))
            .await
            .unwrap();
        assert_eq!(
            reply,
            Reply::Menu {
                role: Role::Fulfiller,
                options: menu_for(Role::Fulfiller),
            }
        );
    }

    #[tokio::test]
    async fn unknown_sender_is_not_registered() {
        let h = harness();
        let reply = h
            .orchestrator
            .handle(event("stranger", EventKind::Start))
            .await
            .unwrap();
        assert_eq!(reply, Reply::NotRegistered);
    }

    #[tokio::test]
    async fn full_conversation_submits_and_notifies_approvers() {
        let h = harness();
        let reply = h
            .orchestrator
            .handle(event("req-1", EventKind::NewOrder))
            .await
            .unwrap();
        assert_eq!(
            reply,
            Reply::Prompt {
                field: Field::CargoName
            }
        );

        for answer in CREATE_ORDER_ANSWERS {
            h.orchestrator.handle(text("req-1", answer)).await.unwrap();
        }
        let reply = h
            .orchestrator
            .handle(event("req-1", EventKind::Confirm))
            .await
            .unwrap();

        let order = reply.order().unwrap().clone();
        assert_eq!(order.status(), OrderStatus::PendingApproval);
        assert_eq!(order.payload().cargo.weight, 12);
        assert_eq!(h.repository.len().await, 1);

        let delivered = h.notifier.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].recipient.as_str(), "appr-1");
        assert_eq!(delivered[0].kind, NotificationKind::AwaitingApproval);
    }

    #[tokio::test]
    async fn invalid_answer_asks_again() {
        let h = harness();
        h.orchestrator
            .handle(event("req-1", EventKind::NewOrder))
            .await
            .unwrap();
        h.orchestrator.handle(text("req-1", "Tiles")).await.unwrap();

        let reply = h.orchestrator.handle(text("req-1", "-5")).await.unwrap();

        assert!(matches!(
            reply,
            Reply::Retry {
                field: Field::Weight,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn reject_at_confirmation_submits_nothing() {
        let h = harness();
        h.orchestrator
            .handle(event("req-1", EventKind::NewOrder))
            .await
            .unwrap();
        for answer in CREATE_ORDER_ANSWERS {
            h.orchestrator.handle(text("req-1", answer)).await.unwrap();
        }

        let reply = h
            .orchestrator
            .handle(event("req-1", EventKind::Reject))
            .await
            .unwrap();

        assert_eq!(reply, Reply::Discarded);
        assert!(h.repository.is_empty().await);
    }

    #[tokio::test]
    async fn fulfiller_cannot_start_an_order() {
        let h = harness();
        let err = h
            .orchestrator
            .handle(event("f-1", EventKind::NewOrder))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn text_without_session_is_a_session_error() {
        let h = harness();
        let err = h
            .orchestrator
            .handle(text("req-1", "hello"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::SessionNotFound);
    }

    #[tokio::test]
    async fn decline_flow_stores_reason_and_tells_requester() {
        let h = harness();
        let order = pending_order();
        seed(&h.repository, &order).await;

        let reply = h
            .orchestrator
            .handle(event(
                "appr-1",
                EventKind::BeginDecline {
                    order_id: order.id(),
                },
            ))
            .await
            .unwrap();
        assert_eq!(
            reply,
            Reply::Prompt {
                field: Field::DeclineReason
            }
        );

        let reply = h
            .orchestrator
            .handle(text("appr-1", "No trucks this week"))
            .await
            .unwrap();

        let declined = reply.order().unwrap();
        assert_eq!(declined.status(), OrderStatus::Declined);
        assert_eq!(declined.decline_reason(), Some("No trucks this week"));
        let delivered = h.notifier.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].kind, NotificationKind::Declined);
    }

    #[tokio::test]
    async fn blank_decline_reason_is_re_asked() {
        let h = harness();
        let order = pending_order();
        seed(&h.repository, &order).await;
        h.orchestrator
            .handle(event(
                "appr-1",
                EventKind::BeginDecline {
                    order_id: order.id(),
                },
            ))
            .await
            .unwrap();

        let reply = h.orchestrator.handle(text("appr-1", "   ")).await.unwrap();

        assert!(matches!(
            reply,
            Reply::Retry {
                field: Field::DeclineReason,
                ..
            }
        ));
        let stored = h.repository.find_by_id(order.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), OrderStatus::PendingApproval);
    }

    #[tokio::test]
    async fn second_claim_is_too_late() {
        let h = harness();
        let order = approved_order();
        seed(&h.repository, &order).await;

        h.orchestrator
            .handle(event(
                "f-1",
                EventKind::Claim {
                    order_id: order.id(),
                },
            ))
            .await
            .unwrap();
        let err = h
            .orchestrator
            .handle(event(
                "f-2",
                EventKind::Claim {
                    order_id: order.id(),
                },
            ))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::AlreadyClaimed);
    }

    #[tokio::test]
    async fn approver_lists_pending_orders() {
        let h = harness();
        seed(&h.repository, &pending_order()).await;
        seed(&h.repository, &approved_order()).await;

        let reply = h
            .orchestrator
            .handle(event("appr-1", EventKind::ListPending))
            .await
            .unwrap();

        let orders = reply.into_orders().unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].status(), OrderStatus::PendingApproval);
    }

    /// Fails the first `failures` listings, then delegates.
    struct FlakyRepository {
        inner: InMemoryOrderRepository,
        failures: AtomicUsize,
    }

    #[async_trait]
    impl OrderRepository for FlakyRepository {
        async fn insert(&self, order: &Order) -> Result<(), DomainError> {
            self.inner.insert(order).await
        }

        async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
            self.inner.find_by_id(id).await
        }

        async fn save_if_version(&self, order: &Order, expected: u64) -> Result<bool, DomainError> {
            self.inner.save_if_version(order, expected).await
        }

        async fn list_by_status(
            &self,
            status: Option<OrderStatus>,
        ) -> Result<Vec<Order>, DomainError> {
            let remaining = self.failures.load(Ordering::SeqCst);
            if remaining > 0 {
                self.failures.store(remaining - 1, Ordering::SeqCst);
                return Err(DomainError::new(ErrorCode::Timeout, "slow storage"));
            }
            self.inner.list_by_status(status).await
        }

        async fn list_for_requester(&self, requester: &ActorId) -> Result<Vec<Order>, DomainError> {
            self.inner.list_for_requester(requester).await
        }

        async fn list_for_fulfiller(
            &self,
            fulfiller: &ActorId,
            statuses: &[OrderStatus],
        ) -> Result<Vec<Order>, DomainError> {
            self.inner.list_for_fulfiller(fulfiller, statuses).await
        }
    }

    fn flaky_orchestrator(failures: usize) -> Orchestrator {
        let directory = Arc::new(InMemoryActorDirectory::with_actors([actor(
            "f-1",
            Role::Fulfiller,
        )]));
        Orchestrator::new(
            directory,
            Arc::new(FlakyRepository {
                inner: InMemoryOrderRepository::new(),
                failures: AtomicUsize::new(failures),
            }),
            Arc::new(RecordingNotifier::new()),
            Arc::new(InMemoryEventBus::new()),
            Arc::new(SessionEngine::new()),
        )
    }

    #[tokio::test]
    async fn listing_survives_one_transport_failure() {
        let reply = flaky_orchestrator(1)
            .handle(event("f-1", EventKind::ListAvailable))
            .await
            .unwrap();
        assert_eq!(reply.into_orders(), Some(Vec::new()));
    }

    #[tokio::test]
    async fn listing_gives_up_after_the_retry() {
        let err = flaky_orchestrator(2)
            .handle(event("f-1", EventKind::ListAvailable))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Timeout);
    }

    #[tokio::test]
    async fn strangers_leave_no_lock_entries() {
        let h = harness();
        for n in 0..100 {
            let reply = h
                .orchestrator
                .handle(event(&format!("stranger-{}", n), EventKind::Start))
                .await
                .unwrap();
            assert_eq!(reply, Reply::NotRegistered);
        }
        h.orchestrator
            .handle(event("req-1", EventKind::Start))
            .await
            .unwrap();

        assert!(h.orchestrator.actor_locks.is_empty());
    }

    /// Fails the first `failures` version-checked writes, then delegates.
    struct FailingSaveRepository {
        inner: Arc<InMemoryOrderRepository>,
        failures: AtomicUsize,
        saves: AtomicUsize,
    }

    #[async_trait]
    impl OrderRepository for FailingSaveRepository {
        async fn insert(&self, order: &Order) -> Result<(), DomainError> {
            self.inner.insert(order).await
        }

        async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
            self.inner.find_by_id(id).await
        }

        async fn save_if_version(&self, order: &Order, expected: u64) -> Result<bool, DomainError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            let remaining = self.failures.load(Ordering::SeqCst);
            if remaining > 0 {
                self.failures.store(remaining - 1, Ordering::SeqCst);
                return Err(DomainError::new(ErrorCode::Timeout, "write timed out"));
            }
            self.inner.save_if_version(order, expected).await
        }

        async fn list_by_status(
            &self,
            status: Option<OrderStatus>,
        ) -> Result<Vec<Order>, DomainError> {
            self.inner.list_by_status(status).await
        }

        async fn list_for_requester(&self, requester: &ActorId) -> Result<Vec<Order>, DomainError> {
            self.inner.list_for_requester(requester).await
        }

        async fn list_for_fulfiller(
            &self,
            fulfiller: &ActorId,
            statuses: &[OrderStatus],
        ) -> Result<Vec<Order>, DomainError> {
            self.inner.list_for_fulfiller(fulfiller, statuses).await
        }
    }

    #[tokio::test]
    async fn claim_is_not_retried_after_a_write_timeout() {
        let store = Arc::new(InMemoryOrderRepository::new());
        let order = approved_order();
        seed(&store, &order).await;
        let repository = Arc::new(FailingSaveRepository {
            inner: store.clone(),
            failures: AtomicUsize::new(1),
            saves: AtomicUsize::new(0),
        });
        let orchestrator = Orchestrator::new(
            Arc::new(InMemoryActorDirectory::with_actors([actor(
                "f-1",
                Role::Fulfiller,
            )])),
            repository.clone(),
            Arc::new(RecordingNotifier::new()),
            Arc::new(InMemoryEventBus::new()),
            Arc::new(SessionEngine::new()),
        );
        let claim = || {
            event(
                "f-1",
                EventKind::Claim {
                    order_id: order.id(),
                },
            )
        };

        let err = orchestrator.handle(claim()).await.unwrap_err();

        match &err {
            OrchestratorError::Order(e @ OrderError::Transport { .. }) => {
                assert!(e.is_retryable())
            }
            other => panic!("expected transport error, got {:?}", other),
        }
        assert_eq!(repository.saves.load(Ordering::SeqCst), 1);
        let stored = store.find_by_id(order.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), OrderStatus::Approved);
        assert_eq!(stored.fulfiller(), None);

        let reply = orchestrator.handle(claim()).await.unwrap();
        assert_eq!(reply.order().unwrap().status(), OrderStatus::Assigned);
        assert_eq!(repository.saves.load(Ordering::SeqCst), 2);
    }
}
