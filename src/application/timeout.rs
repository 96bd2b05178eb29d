//! Bounded calls to storage and notification ports.
//!
//! Every port call made by the application goes through one of the
//! decorators below. A call that does not finish within its limit is
//! abandoned and reported as `ErrorCode::Timeout`, which the lifecycle
//! layer surfaces as a retryable transport error.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::directory::{Actor, Role};
use crate::domain::foundation::{ActorId, DomainError, ErrorCode, OrderId};
use crate::domain::order::{Order, OrderStatus};
use crate::ports::{ActorDirectory, Notification, Notifier, OrderRepository};

/// Runs `call`, failing with `Timeout` once `limit` elapses.
pub async fn bounded<T, F>(limit: Duration, operation: &'static str, call: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(operation, limit_ms = limit.as_millis() as u64, "port call timed out");
            Err(DomainError::new(
                ErrorCode::Timeout,
                format!("{} did not complete within {:?}", operation, limit),
            )
            .with_detail("operation", operation))
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// OrderRepository
// ════════════════════════════════════════════════════════════════════════════

pub struct BoundedOrderRepository {
    inner: Arc<dyn OrderRepository>,
    limit: Duration,
}

impl BoundedOrderRepository {
    pub fn new(inner: Arc<dyn OrderRepository>, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl OrderRepository for BoundedOrderRepository {
    async fn insert(&self, order: &Order) -> Result<(), DomainError> {
        bounded(self.limit, "orders.insert", self.inner.insert(order)).await
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        bounded(self.limit, "orders.find_by_id", self.inner.find_by_id(id)).await
    }

    async fn save_if_version(
        &self,
        order: &Order,
        expected_version: u64,
    ) -> Result<bool, DomainError> {
        bounded(
            self.limit,
            "orders.save_if_version",
            self.inner.save_if_version(order, expected_version),
        )
        .await
    }

    async fn list_by_status(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, DomainError> {
        bounded(self.limit, "orders.list_by_status", self.inner.list_by_status(status)).await
    }

    async fn list_for_requester(&self, requester: &ActorId) -> Result<Vec<Order>, DomainError> {
        bounded(
            self.limit,
            "orders.list_for_requester",
            self.inner.list_for_requester(requester),
        )
        .await
    }

    async fn list_for_fulfiller(
        &self,
        fulfiller: &ActorId,
        statuses: &[OrderStatus],
    ) -> Result<Vec<Order>, DomainError> {
        bounded(
            self.limit,
            "orders.list_for_fulfiller",
            self.inner.list_for_fulfiller(fulfiller, statuses),
        )
        .await
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ActorDirectory
// ════════════════════════════════════════════════════════════════════════════

pub struct BoundedActorDirectory {
    inner: Arc<dyn ActorDirectory>,
    limit: Duration,
}

impl BoundedActorDirectory {
    pub fn new(inner: Arc<dyn ActorDirectory>, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl ActorDirectory for BoundedActorDirectory {
    async fn resolve(&self, id: &ActorId) -> Result<Option<Actor>, DomainError> {
        bounded(self.limit, "actors.resolve", self.inner.resolve(id)).await
    }

    async fn list(&self, role: Option<Role>) -> Result<Vec<Actor>, DomainError> {
        bounded(self.limit, "actors.list", self.inner.list(role)).await
    }

    async fn register(&self, actor: Actor) -> Result<(), DomainError> {
        bounded(self.limit, "actors.register", self.inner.register(actor)).await
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Notifier
// ════════════════════════════════════════════════════════════════════════════

pub struct BoundedNotifier {
    inner: Arc<dyn Notifier>,
    limit: Duration,
}

impl BoundedNotifier {
    pub fn new(inner: Arc<dyn Notifier>, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl Notifier for BoundedNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), DomainError> {
        bounded(self.limit, "notifier.notify", self.inner.notify(notification)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StalledDirectory;

    #[async_trait]
    impl ActorDirectory for StalledDirectory {
        async fn resolve(&self, _id: &ActorId) -> Result<Option<Actor>, DomainError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(None)
        }

        async fn list(&self, _role: Option<Role>) -> Result<Vec<Actor>, DomainError> {
            Ok(Vec::new())
        }

        async fn register(&self, _actor: Actor) -> Result<(), DomainError> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_call_becomes_timeout() {
        let directory =
            BoundedActorDirectory::new(Arc::new(StalledDirectory), Duration::from_millis(50));

        let err = directory
            .resolve(&ActorId::new("1").unwrap())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Timeout);
        assert!(err.code.is_retryable());
        assert_eq!(
            err.details.get("operation"),
            Some(&"actors.resolve".to_string())
        );
    }

    #[tokio::test]
    async fn fast_call_passes_through() {
        let directory =
            BoundedActorDirectory::new(Arc::new(StalledDirectory), Duration::from_millis(50));

        assert!(directory.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn inner_error_is_preserved() {
        let result: Result<(), DomainError> = bounded(Duration::from_secs(1), "test", async {
            Err(DomainError::storage("connection refused"))
        })
        .await;

        assert_eq!(result.unwrap_err().code, ErrorCode::StorageUnavailable);
    }
}
