//! Order repository port.
//!
//! Persists Order aggregates and serves the listing queries.
//!
//! # Concurrency
//!
//! Writes after the initial insert go through [`OrderRepository::save_if_version`],
//! an atomic compare-and-set on the order's version. This is the only
//! cross-task mutual exclusion the lifecycle needs: a claim or decision
//! that lost a race sees `false` and re-reads.

use async_trait::async_trait;

use crate::domain::foundation::{ActorId, DomainError, OrderId};
use crate::domain::order::{Order, OrderStatus};

/// Repository port for Order aggregate persistence.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Store a newly submitted order.
    async fn insert(&self, order: &Order) -> Result<(), DomainError>;

    /// Find an order by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError>;

    /// Replace the stored order only if its stored version equals `expected_version`.
    ///
    /// Returns `Ok(false)` when another writer got there first or the order
    /// does not exist.
    async fn save_if_version(
        &self,
        order: &Order,
        expected_version: u64,
    ) -> Result<bool, DomainError>;

    /// All orders, or those in one status. Oldest first.
    async fn list_by_status(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, DomainError>;

    /// Orders created by a requester. Newest first.
    async fn list_for_requester(&self, requester: &ActorId) -> Result<Vec<Order>, DomainError>;

    /// Orders carried by a fulfiller whose status is one of `statuses`. Newest first.
    async fn list_for_fulfiller(
        &self,
        fulfiller: &ActorId,
        statuses: &[OrderStatus],
    ) -> Result<Vec<Order>, DomainError>;
}
