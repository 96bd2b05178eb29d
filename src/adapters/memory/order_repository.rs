//! In-memory OrderRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{ActorId, DomainError, ErrorCode, OrderId};
use crate::domain::order::{Order, OrderStatus};
use crate::ports::OrderRepository;

/// Orders keyed by id. `save_if_version` runs its check and write under a
/// single write-lock acquisition.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders.
    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }

    async fn filtered<F>(&self, keep: F, newest_first: bool) -> Vec<Order>
    where
        F: Fn(&Order) -> bool,
    {
        let orders = self.orders.read().await;
        let mut matching: Vec<Order> = orders.values().filter(|&o| keep(o)).cloned().collect();
        matching.sort_by_key(|o| *o.created_at());
        if newest_first {
            matching.reverse();
        }
        matching
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, order: &Order) -> Result<(), DomainError> {
        let mut orders = self.orders.write().await;
        if orders.contains_key(&order.id()) {
            return Err(DomainError::new(
                ErrorCode::VersionConflict,
                format!("Order already exists: {}", order.id()),
            ));
        }
        orders.insert(order.id(), order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn save_if_version(
        &self,
        order: &Order,
        expected_version: u64,
    ) -> Result<bool, DomainError> {
        let mut orders = self.orders.write().await;
        match orders.get_mut(&order.id()) {
            Some(stored) if stored.version() == expected_version => {
                *stored = order.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list_by_status(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, DomainError> {
        Ok(self
            .filtered(|o| status.map_or(true, |s| o.status() == s), false)
            .await)
    }

    async fn list_for_requester(&self, requester: &ActorId) -> Result<Vec<Order>, DomainError> {
        Ok(self.filtered(|o| o.requester() == requester, true).await)
    }

    async fn list_for_fulfiller(
        &self,
        fulfiller: &ActorId,
        statuses: &[OrderStatus],
    ) -> Result<Vec<Order>, DomainError> {
        Ok(self
            .filtered(
                |o| o.is_fulfilled_by(fulfiller) && statuses.contains(&o.status()),
                true,
            )
            .await)
    }
}
