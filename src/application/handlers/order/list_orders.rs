//! Order listing queries.
//!
//! Pure filters over current order state.

use std::sync::Arc;

use crate::domain::foundation::ActorId;
use crate::domain::order::{Order, OrderError, OrderStatus};
use crate::ports::{ActorDirectory, OrderRepository};

// ════════════════════════════════════════════════════════════════════════════
// By status
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct ListOrdersQuery {
    pub status: Option<OrderStatus>,
}

pub struct ListOrdersHandler {
    repository: Arc<dyn OrderRepository>,
}

impl ListOrdersHandler {
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListOrdersQuery) -> Result<Vec<Order>, OrderError> {
        Ok(self.repository.list_by_status(query.status).await?)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Per actor
// ════════════════════════════════════════════════════════════════════════════

/// Which of an actor's orders to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorOrdersView {
    /// Orders the actor created.
    Requested,
    /// Orders the actor is carrying right now.
    Active,
    /// Orders the actor delivered.
    History,
}

#[derive(Debug, Clone)]
pub struct ListActorOrdersQuery {
    pub actor_id: ActorId,
    pub view: ActorOrdersView,
}

pub struct ListActorOrdersHandler {
    directory: Arc<dyn ActorDirectory>,
    repository: Arc<dyn OrderRepository>,
}

impl ListActorOrdersHandler {
    pub fn new(directory: Arc<dyn ActorDirectory>, repository: Arc<dyn OrderRepository>) -> Self {
        Self {
            directory,
            repository,
        }
    }

    /// # Errors
    ///
    /// - `NotFound` if the actor is not registered
    pub async fn handle(&self, query: ListActorOrdersQuery) -> Result<Vec<Order>, OrderError> {
        if self.directory.resolve(&query.actor_id).await?.is_none() {
            return Err(OrderError::actor_not_found(&query.actor_id));
        }

        let orders = match query.view {
            ActorOrdersView::Requested => {
                self.repository.list_for_requester(&query.actor_id).await?
            }
            ActorOrdersView::Active => {
                self.repository
                    .list_for_fulfiller(&query.actor_id, &OrderStatus::ACTIVE_DELIVERY)
                    .await?
            }
            ActorOrdersView::History => {
                self.repository
                    .list_for_fulfiller(&query.actor_id, &[OrderStatus::Completed])
                    .await?
            }
        };
        Ok(orders)
    }
}
