//! Actor lookup, listing and registration.

use std::sync::Arc;

use crate::domain::directory::{Actor, Role};
use crate::domain::foundation::{ActorId, DomainError};
use crate::ports::ActorDirectory;

#[derive(Debug, Clone)]
pub struct ResolveActorQuery {
    pub actor_id: ActorId,
}

/// Resolves one actor; absence is a value, not an error.
pub struct ResolveActorHandler {
    directory: Arc<dyn ActorDirectory>,
}

impl ResolveActorHandler {
    pub fn new(directory: Arc<dyn ActorDirectory>) -> Self {
        Self { directory }
    }

    pub async fn handle(&self, query: ResolveActorQuery) -> Result<Option<Actor>, DomainError> {
        self.directory.resolve(&query.actor_id).await
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListActorsQuery {
    pub role: Option<Role>,
}

pub struct ListActorsHandler {
    directory: Arc<dyn ActorDirectory>,
}

impl ListActorsHandler {
    pub fn new(directory: Arc<dyn ActorDirectory>) -> Self {
        Self { directory }
    }

    pub async fn handle(&self, query: ListActorsQuery) -> Result<Vec<Actor>, DomainError> {
        self.directory.list(query.role).await
    }
}

/// Seeds the directory, typically from the roster at startup.
pub struct RegisterActorHandler {
    directory: Arc<dyn ActorDirectory>,
}

impl RegisterActorHandler {
    pub fn new(directory: Arc<dyn ActorDirectory>) -> Self {
        Self { directory }
    }

    /// Registers each actor; returns how many were submitted.
    pub async fn handle(&self, actors: Vec<Actor>) -> Result<usize, DomainError> {
        let count = actors.len();
        for actor in actors {
            tracing::debug!(actor = %actor.id, role = %actor.role, "registering actor");
            self.directory.register(actor).await?;
        }
        Ok(count)
    }
}
