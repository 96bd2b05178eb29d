//! In-memory ActorDirectory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::directory::{Actor, Role};
use crate::domain::foundation::{ActorId, DomainError};
use crate::ports::ActorDirectory;

#[derive(Debug, Clone, Default)]
pub struct InMemoryActorDirectory {
    actors: Arc<RwLock<HashMap<ActorId, Actor>>>,
}

impl InMemoryActorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory seeded with the given actors.
    pub fn with_actors(actors: impl IntoIterator<Item = Actor>) -> Self {
        let actors = actors
            .into_iter()
            .map(|actor| (actor.id.clone(), actor))
            .collect();
        Self {
            actors: Arc::new(RwLock::new(actors)),
        }
    }
}

#[async_trait]
impl ActorDirectory for InMemoryActorDirectory {
    async fn resolve(&self, id: &ActorId) -> Result<Option<Actor>, DomainError> {
        Ok(self.actors.read().await.get(id).cloned())
    }

    async fn list(&self, role: Option<Role>) -> Result<Vec<Actor>, DomainError> {
        let actors = self.actors.read().await;
        let mut listed: Vec<Actor> = actors
            .values()
            .filter(|actor| role.map_or(true, |r| actor.has_role(r)))
            .cloned()
            .collect();
        listed.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(listed)
    }

    async fn register(&self, actor: Actor) -> Result<(), DomainError> {
        self.actors
            .write()
            .await
            .entry(actor.id.clone())
            .or_insert(actor);
        Ok(())
    }
}
