//! Actor directory port.
//!
//! Resolves external actor identifiers to registered actors and their roles.

use async_trait::async_trait;

use crate::domain::directory::{Actor, Role};
use crate::domain::foundation::{ActorId, DomainError};

#[async_trait]
pub trait ActorDirectory: Send + Sync {
    /// Look up an actor. Returns `None` for unregistered identifiers.
    async fn resolve(&self, id: &ActorId) -> Result<Option<Actor>, DomainError>;

    /// All actors, optionally restricted to one role.
    async fn list(&self, role: Option<Role>) -> Result<Vec<Actor>, DomainError>;

    /// Register an actor. Re-registering an existing id leaves it untouched.
    async fn register(&self, actor: Actor) -> Result<(), DomainError>;
}
