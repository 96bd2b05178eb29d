//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `OrderRepository` - Order persistence with version-checked writes
//! - `ActorDirectory` - Actor lookup and registration
//! - `Notifier` - Best-effort outbound messages to actors
//! - `EventPublisher` - Lifecycle event publication

mod actor_directory;
mod event_publisher;
mod notifier;
mod order_repository;

pub use actor_directory::ActorDirectory;
pub use event_publisher::EventPublisher;
pub use notifier::{Notification, NotificationKind, Notifier};
pub use order_repository::OrderRepository;
