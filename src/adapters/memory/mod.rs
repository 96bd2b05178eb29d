//! In-memory adapters.
//!
//! The default backend for development and the integration tests. State
//! lives behind `tokio::sync::RwLock`s and is lost on restart.

mod actor_directory;
mod order_repository;
mod roster;

pub use actor_directory::InMemoryActorDirectory;
pub use order_repository::InMemoryOrderRepository;
pub use roster::{load_roster, Roster, RosterError};
