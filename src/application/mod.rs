//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (submit, transition) write through the order repository;
//! query handlers read. The orchestrator turns inbound conversational events
//! into handler calls, session steps and notifications.

pub mod handlers;
pub mod orchestrator;
pub mod session_engine;
pub mod timeout;

pub use orchestrator::{EventKind, InboundEvent, Orchestrator, OrchestratorError, Reply};
pub use session_engine::SessionEngine;
pub use timeout::{bounded, BoundedActorDirectory, BoundedNotifier, BoundedOrderRepository};
