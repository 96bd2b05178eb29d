//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error types, the state machine
//! trait, and event infrastructure that form the vocabulary of the
//! logistics domain.

mod command;
mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, RejectionKind, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{ActorId, OrderId};
pub use state_machine::{StateMachine, TransitionRejected};
pub use timestamp::Timestamp;
