//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod actor;
pub mod order;

pub use actor::{
    ListActorsHandler, ListActorsQuery, RegisterActorHandler, ResolveActorHandler,
    ResolveActorQuery,
};
pub use order::{
    ActorOrdersView, ListActorOrdersHandler, ListActorOrdersQuery, ListOrdersHandler,
    ListOrdersQuery, SubmitOrderCommand, SubmitOrderHandler, SubmitOrderResult,
    TransitionOrderCommand, TransitionOrderHandler, TransitionOrderResult,
};
