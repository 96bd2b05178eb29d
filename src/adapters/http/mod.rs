//! HTTP adapter - the backend contract over axum.
//!
//! - `/actors` - directory lookup, listing and registration
//! - `/orders` - submission, listing and lifecycle transitions
//! - `/actors/:id/orders[/active|/history]` - per-actor listings
//! - `/chat/events` - inbound conversational events

mod dto;
mod errors;
mod handlers;
mod routes;

pub use dto::{
    ActorListResponse, ErrorResponse, OrderListResponse, OrderResponse, RegisterActorsRequest,
    SubmitOrderRequest, TransitionRequest,
};
pub use handlers::DeskHandlers;
pub use routes::desk_router;
