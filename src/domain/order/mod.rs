//! Order domain module.
//!
//! An order moves through a role-gated lifecycle:
//!
//! ```text
//! created -> pending_approval -> approved -> assigned -> picked_up -> in_transit -> completed
//!                             \-> declined                                          |
//!                                   \------------------> archived <-----------------/
//! ```
//!
//! # Events
//!
//! - `OrderSubmitted` - A requester submitted a new order
//! - `OrderApproved` / `OrderDeclined` - An approver decided on a pending order
//! - `OrderClaimed` - A fulfiller took an approved order
//! - `OrderAdvanced` - The assigned fulfiller moved the delivery forward
//! - `OrderArchived` - An approver closed a terminal order

mod aggregate;
mod command;
mod errors;
mod events;
mod payload;
mod status;

pub use aggregate::Order;
pub use command::LifecycleCommand;
pub use errors::{MissingEntity, OrderError};
pub use events::{
    OrderAdvanced, OrderApproved, OrderArchived, OrderClaimed, OrderDeclined, OrderSubmitted,
};
pub use payload::{Cargo, Endpoint, OrderPayload};
pub use status::OrderStatus;
