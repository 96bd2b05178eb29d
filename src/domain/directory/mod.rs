//! Directory domain module.
//!
//! Actors are the people on the messaging channel. Each has exactly one
//! role which gates the lifecycle commands they may issue.

mod actor;
mod role;

pub use actor::Actor;
pub use role::Role;
