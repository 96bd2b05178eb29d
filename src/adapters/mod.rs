//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - Event publishers (in-memory bus, tracing)
//! - `http` - axum routes over the application handlers
//! - `memory` - In-memory order store and actor directory
//! - `notify` - Notification delivery (webhook gateway, log, recorder)
//! - `postgres` - PostgreSQL order store and actor directory

pub mod events;
pub mod http;
pub mod memory;
pub mod notify;
pub mod postgres;
