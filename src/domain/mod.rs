//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, events)
//! - `validation` - Pure single-field validators
//! - `directory` - Actors and their roles
//! - `order` - Order aggregate and its role-gated lifecycle
//! - `conversation` - Per-actor form-filling sessions

pub mod conversation;
pub mod directory;
pub mod foundation;
pub mod order;
pub mod validation;
