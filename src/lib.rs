//! Logistics Desk - delivery order coordination.
//!
//! Requesters submit delivery orders through a step-by-step conversation,
//! approvers approve or decline them, and fulfillers claim and carry them
//! to completion. Every lifecycle change is role-checked, version-checked
//! against concurrent writers, and announced to the actors who care.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
