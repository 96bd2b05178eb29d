//! Orchestration layer.
//!
//! Resolves the sender of each inbound event, routes session inputs to the
//! session engine and lifecycle buttons straight to the lifecycle handlers,
//! submits completed drafts and tells the counterpart actors what changed.

mod dispatch;
mod errors;
mod event;
mod locks;
mod notifications;
mod render;
mod reply;

pub use dispatch::Orchestrator;
pub use errors::OrchestratorError;
pub use event::{EventKind, InboundEvent};
pub use locks::{KeyedGuard, KeyedLocks};
pub use notifications::{audience_for, Audience, NotificationFanout};
pub use render::notification_text;
pub use reply::{menu_for, MenuOption, Reply};
