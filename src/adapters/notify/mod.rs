//! Notifier adapters.
//!
//! - `LoggingNotifier` - writes notifications to the log (no delivery channel)
//! - `WebhookNotifier` - POSTs notifications as JSON to a messaging gateway
//! - `RecordingNotifier` - keeps notifications in memory for tests

mod logging;
mod recording;
mod webhook;

pub use logging::LoggingNotifier;
pub use recording::RecordingNotifier;
pub use webhook::{WebhookConfig, WebhookNotifier};
