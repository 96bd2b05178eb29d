//! Caller context threaded from an inbound request to the events it causes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ActorId;

/// Who issued a command, through which channel, under which correlation id.
///
/// The correlation id is fixed when the metadata is created so every event
/// a single request produces (including conflict retries) carries the same
/// id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    pub actor_id: ActorId,
    correlation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    pub fn new(actor_id: ActorId) -> Self {
        Self {
            actor_id,
            correlation_id: Uuid::new_v4().to_string(),
            source: None,
        }
    }

    /// Reuses an id supplied by the caller (for example a request header).
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = id.into();
        self
    }

    /// Channel tag, `"http"` or `"chat"`.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller() -> ActorId {
        ActorId::new("1001").unwrap()
    }

    #[test]
    fn generated_correlation_id_does_not_change_between_reads() {
        let metadata = CommandMetadata::new(caller());
        let first = metadata.correlation_id().to_string();

        assert!(Uuid::parse_str(&first).is_ok());
        assert_eq!(metadata.correlation_id(), first);
        assert_eq!(metadata.clone().correlation_id(), first);
    }

    #[test]
    fn distinct_commands_get_distinct_ids() {
        assert_ne!(
            CommandMetadata::new(caller()).correlation_id(),
            CommandMetadata::new(caller()).correlation_id()
        );
    }

    #[test]
    fn builders_set_source_and_correlation() {
        let metadata = CommandMetadata::new(caller())
            .with_source("chat")
            .with_correlation_id("corr-1");

        assert_eq!(metadata.source(), Some("chat"));
        assert_eq!(metadata.correlation_id(), "corr-1");
    }
}
