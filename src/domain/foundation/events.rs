//! Domain events and the envelope they travel in.
//!
//! Events are plain serializable structs. `domain_event!` ties one to its
//! versioned type name and aggregate; `to_envelope()` wraps it for an
//! `EventPublisher`.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::Timestamp;

/// Identity and timing every published event carries.
pub trait DomainEvent: Send + Sync {
    /// Versioned type name, `"<aggregate>.<verb>.v<n>"`.
    fn event_type(&self) -> &'static str;
    fn aggregate_type(&self) -> &'static str;
    fn aggregate_id(&self) -> String;
    fn occurred_at(&self) -> Timestamp;
    fn event_id(&self) -> EventId;
}

/// Envelope conversion for any event that can be serialized.
pub trait SerializableDomainEvent: DomainEvent + Serialize {
    fn to_envelope(&self) -> EventEnvelope {
        let event_type = self.event_type();
        EventEnvelope {
            event_id: self.event_id(),
            event_type: event_type.to_string(),
            schema_version: schema_version_of(event_type),
            aggregate_id: self.aggregate_id(),
            aggregate_type: self.aggregate_type().to_string(),
            occurred_at: self.occurred_at(),
            payload: serde_json::to_value(self).unwrap_or(JsonValue::Null),
            metadata: EventMetadata::default(),
        }
    }
}

impl<T: DomainEvent + Serialize> SerializableDomainEvent for T {}

/// Implements `DomainEvent` for a struct with an `event_id: EventId` field.
///
/// ```ignore
/// domain_event! {
///     OrderClaimed: "order.claimed.v1",
///     aggregate: Order(order_id),
///     occurred_at: claimed_at,
/// }
/// ```
#[macro_export]
macro_rules! domain_event {
    (
        $event:ident : $event_type:literal,
        aggregate: $aggregate:ident ( $id_field:ident ),
        occurred_at: $at_field:ident $(,)?
    ) => {
        impl $crate::domain::foundation::DomainEvent for $event {
            fn event_type(&self) -> &'static str {
                $event_type
            }

            fn aggregate_type(&self) -> &'static str {
                stringify!($aggregate)
            }

            fn aggregate_id(&self) -> String {
                self.$id_field.to_string()
            }

            fn occurred_at(&self) -> $crate::domain::foundation::Timestamp {
                self.$at_field
            }

            fn event_id(&self) -> $crate::domain::foundation::EventId {
                self.event_id
            }
        }
    };
}

pub use crate::domain_event;

/// `n` from a `...v<n>` type name; 1 when there is no suffix.
fn schema_version_of(event_type: &str) -> u32 {
    event_type
        .rsplit_once(".v")
        .and_then(|(_, version)| version.parse().ok())
        .unwrap_or(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Request context copied from `CommandMetadata`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<String>,
}

/// A published event with its payload as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: EventId,
    pub event_type: String,
    pub schema_version: u32,
    pub aggregate_id: String,
    pub aggregate_type: String,
    pub occurred_at: Timestamp,
    pub payload: JsonValue,
    pub metadata: EventMetadata,
}

impl EventEnvelope {
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.metadata.correlation_id = Some(id.into());
        self
    }

    pub fn with_actor_id(mut self, id: impl Into<String>) -> Self {
        self.metadata.actor_id = Some(id.into());
        self
    }
}
