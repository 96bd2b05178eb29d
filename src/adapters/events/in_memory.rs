//! In-memory event bus.
//!
//! Records every published envelope. Used by the in-memory backend and as
//! the capture point in tests.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::EventPublisher;

/// In-memory event bus that keeps published envelopes for inspection.
///
/// # Example
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::new());
/// bus.publish(envelope).await?;
/// assert!(bus.has_event("order.claimed.v1"));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryEventBus {
    published: RwLock<Vec<EventEnvelope>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    // === Inspection ===

    /// Returns all published events, oldest first.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published
            .read()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Returns events of a specific type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Returns events for a specific aggregate.
    pub fn events_for_aggregate(&self, aggregate_id: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .collect()
    }

    pub fn event_count(&self) -> usize {
        self.published.read().map(|events| events.len()).unwrap_or(0)
    }

    /// Checks if a specific event type was published.
    pub fn has_event(&self, event_type: &str) -> bool {
        self.published
            .read()
            .map(|events| events.iter().any(|e| e.event_type == event_type))
            .unwrap_or(false)
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.published
            .write()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "event bus lock poisoned"))?
            .push(event);
        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        let mut published = self
            .published
            .write()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "event bus lock poisoned"))?;
        published.extend(events);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{EventId, EventMetadata, Timestamp};
    use serde_json::json;

    fn envelope(event_type: &str, aggregate_id: &str) -> EventEnvelope {
        EventEnvelope {
            event_id: EventId::new(),
            event_type: event_type.to_string(),
            schema_version: 1,
            aggregate_id: aggregate_id.to_string(),
            aggregate_type: "Order".to_string(),
            occurred_at: Timestamp::now(),
            payload: json!({}),
            metadata: EventMetadata::default(),
        }
    }

    #[tokio::test]
    async fn publish_stores_event() {
        let bus = InMemoryEventBus::new();

        bus.publish(envelope("order.approved.v1", "o-1"))
            .await
            .unwrap();

        assert_eq!(bus.event_count(), 1);
        assert!(bus.has_event("order.approved.v1"));
        assert!(!bus.has_event("order.declined.v1"));
    }

    #[tokio::test]
    async fn filters_by_type_and_aggregate() {
        let bus = InMemoryEventBus::new();

        bus.publish_all(vec![
            envelope("order.claimed.v1", "o-1"),
            envelope("order.advanced.v1", "o-1"),
            envelope("order.claimed.v1", "o-2"),
        ])
        .await
        .unwrap();

        assert_eq!(bus.events_of_type("order.claimed.v1").len(), 2);
        assert_eq!(bus.events_for_aggregate("o-1").len(), 2);
    }

    #[tokio::test]
    async fn publish_all_keeps_order() {
        let bus = InMemoryEventBus::new();

        bus.publish_all(vec![
            envelope("order.advanced.v1", "o-1"),
            envelope("order.archived.v1", "o-1"),
        ])
        .await
        .unwrap();

        let types: Vec<_> = bus
            .published_events()
            .into_iter()
            .map(|e| e.event_type)
            .collect();
        assert_eq!(types, vec!["order.advanced.v1", "order.archived.v1"]);
    }
}
