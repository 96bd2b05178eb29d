//! Conversation Session Engine - owns every live session.
//!
//! Sessions live in a map from actor id to a slot. Each slot is guarded by
//! its own async mutex, so one actor's inputs apply strictly one at a time
//! while other actors proceed in parallel. Callers address sessions only by
//! actor id; the session values never leave the engine except as snapshots.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::conversation::{
    ConversationSession, Field, FlowKind, SessionError, SessionInput, StepOutcome,
};
use crate::domain::foundation::ActorId;

type Slot = Arc<Mutex<Option<ConversationSession>>>;

/// Per-actor session store with single-writer access per key.
#[derive(Default)]
pub struct SessionEngine {
    slots: Mutex<HashMap<ActorId, Slot>>,
}

impl SessionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    async fn slot(&self, actor: &ActorId) -> Slot {
        let mut slots = self.slots.lock().await;
        slots.entry(actor.clone()).or_default().clone()
    }

    /// Starts `flow` for `actor`, replacing any session already live.
    ///
    /// Returns the first field the new session asks for.
    pub async fn start(&self, actor: &ActorId, flow: FlowKind) -> Option<Field> {
        let slot = self.slot(actor).await;
        let mut guard = slot.lock().await;

        if let Some(previous) = guard.as_ref() {
            tracing::debug!(
                actor = %actor,
                replaced = previous.flow().name(),
                "discarding superseded session"
            );
        }

        let session = ConversationSession::start(actor.clone(), flow);
        let first = session.current_field();
        *guard = Some(session);

        tracing::debug!(actor = %actor, flow = flow.name(), "session started");
        first
    }

    /// Feeds one input into the actor's session.
    ///
    /// The session is dropped when the outcome ends it. An input the
    /// session refuses leaves it untouched.
    ///
    /// # Errors
    ///
    /// - `NoSession` if the actor has no live session
    /// - `UnexpectedInput` / `MalformedField` from the session itself
    pub async fn input(
        &self,
        actor: &ActorId,
        input: SessionInput,
    ) -> Result<StepOutcome, SessionError> {
        let slot = self.slot(actor).await;
        let mut guard = slot.lock().await;

        let session = guard
            .as_mut()
            .ok_or_else(|| SessionError::NoSession(actor.clone()))?;
        let outcome = session.apply(input)?;

        match &outcome {
            StepOutcome::Advanced { next } => {
                tracing::debug!(actor = %actor, next = next.as_str(), "session advanced");
            }
            StepOutcome::Rejected { field, error } => {
                tracing::debug!(actor = %actor, field = field.as_str(), %error, "input rejected");
            }
            StepOutcome::AwaitingConfirmation { .. } => {
                tracing::debug!(actor = %actor, "session awaiting confirmation");
            }
            _ => {}
        }

        if outcome.ends_session() {
            tracing::debug!(actor = %actor, "session closed");
            *guard = None;
        }
        Ok(outcome)
    }

    /// Snapshot of the actor's live session.
    pub async fn current(&self, actor: &ActorId) -> Option<ConversationSession> {
        let slot = self.slot(actor).await;
        let guard = slot.lock().await;
        guard.clone()
    }

    /// Drops the actor's session. Returns whether one was live.
    pub async fn discard(&self, actor: &ActorId) -> bool {
        let slot = self.slot(actor).await;
        let mut guard = slot.lock().await;
        guard.take().is_some()
    }
}
