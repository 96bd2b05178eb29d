//! ConversationSession state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ActorId, OrderId, Timestamp, ValidationError};
use crate::domain::order::OrderPayload;

use super::{assemble_payload, Field, FieldMap, FieldValue, FlowKind, SessionError};

/// Where a session currently stands within its flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "at", content = "index", rename_all = "snake_case")]
pub enum Position {
    /// Collecting the field at this index of the flow's step table.
    Step(usize),
    /// All fields collected; waiting for confirm or reject.
    Confirming,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Step(index) => write!(f, "collecting step {}", index),
            Position::Confirming => write!(f, "confirming"),
        }
    }
}

/// An actor-authored event directed at their session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    Text(String),
    Cancel,
    Confirm,
    Reject,
}

impl SessionInput {
    fn name(&self) -> &'static str {
        match self {
            SessionInput::Text(_) => "text",
            SessionInput::Cancel => "cancel",
            SessionInput::Confirm => "confirm",
            SessionInput::Reject => "reject",
        }
    }
}

/// What a flow produced once it finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletedFlow {
    /// A confirmed create-order flow, ready for submission.
    OrderDraft(OrderPayload),
    DeclineReason { order_id: OrderId, reason: String },
}

/// Result of feeding one input into a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Value stored; the session now waits for `next`.
    Advanced { next: Field },
    /// Value rejected; the session stays at `field`.
    Rejected { field: Field, error: ValidationError },
    /// Last step done; the accumulated fields await confirmation.
    AwaitingConfirmation { fields: FieldMap },
    Completed(CompletedFlow),
    Cancelled,
    /// Rejected at the confirmation step; nothing is submitted.
    Discarded,
}

impl StepOutcome {
    /// Returns true when the session must be dropped after this outcome.
    pub fn ends_session(&self) -> bool {
        matches!(
            self,
            StepOutcome::Completed(_) | StepOutcome::Cancelled | StepOutcome::Discarded
        )
    }
}

/// One actor's in-progress flow.
///
/// # Invariants
///
/// - `fields` holds exactly the fields of the steps before `position`
/// - a rejected input changes neither `position` nor `fields`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSession {
    actor: ActorId,
    flow: FlowKind,
    position: Position,
    fields: FieldMap,
    started_at: Timestamp,
}

impl ConversationSession {
    /// Starts a fresh session at the first step of `flow`.
    pub fn start(actor: ActorId, flow: FlowKind) -> Self {
        Self {
            actor,
            flow,
            position: Position::Step(0),
            fields: FieldMap::new(),
            started_at: Timestamp::now(),
        }
    }

    pub fn actor(&self) -> &ActorId {
        &self.actor
    }

    pub fn flow(&self) -> FlowKind {
        self.flow
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    /// The field the session is waiting for, if still collecting.
    pub fn current_field(&self) -> Option<Field> {
        match self.position {
            Position::Step(index) => self.flow.steps().get(index).copied(),
            Position::Confirming => None,
        }
    }

    /// Applies one input.
    ///
    /// # Errors
    ///
    /// - `UnexpectedInput` for text while confirming, or confirm/reject while collecting
    /// - `MalformedField` if confirmed fields cannot form a payload
    pub fn apply(&mut self, input: SessionInput) -> Result<StepOutcome, SessionError> {
        match (self.position, input) {
            (_, SessionInput::Cancel) => Ok(StepOutcome::Cancelled),
            (Position::Step(index), SessionInput::Text(raw)) => self.collect(index, &raw),
            (Position::Confirming, SessionInput::Confirm) => {
                let payload = assemble_payload(&self.fields)?;
                Ok(StepOutcome::Completed(CompletedFlow::OrderDraft(payload)))
            }
            (Position::Confirming, SessionInput::Reject) => Ok(StepOutcome::Discarded),
            (position, input) => Err(SessionError::UnexpectedInput {
                input: input.name(),
                position: position.to_string(),
            }),
        }
    }

    fn collect(&mut self, index: usize, raw: &str) -> Result<StepOutcome, SessionError> {
        let steps = self.flow.steps();
        let field = steps[index];

        let value = match field.parse(raw) {
            Ok(value) => value,
            Err(error) => return Ok(StepOutcome::Rejected { field, error }),
        };

        if let Some(&next) = steps.get(index + 1) {
            self.fields.insert(field, value);
            self.position = Position::Step(index + 1);
            return Ok(StepOutcome::Advanced { next });
        }

        if self.flow.requires_confirmation() {
            self.fields.insert(field, value);
            self.position = Position::Confirming;
            return Ok(StepOutcome::AwaitingConfirmation {
                fields: self.fields.clone(),
            });
        }

        match (self.flow, value) {
            (FlowKind::DeclineReason { order_id }, FieldValue::Text(reason)) => {
                Ok(StepOutcome::Completed(CompletedFlow::DeclineReason {
                    order_id,
                    reason,
                }))
            }
            _ => Err(SessionError::MalformedField(field)),
        }
    }
}
