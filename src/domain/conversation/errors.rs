//! Session error types.

use thiserror::Error;

use crate::domain::foundation::{ActorId, ErrorCode};

use super::Field;

/// Errors raised by the session engine.
///
/// Field rejections are not errors; they come back as a retry outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no active session for actor {0}")]
    NoSession(ActorId),

    /// The input does not apply at the session's current position.
    #[error("{input} is not accepted while {position}")]
    UnexpectedInput {
        input: &'static str,
        position: String,
    },

    /// Confirmed fields could not be assembled into a payload.
    #[error("field '{0}' is missing or has the wrong type")]
    MalformedField(Field),
}

impl SessionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NoSession(_) => ErrorCode::SessionNotFound,
            SessionError::UnexpectedInput { .. } => ErrorCode::InvalidStateTransition,
            SessionError::MalformedField(_) => ErrorCode::ValidationFailed,
        }
    }
}
