//! Order lifecycle error types.

use std::fmt;
use thiserror::Error;

use crate::domain::directory::Role;
use crate::domain::foundation::{ActorId, DomainError, ErrorCode, OrderId, ValidationError};

use super::OrderStatus;

/// Entity a lookup failed to find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingEntity {
    Actor(ActorId),
    Order(OrderId),
}

impl fmt::Display for MissingEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingEntity::Actor(id) => write!(f, "actor {}", id),
            MissingEntity::Order(id) => write!(f, "order {}", id),
        }
    }
}

/// Errors raised by lifecycle commands and queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Bad field input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Caller's role or identity does not permit the command.
    #[error("{role} {actor} may not {action}: {reason}")]
    Authorization {
        actor: ActorId,
        role: Role,
        action: &'static str,
        reason: String,
    },

    /// The order is not in a state the command can start from.
    #[error("cannot {action} order {order_id} while it is {status}")]
    InvalidTransition {
        order_id: OrderId,
        status: OrderStatus,
        action: &'static str,
    },

    /// Another fulfiller took the order first.
    #[error("order {0} has already been taken by another fulfiller")]
    AlreadyClaimed(OrderId),

    #[error("{0} not found")]
    NotFound(MissingEntity),

    /// Storage or notification call failed or timed out. Retryable.
    #[error("transport failure: {message}")]
    Transport { code: ErrorCode, message: String },
}

impl OrderError {
    pub fn unauthorized(
        actor: &ActorId,
        role: Role,
        action: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        OrderError::Authorization {
            actor: actor.clone(),
            role,
            action,
            reason: reason.into(),
        }
    }

    pub fn invalid_transition(order_id: OrderId, status: OrderStatus, action: &'static str) -> Self {
        OrderError::InvalidTransition {
            order_id,
            status,
            action,
        }
    }

    pub fn actor_not_found(id: &ActorId) -> Self {
        OrderError::NotFound(MissingEntity::Actor(id.clone()))
    }

    pub fn order_not_found(id: OrderId) -> Self {
        OrderError::NotFound(MissingEntity::Order(id))
    }

    pub fn transport(message: impl Into<String>) -> Self {
        OrderError::Transport {
            code: ErrorCode::StorageUnavailable,
            message: message.into(),
        }
    }

    /// Returns true when the caller may safely retry an idempotent read.
    pub fn is_retryable(&self) -> bool {
        matches!(self, OrderError::Transport { .. })
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            OrderError::Validation(err) => ErrorCode::from(err),
            OrderError::Authorization { .. } => ErrorCode::Forbidden,
            OrderError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            OrderError::AlreadyClaimed(_) => ErrorCode::AlreadyClaimed,
            OrderError::NotFound(MissingEntity::Actor(_)) => ErrorCode::ActorNotFound,
            OrderError::NotFound(MissingEntity::Order(_)) => ErrorCode::OrderNotFound,
            OrderError::Transport { code, .. } => *code,
        }
    }
}

/// Port failures are infrastructure failures.
impl From<DomainError> for OrderError {
    fn from(err: DomainError) -> Self {
        let code = if err.code.is_retryable() {
            err.code
        } else {
            ErrorCode::StorageUnavailable
        };
        OrderError::Transport {
            code,
            message: err.message,
        }
    }
}
