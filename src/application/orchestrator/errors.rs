//! Orchestrator error type.

use thiserror::Error;

use crate::domain::conversation::SessionError;
use crate::domain::foundation::ErrorCode;
use crate::domain::order::OrderError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl OrchestratorError {
    pub fn code(&self) -> ErrorCode {
        match self {
            OrchestratorError::Order(err) => err.code(),
            OrchestratorError::Session(err) => err.code(),
        }
    }
}
