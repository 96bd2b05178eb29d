//! Error to HTTP response mapping.
//!
//! Invalid transitions and lost claims are both 409 but carry distinct
//! codes, so clients can tell "too late" from "not allowed in this state".

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::OrchestratorError;
use crate::domain::conversation::SessionError;
use crate::domain::foundation::DomainError;
use crate::domain::order::OrderError;

use super::dto::ErrorResponse;

pub fn order_error_response(error: OrderError) -> Response {
    let status = match &error {
        OrderError::Validation(_) => StatusCode::BAD_REQUEST,
        OrderError::Authorization { .. } => StatusCode::FORBIDDEN,
        OrderError::InvalidTransition { .. } | OrderError::AlreadyClaimed(_) => {
            StatusCode::CONFLICT
        }
        OrderError::NotFound(_) => StatusCode::NOT_FOUND,
        OrderError::Transport { .. } => StatusCode::SERVICE_UNAVAILABLE,
    };

    let mut body = ErrorResponse::new(error.code(), error.to_string());
    if let OrderError::Validation(err) = &error {
        body = body.with_details(json!({ "field": err.field(), "kind": err.kind() }));
    }
    if error.is_retryable() {
        body = body.with_details(json!({ "retryable": true }));
    }

    (status, Json(body)).into_response()
}

pub fn session_error_response(error: SessionError) -> Response {
    let status = match &error {
        SessionError::NoSession(_) => StatusCode::NOT_FOUND,
        SessionError::UnexpectedInput { .. } => StatusCode::CONFLICT,
        SessionError::MalformedField(_) => StatusCode::BAD_REQUEST,
    };
    (status, Json(ErrorResponse::new(error.code(), error.to_string()))).into_response()
}

pub fn orchestrator_error_response(error: OrchestratorError) -> Response {
    match error {
        OrchestratorError::Order(err) => order_error_response(err),
        OrchestratorError::Session(err) => session_error_response(err),
    }
}

/// Port failures surfacing from plain queries.
pub fn domain_error_response(error: DomainError) -> Response {
    let status = if error.code.is_retryable() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(ErrorResponse::new(error.code, error.message))).into_response()
}

pub fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(message)),
    )
        .into_response()
}
