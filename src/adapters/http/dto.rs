//! Request and response bodies.

use serde::{Deserialize, Serialize};

use crate::domain::directory::{Actor, Role};
use crate::domain::foundation::{ActorId, Timestamp};
use crate::domain::order::{LifecycleCommand, Order, OrderPayload, OrderStatus};

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmitOrderRequest {
    pub requester_id: ActorId,
    pub payload: OrderPayload,
}

/// Body of `POST /orders/:id/transitions`.
///
/// ```json
/// { "caller_id": "appr-1", "command": "decline", "reason": "No trucks" }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionRequest {
    pub caller_id: ActorId,
    #[serde(flatten)]
    pub command: LifecycleCommand,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterActorsRequest {
    pub actors: Vec<Actor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListOrdersParams {
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListActorsParams {
    pub role: Option<Role>,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub requester: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfiller: Option<String>,
    pub status: OrderStatus,
    pub payload: OrderPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub version: u64,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id().to_string(),
            requester: order.requester().to_string(),
            fulfiller: order.fulfiller().map(|id| id.to_string()),
            status: order.status(),
            payload: order.payload().clone(),
            decline_reason: order.decline_reason().map(str::to_string),
            created_at: *order.created_at(),
            updated_at: *order.updated_at(),
            version: order.version(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<OrderResponse>,
    pub total: usize,
}

impl From<Vec<Order>> for OrderListResponse {
    fn from(orders: Vec<Order>) -> Self {
        let orders: Vec<OrderResponse> = orders.iter().map(OrderResponse::from).collect();
        Self {
            total: orders.len(),
            orders,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActorListResponse {
    pub actors: Vec<Actor>,
    pub total: usize,
}

impl From<Vec<Actor>> for ActorListResponse {
    fn from(actors: Vec<Actor>) -> Self {
        Self {
            total: actors.len(),
            actors,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisteredResponse {
    pub registered: usize,
}

/// Error body shared by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl ToString, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::test_support::pending_order;
    use serde_json::json;

    #[test]
    fn transition_request_reads_flattened_command() {
        let req: TransitionRequest = serde_json::from_value(json!({
            "caller_id": "appr-1",
            "command": "decline",
            "reason": "No trucks"
        }))
        .unwrap();

        assert_eq!(req.caller_id.as_str(), "appr-1");
        assert_eq!(
            req.command,
            LifecycleCommand::Decline {
                reason: "No trucks".into()
            }
        );
    }

    #[test]
    fn order_response_omits_unset_fulfiller() {
        let json = serde_json::to_value(OrderResponse::from(&pending_order())).unwrap();
        assert_eq!(json["status"], "pending_approval");
        assert!(json.get("fulfiller").is_none());
        assert!(json.get("decline_reason").is_none());
    }

    #[test]
    fn error_response_skips_empty_details() {
        let json = serde_json::to_value(ErrorResponse::bad_request("nope")).unwrap();
        assert_eq!(json["code"], "BAD_REQUEST");
        assert!(json.get("details").is_none());
    }
}
