//! HTTP handlers for the desk endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::{
    ActorOrdersView, ListActorOrdersHandler, ListActorOrdersQuery, ListActorsHandler,
    ListActorsQuery, ListOrdersHandler, ListOrdersQuery, RegisterActorHandler,
    ResolveActorHandler, ResolveActorQuery, SubmitOrderCommand, SubmitOrderHandler,
    TransitionOrderCommand, TransitionOrderHandler,
};
use crate::application::{InboundEvent, Orchestrator};
use crate::domain::foundation::{ActorId, CommandMetadata, OrderId};
use crate::ports::{ActorDirectory, EventPublisher, OrderRepository};

use super::dto::{
    ActorListResponse, ErrorResponse, ListActorsParams, ListOrdersParams, OrderListResponse,
    OrderResponse, RegisterActorsRequest, RegisteredResponse, SubmitOrderRequest,
    TransitionRequest,
};
use super::errors::{
    bad_request, domain_error_response, orchestrator_error_response, order_error_response,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct DeskHandlers {
    resolve_actor: Arc<ResolveActorHandler>,
    list_actors: Arc<ListActorsHandler>,
    register_actors: Arc<RegisterActorHandler>,
    submit_order: Arc<SubmitOrderHandler>,
    transition_order: Arc<TransitionOrderHandler>,
    list_orders: Arc<ListOrdersHandler>,
    list_actor_orders: Arc<ListActorOrdersHandler>,
    orchestrator: Arc<Orchestrator>,
}

impl DeskHandlers {
    /// Builds every handler over the same set of ports.
    pub fn new(
        directory: Arc<dyn ActorDirectory>,
        repository: Arc<dyn OrderRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        orchestrator: Arc<Orchestrator>,
    ) -> Self {
        Self {
            resolve_actor: Arc::new(ResolveActorHandler::new(directory.clone())),
            list_actors: Arc::new(ListActorsHandler::new(directory.clone())),
            register_actors: Arc::new(RegisterActorHandler::new(directory.clone())),
            submit_order: Arc::new(SubmitOrderHandler::new(
                directory.clone(),
                repository.clone(),
                event_publisher.clone(),
            )),
            transition_order: Arc::new(TransitionOrderHandler::new(
                directory.clone(),
                repository.clone(),
                event_publisher,
            )),
            list_orders: Arc::new(ListOrdersHandler::new(repository.clone())),
            list_actor_orders: Arc::new(ListActorOrdersHandler::new(directory, repository)),
            orchestrator,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Actors
// ════════════════════════════════════════════════════════════════════════════

/// GET /actors - List actors, optionally by role
pub async fn list_actors(
    State(handlers): State<DeskHandlers>,
    Query(params): Query<ListActorsParams>,
) -> Response {
    match handlers
        .list_actors
        .handle(ListActorsQuery { role: params.role })
        .await
    {
        Ok(actors) => (StatusCode::OK, Json(ActorListResponse::from(actors))).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// GET /actors/:id - Resolve one actor
pub async fn get_actor(
    State(handlers): State<DeskHandlers>,
    Path(actor_id): Path<String>,
) -> Response {
    let actor_id = match ActorId::new(actor_id) {
        Ok(id) => id,
        Err(e) => return bad_request(e.to_string()),
    };

    match handlers
        .resolve_actor
        .handle(ResolveActorQuery {
            actor_id: actor_id.clone(),
        })
        .await
    {
        Ok(Some(actor)) => (StatusCode::OK, Json(actor)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                "ACTOR_NOT_FOUND",
                format!("actor {} not found", actor_id),
            )),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// POST /actors - Register actors; existing ids are left as they are
pub async fn register_actors(
    State(handlers): State<DeskHandlers>,
    Json(req): Json<RegisterActorsRequest>,
) -> Response {
    match handlers.register_actors.handle(req.actors).await {
        Ok(registered) => {
            (StatusCode::OK, Json(RegisteredResponse { registered })).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Orders
// ════════════════════════════════════════════════════════════════════════════

/// POST /orders - Submit a new order
pub async fn submit_order(
    State(handlers): State<DeskHandlers>,
    Json(req): Json<SubmitOrderRequest>,
) -> Response {
    let metadata = CommandMetadata::new(req.requester_id.clone()).with_source("http");
    let cmd = SubmitOrderCommand {
        requester_id: req.requester_id,
        payload: req.payload,
    };

    match handlers.submit_order.handle(cmd, metadata).await {
        Ok(result) => {
            (StatusCode::CREATED, Json(OrderResponse::from(&result.order))).into_response()
        }
        Err(e) => order_error_response(e),
    }
}

/// GET /orders - List orders, optionally by status
pub async fn list_orders(
    State(handlers): State<DeskHandlers>,
    Query(params): Query<ListOrdersParams>,
) -> Response {
    match handlers
        .list_orders
        .handle(ListOrdersQuery {
            status: params.status,
        })
        .await
    {
        Ok(orders) => (StatusCode::OK, Json(OrderListResponse::from(orders))).into_response(),
        Err(e) => order_error_response(e),
    }
}

/// POST /orders/:id/transitions - Apply a lifecycle command
pub async fn transition_order(
    State(handlers): State<DeskHandlers>,
    Path(order_id): Path<String>,
    Json(req): Json<TransitionRequest>,
) -> Response {
    let order_id = match order_id.parse::<OrderId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid order ID"),
    };

    let metadata = CommandMetadata::new(req.caller_id.clone()).with_source("http");
    let cmd = TransitionOrderCommand {
        order_id,
        caller_id: req.caller_id,
        command: req.command,
    };

    match handlers.transition_order.handle(cmd, metadata).await {
        Ok(result) => (StatusCode::OK, Json(OrderResponse::from(&result.order))).into_response(),
        Err(e) => order_error_response(e),
    }
}

/// GET /actors/:id/orders - Orders the actor created
pub async fn list_requested_orders(
    state: State<DeskHandlers>,
    path: Path<String>,
) -> Response {
    actor_orders(state, path, ActorOrdersView::Requested).await
}

/// GET /actors/:id/orders/active - Orders the fulfiller is carrying
pub async fn list_active_orders(state: State<DeskHandlers>, path: Path<String>) -> Response {
    actor_orders(state, path, ActorOrdersView::Active).await
}

/// GET /actors/:id/orders/history - Orders the fulfiller delivered
pub async fn list_order_history(state: State<DeskHandlers>, path: Path<String>) -> Response {
    actor_orders(state, path, ActorOrdersView::History).await
}

async fn actor_orders(
    State(handlers): State<DeskHandlers>,
    Path(actor_id): Path<String>,
    view: ActorOrdersView,
) -> Response {
    let actor_id = match ActorId::new(actor_id) {
        Ok(id) => id,
        Err(e) => return bad_request(e.to_string()),
    };

    match handlers
        .list_actor_orders
        .handle(ListActorOrdersQuery { actor_id, view })
        .await
    {
        Ok(orders) => (StatusCode::OK, Json(OrderListResponse::from(orders))).into_response(),
        Err(e) => order_error_response(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Chat
// ════════════════════════════════════════════════════════════════════════════

/// POST /chat/events - Feed one conversational event
pub async fn chat_event(
    State(handlers): State<DeskHandlers>,
    Json(event): Json<InboundEvent>,
) -> Response {
    match handlers.orchestrator.handle(event).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(e) => orchestrator_error_response(e),
    }
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}
