//! HTTP routes for the desk.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    chat_event, get_actor, health, list_active_orders, list_actors, list_order_history,
    list_orders, list_requested_orders, register_actors, submit_order, transition_order,
    DeskHandlers,
};

/// Creates the desk router with all endpoints.
pub fn desk_router(handlers: DeskHandlers) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/actors", get(list_actors).post(register_actors))
        .route("/actors/:id", get(get_actor))
        .route("/actors/:id/orders", get(list_requested_orders))
        .route("/actors/:id/orders/active", get(list_active_orders))
        .route("/actors/:id/orders/history", get(list_order_history))
        .route("/orders", get(list_orders).post(submit_order))
        .route("/orders/:id/transitions", post(transition_order))
        .route("/chat/events", post(chat_event))
        .with_state(handlers)
}
