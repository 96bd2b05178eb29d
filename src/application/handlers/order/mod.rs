//! Order lifecycle handlers.

mod list_orders;
mod submit_order;
mod transition_order;

pub use list_orders::{
    ActorOrdersView, ListActorOrdersHandler, ListActorOrdersQuery, ListOrdersHandler,
    ListOrdersQuery,
};
pub use submit_order::{SubmitOrderCommand, SubmitOrderHandler, SubmitOrderResult};
pub use transition_order::{TransitionOrderCommand, TransitionOrderHandler, TransitionOrderResult};
