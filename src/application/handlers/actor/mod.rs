//! Directory queries.

mod actor_queries;

pub use actor_queries::{
    ListActorsHandler, ListActorsQuery, RegisterActorHandler, ResolveActorHandler,
    ResolveActorQuery,
};
