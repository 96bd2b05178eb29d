//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresOrderRepository` - Orders with a JSONB payload and a version column
//! - `PostgresActorDirectory` - Actor table lookups
//!
//! The schema lives in `migrations/0001_orders.sql`.

mod actor_directory;
mod order_repository;

pub use actor_directory::PostgresActorDirectory;
pub use order_repository::PostgresOrderRepository;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::StorageConfig;
use crate::domain::foundation::DomainError;

/// Opens a connection pool sized from configuration.
pub async fn connect(config: &StorageConfig) -> Result<PgPool, DomainError> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to connect to database: {}", e)))
}

pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| DomainError::storage(format!("{}: {}", context, e))
}
