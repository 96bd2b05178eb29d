//! PostgreSQL implementation of OrderRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{ActorId, DomainError, ErrorCode, OrderId, Timestamp};
use crate::domain::order::{Order, OrderPayload, OrderStatus};
use crate::ports::OrderRepository;

use super::db_error;

const ORDER_COLUMNS: &str = "id, requester_id, fulfiller_id, status, payload, decline_reason, \
                             created_at, updated_at, version";

#[derive(Clone)]
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn insert(&self, order: &Order) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO orders (
                id, requester_id, fulfiller_id, status, payload, decline_reason,
                created_at, updated_at, version
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(order.id().as_uuid())
        .bind(order.requester().as_str())
        .bind(order.fulfiller().map(ActorId::as_str))
        .bind(order.status().as_str())
        .bind(Json(order.payload()))
        .bind(order.decline_reason())
        .bind(order.created_at().as_datetime())
        .bind(order.updated_at().as_datetime())
        .bind(version_to_db(order.version())?)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to insert order"))?;

        Ok(())
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM orders WHERE id = $1", ORDER_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to fetch order"))?;

        row.map(row_to_order).transpose()
    }

    async fn save_if_version(
        &self,
        order: &Order,
        expected_version: u64,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE orders SET
                fulfiller_id = $3,
                status = $4,
                decline_reason = $5,
                updated_at = $6,
                version = $7
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(order.id().as_uuid())
        .bind(version_to_db(expected_version)?)
        .bind(order.fulfiller().map(ActorId::as_str))
        .bind(order.status().as_str())
        .bind(order.decline_reason())
        .bind(order.updated_at().as_datetime())
        .bind(version_to_db(order.version())?)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update order"))?;

        Ok(result.rows_affected() == 1)
    }

    async fn list_by_status(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM orders WHERE $1::text IS NULL OR status = $1 ORDER BY created_at ASC",
            ORDER_COLUMNS
        ))
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list orders by status"))?;

        rows.into_iter().map(row_to_order).collect()
    }

    async fn list_for_requester(&self, requester: &ActorId) -> Result<Vec<Order>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM orders WHERE requester_id = $1 ORDER BY created_at DESC",
            ORDER_COLUMNS
        ))
        .bind(requester.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list orders for requester"))?;

        rows.into_iter().map(row_to_order).collect()
    }

    async fn list_for_fulfiller(
        &self,
        fulfiller: &ActorId,
        statuses: &[OrderStatus],
    ) -> Result<Vec<Order>, DomainError> {
        let statuses: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();
        let rows = sqlx::query(&format!(
            "SELECT {} FROM orders WHERE fulfiller_id = $1 AND status = ANY($2) \
             ORDER BY updated_at DESC",
            ORDER_COLUMNS
        ))
        .bind(fulfiller.as_str())
        .bind(statuses)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list orders for fulfiller"))?;

        rows.into_iter().map(row_to_order).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn version_to_db(version: u64) -> Result<i64, DomainError> {
    i64::try_from(version)
        .map_err(|_| DomainError::new(ErrorCode::InternalError, "Order version overflow"))
}

fn corrupt(column: &str, detail: impl std::fmt::Display) -> DomainError {
    DomainError::storage(format!("Invalid {} in orders row: {}", column, detail))
        .with_detail("column", column)
}

fn row_to_order(row: PgRow) -> Result<Order, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| corrupt("id", e))?;
    let requester: String = row
        .try_get("requester_id")
        .map_err(|e| corrupt("requester_id", e))?;
    let fulfiller: Option<String> = row
        .try_get("fulfiller_id")
        .map_err(|e| corrupt("fulfiller_id", e))?;
    let status: String = row.try_get("status").map_err(|e| corrupt("status", e))?;
    let Json(payload): Json<OrderPayload> =
        row.try_get("payload").map_err(|e| corrupt("payload", e))?;
    let decline_reason: Option<String> = row
        .try_get("decline_reason")
        .map_err(|e| corrupt("decline_reason", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| corrupt("created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| corrupt("updated_at", e))?;
    let version: i64 = row.try_get("version").map_err(|e| corrupt("version", e))?;

    Ok(Order::reconstitute(
        OrderId::from_uuid(id),
        ActorId::new(requester).map_err(|e| corrupt("requester_id", e))?,
        fulfiller
            .map(ActorId::new)
            .transpose()
            .map_err(|e| corrupt("fulfiller_id", e))?,
        status.parse().map_err(|e| corrupt("status", e))?,
        payload,
        decline_reason,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
        u64::try_from(version).map_err(|e| corrupt("version", e))?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_conversion_rejects_overflow() {
        assert_eq!(version_to_db(7).unwrap(), 7);
        assert!(version_to_db(u64::MAX).is_err());
    }

    #[test]
    fn corrupt_row_errors_are_storage_failures() {
        let err = corrupt("status", "unknown status 'lost'");
        assert_eq!(err.code, ErrorCode::StorageUnavailable);
        assert_eq!(err.details.get("column"), Some(&"status".to_string()));
    }
}
