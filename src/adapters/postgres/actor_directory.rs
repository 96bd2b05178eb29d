//! PostgreSQL implementation of ActorDirectory.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::directory::{Actor, Role};
use crate::domain::foundation::{ActorId, DomainError};
use crate::domain::validation::PhoneNumber;
use crate::ports::ActorDirectory;

use super::db_error;

#[derive(Clone)]
pub struct PostgresActorDirectory {
    pool: PgPool,
}

impl PostgresActorDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActorDirectory for PostgresActorDirectory {
    async fn resolve(&self, id: &ActorId) -> Result<Option<Actor>, DomainError> {
        let row = sqlx::query("SELECT id, role, name, phone FROM actors WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to resolve actor"))?;

        row.map(row_to_actor).transpose()
    }

    async fn list(&self, role: Option<Role>) -> Result<Vec<Actor>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, role, name, phone FROM actors \
             WHERE $1::text IS NULL OR role = $1 ORDER BY id",
        )
        .bind(role.map(|r| r.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list actors"))?;

        rows.into_iter().map(row_to_actor).collect()
    }

    async fn register(&self, actor: Actor) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO actors (id, role, name, phone) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(actor.id.as_str())
        .bind(actor.role.as_str())
        .bind(&actor.name)
        .bind(actor.phone.as_str())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to register actor"))?;

        Ok(())
    }
}

fn row_to_actor(row: PgRow) -> Result<Actor, DomainError> {
    let invalid = |column: &str, e: &dyn std::fmt::Display| {
        DomainError::storage(format!("Invalid {} in actors row: {}", column, e))
    };

    let id: String = row.try_get("id").map_err(|e| invalid("id", &e))?;
    let role: String = row.try_get("role").map_err(|e| invalid("role", &e))?;
    let name: String = row.try_get("name").map_err(|e| invalid("name", &e))?;
    let phone: String = row.try_get("phone").map_err(|e| invalid("phone", &e))?;

    Ok(Actor::new(
        ActorId::new(id).map_err(|e| invalid("id", &e))?,
        role.parse().map_err(|e| invalid("role", &e))?,
        name,
        PhoneNumber::parse(&phone).map_err(|e| invalid("phone", &e))?,
    ))
}
