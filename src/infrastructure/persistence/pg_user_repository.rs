//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// PostgreSQL repository for user records.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get(&self, id: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>("SELECT id, provider_id, email FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))
    }

    async fn get_by_provider_id(&self, provider_id: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, provider_id, email FROM users WHERE provider_id = $1",
        )
        .bind(provider_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    async fn save(&self, user: &User) -> Result<(), AppError> {
        sqlx::query("INSERT INTO users (id, provider_id, email) VALUES ($1, $2, $3)")
            .bind(&user.id)
            .bind(&user.provider_id)
            .bind(&user.email)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
