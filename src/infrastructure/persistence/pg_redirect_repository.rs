//! PostgreSQL implementation of the redirect repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Redirect;
use crate::domain::repositories::RedirectRepository;
use crate::error::AppError;

/// PostgreSQL repository for redirect storage and retrieval.
///
/// All statements are parameterized. The pool is shared process-wide and
/// owned by the caller.
pub struct PgRedirectRepository {
    pool: Arc<PgPool>,
}

impl PgRedirectRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RedirectRepository for PgRedirectRepository {
    async fn list(&self, owner_id: &str) -> Result<Vec<Redirect>, AppError> {
        let rows = sqlx::query_as::<_, Redirect>(
            r#"
            SELECT short, url, user_id, created_at
            FROM redirects
            WHERE user_id = $1
            ORDER BY created_at, short
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn get_redirect_by_short(
        &self,
        short: &str,
        owner_id: &str,
    ) -> Result<Redirect, AppError> {
        sqlx::query_as::<_, Redirect>(
            r#"
            SELECT short, url, user_id, created_at
            FROM redirects
            WHERE short = $1 AND user_id = $2
            "#,
        )
        .bind(short)
        .bind(owner_id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| AppError::not_found("Redirect not found", json!({ "short": short })))
    }

    async fn save(&self, redirect: &Redirect) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO redirects (short, url, user_id, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (short) DO NOTHING
            "#,
        )
        .bind(&redirect.short)
        .bind(&redirect.url)
        .bind(&redirect.owner_id)
        .bind(redirect.created_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn find_by_short(&self, short: &str) -> Result<Option<Redirect>, AppError> {
        let row = sqlx::query_as::<_, Redirect>(
            r#"
            SELECT short, url, user_id, created_at
            FROM redirects
            WHERE short = $1
            "#,
        )
        .bind(short)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn expand(&self, short: &str) -> Result<String, AppError> {
        sqlx::query_scalar::<_, String>("SELECT url FROM redirects WHERE short = $1")
            .bind(short)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::not_found("Redirect not found", json!({ "short": short })))
    }

    async fn delete(&self, short: &str, owner_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM redirects WHERE short = $1 AND user_id = $2")
            .bind(short)
            .bind(owner_id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Redirect not found",
                json!({ "short": short }),
            ));
        }

        Ok(())
    }
}
