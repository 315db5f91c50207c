//! Group Repository Implementation
//!
//! PostgreSQL implementation of the GroupRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Group, GroupRepository};
use crate::shared::error::AppError;

/// Database row representation matching the groups table schema.
#[derive(Debug, sqlx::FromRow)]
struct GroupRow {
    chat_id: i64,
    title: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GroupRow {
    fn into_group(self) -> Group {
        Group {
            chat_id: self.chat_id,
            title: self.title,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// PostgreSQL group repository implementation.
#[derive(Clone)]
pub struct PgGroupRepository {
    pool: PgPool,
}

impl PgGroupRepository {
    /// Create a new PgGroupRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    async fn list(&self) -> Result<Vec<Group>, AppError> {
        let rows = sqlx::query_as::<_, GroupRow>(
            r#"
            SELECT chat_id, title, created_at, updated_at
            FROM groups
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_group()).collect())
    }

    async fn find_by_chat_id(&self, chat_id: i64) -> Result<Option<Group>, AppError> {
        let row = sqlx::query_as::<_, GroupRow>(
            r#"
            SELECT chat_id, title, created_at, updated_at
            FROM groups
            WHERE chat_id = $1
            "#,
        )
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_group()))
    }

    async fn upsert(&self, chat_id: i64, title: &str) -> Result<Group, AppError> {
        let row = sqlx::query_as::<_, GroupRow>(
            r#"
            INSERT INTO groups (chat_id, title)
            VALUES ($1, $2)
            ON CONFLICT (chat_id)
            DO UPDATE SET title = EXCLUDED.title, updated_at = NOW()
            RETURNING chat_id, title, created_at, updated_at
            "#,
        )
        .bind(chat_id)
        .bind(title)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_group())
    }

    async fn delete(&self, chat_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM groups WHERE chat_id = $1")
            .bind(chat_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Group with chat id {} not found",
                chat_id
            )));
        }

        Ok(())
    }
}
