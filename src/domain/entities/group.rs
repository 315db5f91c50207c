//! Group entity and repository trait.
//!
//! A group is a Telegram chat the bot is a member of. Rows are written
//! exclusively from inbound bot updates; the admin API only reads and
//! deletes them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Represents a Telegram chat registration.
///
/// Maps to the `groups` table:
/// - chat_id: BIGINT PRIMARY KEY (Telegram chat id, negative for groups)
/// - title: VARCHAR(255) NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Telegram chat id (primary key)
    pub chat_id: i64,

    /// Chat title as last reported by Telegram
    pub title: String,

    /// First-seen timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Repository trait for group data access operations.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// List all registered chats, newest first.
    async fn list(&self) -> Result<Vec<Group>, AppError>;

    /// Find a group by its Telegram chat id.
    async fn find_by_chat_id(&self, chat_id: i64) -> Result<Option<Group>, AppError>;

    /// Insert or refresh a registration. The title is updated in place
    /// when the chat is already known.
    async fn upsert(&self, chat_id: i64, title: &str) -> Result<Group, AppError>;

    /// Remove a registration. Channels pointing at it are removed by
    /// the schema's cascade.
    async fn delete(&self, chat_id: i64) -> Result<(), AppError>;
}
