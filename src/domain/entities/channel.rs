//! Channel entity and repository trait.
//!
//! Maps to the `channels` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Represents a named notification route pointing at a registered chat.
/// External callers address channels by name; the chat behind a name
/// can be swapped without touching the callers.
///
/// Maps to the `channels` table:
/// - id: UUID PRIMARY KEY
/// - name: VARCHAR(64) NOT NULL UNIQUE
/// - chat_id: BIGINT NOT NULL REFERENCES groups(chat_id) ON DELETE CASCADE
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    /// Primary key
    pub id: Uuid,

    /// Route name used in notify requests (unique)
    pub name: String,

    /// Target Telegram chat
    pub chat_id: i64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Repository trait for channel data access operations.
#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// List all channels, newest first.
    async fn list(&self) -> Result<Vec<Channel>, AppError>;

    /// Find a channel by its ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Channel>, AppError>;

    /// Find a channel by its route name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Channel>, AppError>;

    /// Create a new channel.
    async fn create(&self, channel: &Channel) -> Result<Channel, AppError>;

    /// Update an existing channel's name and target chat.
    async fn update(&self, channel: &Channel) -> Result<Channel, AppError>;

    /// Delete a channel by ID.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;

    /// Check if a route name is already taken.
    async fn name_exists(&self, name: &str) -> Result<bool, AppError>;
}
