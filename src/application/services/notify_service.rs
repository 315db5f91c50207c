//! Notification Service
//!
//! The machine-facing delivery path: an API key authenticates the
//! caller, a channel name resolves to a Telegram chat, and the message
//! goes out through whatever bot client is live right now.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::{ApiKey, ApiKeyRepository, ChannelRepository};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Outbound delivery seam. Implemented by the bot lifecycle manager so
/// the service never holds a client instance across a rebuild.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Deliver a text message to a Telegram chat
    async fn deliver(&self, chat_id: i64, text: &str) -> Result<(), AppError>;
}

/// NotifyService implementation
pub struct NotifyService<K, C, S>
where
    K: ApiKeyRepository,
    C: ChannelRepository,
    S: NotificationSender,
{
    key_repo: Arc<K>,
    channel_repo: Arc<C>,
    sender: Arc<S>,
}

impl<K, C, S> NotifyService<K, C, S>
where
    K: ApiKeyRepository,
    C: ChannelRepository,
    S: NotificationSender,
{
    /// Create a new NotifyService
    pub fn new(key_repo: Arc<K>, channel_repo: Arc<C>, sender: Arc<S>) -> Self {
        Self {
            key_repo,
            channel_repo,
            sender,
        }
    }

    /// Authenticate a plaintext API key against stored digests.
    ///
    /// Malformed, unknown and digest-mismatched keys all produce the
    /// same error so callers learn nothing about which part failed.
    pub async fn authenticate(&self, raw_key: &str) -> Result<ApiKey, AppError> {
        let unknown = || AppError::Unauthorized("Unknown API key".to_string());

        let prefix = ApiKey::prefix_of(raw_key).ok_or_else(unknown)?;
        let key = self
            .key_repo
            .find_by_prefix(prefix)
            .await?
            .ok_or_else(unknown)?;

        if !key.matches(raw_key) {
            return Err(unknown());
        }

        self.key_repo.touch_last_used(key.id).await?;
        Ok(key)
    }

    /// Resolve a channel name and deliver a message to its chat.
    /// Returns the chat id the message went to.
    pub async fn send(&self, channel_name: &str, text: &str) -> Result<i64, AppError> {
        let channel = self
            .channel_repo
            .find_by_name(channel_name)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Channel '{}' not found", channel_name))
            })?;

        if let Err(error) = self.sender.deliver(channel.chat_id, text).await {
            metrics::record_notification("failed");
            return Err(error);
        }

        metrics::record_notification("sent");
        info!(channel = %channel.name, chat_id = channel.chat_id, "notification delivered");
        Ok(channel.chat_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Channel;
    use chrono::Utc;
    use parking_lot::Mutex;
    use uuid::Uuid;

    struct MemoryKeys {
        keys: Vec<ApiKey>,
        touched: Mutex<Vec<Uuid>>,
    }

    impl MemoryKeys {
        fn with(keys: Vec<ApiKey>) -> Self {
            Self {
                keys,
                touched: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ApiKeyRepository for MemoryKeys {
        async fn list(&self) -> Result<Vec<ApiKey>, AppError> {
            Ok(self.keys.clone())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<ApiKey>, AppError> {
            Ok(self.keys.iter().find(|k| k.id == id).cloned())
        }

        async fn find_by_prefix(&self, prefix: &str) -> Result<Option<ApiKey>, AppError> {
            Ok(self.keys.iter().find(|k| k.prefix == prefix).cloned())
        }

        async fn create(&self, key: &ApiKey) -> Result<ApiKey, AppError> {
            Ok(key.clone())
        }

        async fn delete(&self, _id: Uuid) -> Result<(), AppError> {
            Ok(())
        }

        async fn touch_last_used(&self, id: Uuid) -> Result<(), AppError> {
            self.touched.lock().push(id);
            Ok(())
        }
    }

    struct MemoryChannels {
        channels: Vec<Channel>,
    }

    #[async_trait]
    impl ChannelRepository for MemoryChannels {
        async fn list(&self) -> Result<Vec<Channel>, AppError> {
            Ok(self.channels.clone())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Channel>, AppError> {
            Ok(self.channels.iter().find(|c| c.id == id).cloned())
        }

        async fn find_by_name(&self, name: &str) -> Result<Option<Channel>, AppError> {
            Ok(self.channels.iter().find(|c| c.name == name).cloned())
        }

        async fn create(&self, channel: &Channel) -> Result<Channel, AppError> {
            Ok(channel.clone())
        }

        async fn update(&self, channel: &Channel) -> Result<Channel, AppError> {
            Ok(channel.clone())
        }

        async fn delete(&self, _id: Uuid) -> Result<(), AppError> {
            Ok(())
        }

        async fn name_exists(&self, name: &str) -> Result<bool, AppError> {
            Ok(self.channels.iter().any(|c| c.name == name))
        }
    }

    /// Sender that records deliveries instead of talking to Telegram.
    struct RecordingSender {
        sent: Mutex<Vec<(i64, String)>>,
        fail: bool,
    }

    impl RecordingSender {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl NotificationSender for RecordingSender {
        async fn deliver(&self, chat_id: i64, text: &str) -> Result<(), AppError> {
            if self.fail {
                return Err(AppError::NotReady("telegram client".to_string()));
            }
            self.sent.lock().push((chat_id, text.to_string()));
            Ok(())
        }
    }

    fn channel(name: &str, chat_id: i64) -> Channel {
        let now = Utc::now();
        Channel {
            id: Uuid::new_v4(),
            name: name.to_string(),
            chat_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn service_with(
        keys: Vec<ApiKey>,
        channels: Vec<Channel>,
        sender: RecordingSender,
    ) -> NotifyService<MemoryKeys, MemoryChannels, RecordingSender> {
        NotifyService::new(
            Arc::new(MemoryKeys::with(keys)),
            Arc::new(MemoryChannels { channels }),
            Arc::new(sender),
        )
    }

    // ==========================================================================
    // API Key Authentication Tests
    // ==========================================================================

    #[tokio::test]
    async fn test_authenticate_accepts_valid_key_and_touches_it() {
        let (key, raw) = ApiKey::mint("ci");
        let key_id = key.id;
        let service = service_with(vec![key], vec![], RecordingSender::new());

        let authenticated = service.authenticate(&raw).await.unwrap();

        assert_eq!(authenticated.id, key_id);
        assert_eq!(*service.key_repo.touched.lock(), vec![key_id]);
    }

    #[tokio::test]
    async fn test_authenticate_rejects_malformed_key() {
        let service = service_with(vec![], vec![], RecordingSender::new());

        let err = service.authenticate("garbage").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_unknown_prefix() {
        let service = service_with(vec![], vec![], RecordingSender::new());

        let err = service.authenticate("nk_nothere_secret").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_wrong_secret_for_known_prefix() {
        let (key, _raw) = ApiKey::mint("ci");
        let prefix = key.prefix.clone();
        let service = service_with(vec![key], vec![], RecordingSender::new());

        let forged = format!("nk_{}_forgedsecret", prefix);
        let err = service.authenticate(&forged).await.unwrap_err();

        assert!(matches!(err, AppError::Unauthorized(_)));
        assert!(service.key_repo.touched.lock().is_empty());
    }

    // ==========================================================================
    // Delivery Tests
    // ==========================================================================

    #[tokio::test]
    async fn test_send_resolves_channel_and_delivers() {
        let service = service_with(
            vec![],
            vec![channel("deploys", -100200300)],
            RecordingSender::new(),
        );

        let chat_id = service.send("deploys", "build green").await.unwrap();

        assert_eq!(chat_id, -100200300);
        assert_eq!(
            *service.sender.sent.lock(),
            vec![(-100200300, "build green".to_string())]
        );
    }

    #[tokio::test]
    async fn test_send_to_unknown_channel_is_not_found() {
        let service = service_with(vec![], vec![], RecordingSender::new());

        let err = service.send("ghost", "hello").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_send_surfaces_sender_failure() {
        let service = service_with(
            vec![],
            vec![channel("deploys", -1)],
            RecordingSender::failing(),
        );

        let err = service.send("deploys", "hello").await.unwrap_err();
        assert!(matches!(err, AppError::NotReady(_)));
    }
}
