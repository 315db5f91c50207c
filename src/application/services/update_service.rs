//! Update Service
//!
//! Applies inbound Telegram webhook updates: the id commands get a
//! reply naming the chat, and the bot's own membership transitions
//! keep the chat registry in sync.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::services::NotificationSender;
use crate::domain::GroupRepository;
use crate::infrastructure::telegram::types::{ChatMemberUpdated, Message, Update};
use crate::shared::error::AppError;

/// UpdateService implementation
pub struct UpdateService<G, S>
where
    G: GroupRepository,
    S: NotificationSender,
{
    group_repo: Arc<G>,
    sender: Arc<S>,
}

impl<G, S> UpdateService<G, S>
where
    G: GroupRepository,
    S: NotificationSender,
{
    /// Create a new UpdateService
    pub fn new(group_repo: Arc<G>, sender: Arc<S>) -> Self {
        Self { group_repo, sender }
    }

    /// Apply one webhook update. Failures propagate so the webhook
    /// endpoint answers non-2xx and Telegram redelivers later.
    pub async fn handle(&self, update: Update) -> Result<(), AppError> {
        if let Some(message) = update.message {
            self.handle_message(message).await?;
        }
        if let Some(transition) = update.my_chat_member {
            self.handle_membership(transition).await?;
        }
        Ok(())
    }

    async fn handle_message(&self, message: Message) -> Result<(), AppError> {
        let Some(text) = message.text.as_deref() else {
            return Ok(());
        };
        if !is_id_command(text) {
            return Ok(());
        }

        let reply = format!("This chat's id is {}", message.chat.id);
        self.sender.deliver(message.chat.id, &reply).await
    }

    async fn handle_membership(&self, transition: ChatMemberUpdated) -> Result<(), AppError> {
        let chat = &transition.chat;

        if transition.new_chat_member.is_present() {
            if !chat.is_group() {
                debug!(
                    chat_id = chat.id,
                    chat_type = %chat.chat_type,
                    "ignoring membership in non-group chat"
                );
                return Ok(());
            }
            let group = self
                .group_repo
                .upsert(chat.id, &chat.display_title())
                .await?;
            info!(chat_id = group.chat_id, title = %group.title, "chat registered");
            return Ok(());
        }

        // The bot may be removed from chats it never registered.
        match self.group_repo.delete(chat.id).await {
            Ok(()) => {
                info!(chat_id = chat.id, "chat unregistered");
                Ok(())
            }
            Err(AppError::NotFound(_)) => Ok(()),
            Err(error) => Err(error),
        }
    }
}

/// Whether a message text starts with one of the id commands,
/// including the `/cmd@BotName` form Telegram uses in groups.
fn is_id_command(text: &str) -> bool {
    let first = text.split_whitespace().next().unwrap_or("");
    let command = first.split('@').next().unwrap_or("");
    matches!(command, "/start" | "/id")
}
