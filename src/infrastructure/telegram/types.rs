//! Telegram Bot API Payload Types
//!
//! The small slice of the Bot API surface this service consumes:
//! inbound webhook updates (messages and chat-membership transitions)
//! and the request/response envelopes for the outbound calls.

use serde::{Deserialize, Serialize};

/// Standard Bot API response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

/// Inbound webhook update. Only the update kinds this service handles
/// are modeled; everything else deserializes with both fields absent.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub my_chat_member: Option<ChatMemberUpdated>,
}

/// A message delivered to the bot.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub text: Option<String>,
}

/// The chat a message or membership transition belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub chat_type: String,
    pub title: Option<String>,
}

impl Chat {
    /// Groups and supergroups are the chats worth registering; private
    /// chats and channels are not notification targets.
    pub fn is_group(&self) -> bool {
        matches!(self.chat_type.as_str(), "group" | "supergroup")
    }

    /// Human-readable name for registration, falling back to the id.
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("chat {}", self.id))
    }
}

/// The bot's own membership changed in a chat.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMemberUpdated {
    pub chat: Chat,
    pub new_chat_member: ChatMember,
}

/// Membership state after a transition.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMember {
    pub status: String,
}

impl ChatMember {
    /// Whether this membership state means the bot participates in the
    /// chat and can send messages to it.
    pub fn is_present(&self) -> bool {
        matches!(self.status.as_str(), "member" | "administrator" | "creator")
    }
}

/// Command menu entry for `setMyCommands`.
#[derive(Debug, Clone, Serialize)]
pub struct BotCommand {
    pub command: &'static str,
    pub description: &'static str,
}

/// The command menu this bot advertises.
pub fn command_menu() -> Vec<BotCommand> {
    vec![
        BotCommand {
            command: "start",
            description: "Show this chat's id",
        },
        BotCommand {
            command: "id",
            description: "Show this chat's id",
        },
    ]
}
