//! Response DTOs
//!
//! Data structures for API response bodies.

use serde::Serialize;

use crate::application::services::AuthTokens;
use crate::config::RuntimeConfig;
use crate::domain::{ApiKey, Channel, Group, User};

/// Authentication token response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

impl From<AuthTokens> for TokenResponse {
    fn from(tokens: AuthTokens) -> Self {
        Self {
            access_token: tokens.access_token,
            expires_in: tokens.expires_in,
            token_type: tokens.token_type,
        }
    }
}

/// Admin account response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub role: String,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            role: user.role.as_str().to_string(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Registered Telegram chat response
#[derive(Debug, Serialize)]
pub struct GroupResponse {
    pub chat_id: i64,
    pub title: String,
    pub created_at: String,
}

impl From<Group> for GroupResponse {
    fn from(group: Group) -> Self {
        Self {
            chat_id: group.chat_id,
            title: group.title,
            created_at: group.created_at.to_rfc3339(),
        }
    }
}

/// Notification channel response
#[derive(Debug, Serialize)]
pub struct ChannelResponse {
    pub id: String,
    pub name: String,
    pub chat_id: i64,
    pub created_at: String,
}

impl From<Channel> for ChannelResponse {
    fn from(channel: Channel) -> Self {
        Self {
            id: channel.id.to_string(),
            name: channel.name,
            chat_id: channel.chat_id,
            created_at: channel.created_at.to_rfc3339(),
        }
    }
}

/// API key response (digest never leaves the database)
#[derive(Debug, Serialize)]
pub struct ApiKeyResponse {
    pub id: String,
    pub name: String,
    pub prefix: String,
    pub created_at: String,
    pub last_used_at: Option<String>,
}

impl From<ApiKey> for ApiKeyResponse {
    fn from(key: ApiKey) -> Self {
        Self {
            id: key.id.to_string(),
            name: key.name,
            prefix: key.prefix,
            created_at: key.created_at.to_rfc3339(),
            last_used_at: key.last_used_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// API key creation response. The plaintext key appears here and
/// nowhere else.
#[derive(Debug, Serialize)]
pub struct CreatedApiKeyResponse {
    pub id: String,
    pub name: String,
    pub prefix: String,
    pub key: String,
    pub created_at: String,
}

impl CreatedApiKeyResponse {
    pub fn from_key(key: ApiKey, plaintext: String) -> Self {
        Self {
            id: key.id.to_string(),
            name: key.name,
            prefix: key.prefix,
            key: plaintext,
            created_at: key.created_at.to_rfc3339(),
        }
    }
}

/// Runtime settings response. Settings are returned in full so the
/// panel can merge edits into the current document.
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub configured: bool,
    pub settings: Option<RuntimeConfig>,
}

impl SettingsResponse {
    pub fn configured(settings: RuntimeConfig) -> Self {
        Self {
            configured: true,
            settings: Some(settings),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            settings: None,
        }
    }
}

/// First-run setup response
#[derive(Debug, Serialize)]
pub struct SetupResponse {
    pub user: UserResponse,
}

/// Notification delivery response
#[derive(Debug, Serialize)]
pub struct NotifyResponse {
    pub status: String,
    pub channel: String,
    pub chat_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    // ==========================================================================
    // Response Serialization Tests
    // ==========================================================================

    #[test]
    fn test_user_response_never_contains_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            username: "admin".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$secret".to_string(),
            role: crate::domain::UserRole::Admin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("admin"));
    }

    #[test]
    fn test_created_api_key_response_carries_plaintext_once() {
        let (key, plaintext) = ApiKey::mint("ci");
        let response = CreatedApiKeyResponse::from_key(key, plaintext.clone());

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(&plaintext));
    }

    #[test]
    fn test_unconfigured_settings_response_has_null_settings() {
        let json = serde_json::to_string(&SettingsResponse::unconfigured()).unwrap();
        assert!(json.contains(r#""configured":false"#));
        assert!(json.contains(r#""settings":null"#));
    }
}
