//! Telegram Bot API Client
//!
//! Thin reqwest wrapper around the handful of Bot API methods this
//! service calls. One instance is built per configured token and
//! swapped out wholesale when the credential changes.

use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use super::types::{command_menu, ApiResponse, Message};
use crate::config::BotSettings;

/// Header Telegram attaches to webhook deliveries when a secret token
/// was supplied at registration time.
pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Updates the webhook registration asks Telegram to deliver.
const ALLOWED_UPDATES: [&str; 2] = ["message", "my_chat_member"];

#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("telegram request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("telegram api error: {0}")]
    Api(String),
}

/// Client bound to a single bot token.
#[derive(Clone)]
pub struct BotClient {
    token: String,
    api_base: String,
    http: reqwest::Client,
}

impl BotClient {
    pub fn new(token: &str, settings: &BotSettings) -> Result<Self, BotError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_seconds))
            .build()?;

        Ok(Self {
            token: token.to_string(),
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// The token this client was built with. The webhook route uses it
    /// to reject deliveries addressed to a stale path.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<Message, BotError> {
        self.call(
            "sendMessage",
            &json!({
                "chat_id": chat_id,
                "text": text,
            }),
        )
        .await
    }

    pub async fn set_webhook(&self, url: &str, secret_token: &str) -> Result<bool, BotError> {
        self.call(
            "setWebhook",
            &json!({
                "url": url,
                "secret_token": secret_token,
                "allowed_updates": ALLOWED_UPDATES,
            }),
        )
        .await
    }

    pub async fn delete_webhook(&self) -> Result<bool, BotError> {
        self.call("deleteWebhook", &json!({ "drop_pending_updates": false }))
            .await
    }

    pub async fn set_my_commands(&self) -> Result<bool, BotError> {
        self.call("setMyCommands", &json!({ "commands": command_menu() }))
            .await
    }

    async fn call<R: DeserializeOwned>(
        &self,
        method: &str,
        payload: &impl Serialize,
    ) -> Result<R, BotError> {
        let response = self
            .http
            .post(self.method_url(method))
            .json(payload)
            .send()
            .await?;

        // Telegram wraps errors in the same envelope as successes, so the
        // body is decoded before the status is consulted.
        let envelope: ApiResponse<R> = response.json().await?;
        unwrap_envelope(envelope, method)
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }
}

fn unwrap_envelope<R>(envelope: ApiResponse<R>, method: &str) -> Result<R, BotError> {
    if !envelope.ok {
        let description = envelope
            .description
            .unwrap_or_else(|| "no description".to_string());
        return Err(BotError::Api(format!("{}: {}", method, description)));
    }

    envelope
        .result
        .ok_or_else(|| BotError::Api(format!("{}: empty result", method)))
}

impl fmt::Debug for BotClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotClient")
            .field("token", &"***")
            .field("api_base", &self.api_base)
            .finish()
    }
}
