//! Telegram Bot API HTTP client.

use crate::error::TelegramError;
use crate::types::*;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Slack on top of the long-poll timeout so reqwest never cuts a poll short.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(75);

/// Telegram Bot API client.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
    token: String,
}

impl TelegramClient {
    /// Create a new client for the given API host and bot token.
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, TelegramError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
        })
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.base_url, self.token)
    }

    /// Check if the Bot API accepts our token.
    pub async fn health_check(&self) -> bool {
        self.get_me().await.is_ok()
    }

    /// Fetch the bot's own account.
    #[instrument(skip(self))]
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        let response = self.client.post(self.api_url("getMe")).send().await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(TelegramError::Api(msg));
        }

        let body: ApiResponse<User> = response.json().await?;
        if !body.ok {
            return Err(TelegramError::Api(body.description.unwrap_or_default()));
        }
        body.result
            .ok_or_else(|| TelegramError::Api("empty getMe result".into()))
    }

    /// Long-poll for updates past `offset`.
    #[instrument(skip(self))]
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout: Duration,
    ) -> Result<Vec<Update>, TelegramError> {
        let request = GetUpdatesRequest {
            offset,
            timeout: timeout.as_secs(),
            allowed_updates: vec!["message".to_string()],
        };

        let response = self
            .client
            .post(self.api_url("getUpdates"))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(TelegramError::Api(msg));
        }

        let body: ApiResponse<Vec<Update>> = response.json().await?;
        if !body.ok {
            return Err(TelegramError::Api(body.description.unwrap_or_default()));
        }

        let updates = body.result.unwrap_or_default();
        debug!("Received {} updates", updates.len());
        Ok(updates)
    }

    /// Send a message to a chat.
    #[instrument(skip(self, text))]
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        let request = SendMessageRequest {
            chat_id,
            text: text.to_string(),
            reply_to_message_id: None,
        };
        self.send_request(request).await
    }

    /// Reply to a message in its own chat.
    pub async fn reply(&self, original: &Message, text: &str) -> Result<(), TelegramError> {
        let request = SendMessageRequest {
            chat_id: original.chat.id,
            text: text.to_string(),
            reply_to_message_id: Some(original.message_id),
        };
        self.send_request(request).await
    }

    async fn send_request(&self, request: SendMessageRequest) -> Result<(), TelegramError> {
        let chat_id = request.chat_id;
        let response = self
            .client
            .post(self.api_url("sendMessage"))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            warn!("Send to {} failed: {}", chat_id, msg);
            return Err(TelegramError::SendFailed(msg));
        }

        debug!("Sent message to chat {}", chat_id);
        Ok(())
    }
}
