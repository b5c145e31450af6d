//! Transport capability used by the relay.
//!
//! The router and command interpreter talk to this trait rather than to the
//! Telegram client directly, so tests can substitute a fake transport.

use async_trait::async_trait;
use telegram_client::{Message, TelegramClient, TelegramError};

/// Outbound message capability.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a message to a chat.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TelegramError>;

    /// Reply to a message in its own chat.
    async fn reply(&self, original: &Message, text: &str) -> Result<(), TelegramError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        (**self).send_message(chat_id, text).await
    }

    async fn reply(&self, original: &Message, text: &str) -> Result<(), TelegramError> {
        (**self).reply(original, text).await
    }
}

#[async_trait]
impl Transport for TelegramClient {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        TelegramClient::send_message(self, chat_id, text).await
    }

    async fn reply(&self, original: &Message, text: &str) -> Result<(), TelegramError> {
        TelegramClient::reply(self, original, text).await
    }
}
