//! Telegram Bot API types.
//!
//! Only the subset the relay needs: text messages, their senders, and the
//! message a reply points back to.

use serde::{Deserialize, Serialize};

/// Envelope every Bot API response arrives in.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

/// A single long-poll update.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

/// An inbound or quoted message.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
    pub reply_to_message: Option<Box<Message>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: u64,
    pub is_bot: bool,
    pub first_name: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// `sendMessage` request body.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    pub chat_id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
}

/// `getUpdates` request body.
#[derive(Debug, Clone, Serialize)]
pub struct GetUpdatesRequest {
    pub offset: i64,
    pub timeout: u64,
    pub allowed_updates: Vec<String>,
}

impl User {
    /// Display name: username when set, first name otherwise.
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.first_name)
    }
}

impl Message {
    /// Sender id, if Telegram attached one.
    pub fn sender_id(&self) -> Option<u64> {
        self.from.as_ref().map(|u| u.id)
    }

    /// Message text, empty for non-text messages.
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Whether this message quotes another.
    pub fn is_reply(&self) -> bool {
        self.reply_to_message.is_some()
    }
}
