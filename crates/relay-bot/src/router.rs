//! Relay router: classifies every inbound event and performs the relay.

use crate::commands::{Command, CommandInterpreter};
use crate::config::RelayConfig;
use crate::error::{AppError, AppResult};
use crate::transport::Transport;
use blocklist_store::BlocklistStore;
use telegram_client::{Message, User};
use tracing::{debug, error, info, warn};

/// Classification of an inbound event.
///
/// Exactly one class applies per event; `classify` checks them in this
/// order. Notably, an operator self-reply outside the operator chat falls
/// through to `Ignored` rather than being routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayClass {
    /// First contact from a correspondent.
    NewInbound,
    /// A correspondent replying within an existing conversation.
    ReplyInbound,
    /// The operator replying to a relayed message in the operator chat.
    OwnerReply,
    /// Anything else, including bot senders.
    Ignored,
}

/// Classify an inbound message. Pure; consults no external state.
pub fn classify(message: &Message, operator_id: u64) -> RelayClass {
    let Some(sender) = message.from.as_ref() else {
        return RelayClass::Ignored;
    };
    if sender.is_bot {
        return RelayClass::Ignored;
    }

    if !message.is_reply() && sender.id != operator_id {
        return RelayClass::NewInbound;
    }
    if message.is_reply() && sender.id != operator_id {
        return RelayClass::ReplyInbound;
    }
    if message.is_reply()
        && sender.id == operator_id
        && message.chat.id == operator_id as i64
    {
        return RelayClass::OwnerReply;
    }

    RelayClass::Ignored
}

/// The relay router.
///
/// Owns the construction of relayed messages and the handoff to the command
/// interpreter; blocked-state truth lives solely in the blocklist store.
pub struct RelayRouter<T: Transport> {
    transport: T,
    blocklist: BlocklistStore,
    interpreter: CommandInterpreter,
    operator_id: u64,
    operator_chat: i64,
    command_prefix: String,
    blocked_notice: String,
}

impl<T: Transport> RelayRouter<T> {
    pub fn new(transport: T, blocklist: BlocklistStore, config: &RelayConfig) -> Self {
        let operator_chat = config.operator_id as i64;
        let interpreter = CommandInterpreter::new(
            blocklist.clone(),
            config.command_prefix.clone(),
            operator_chat,
        );

        Self {
            transport,
            blocklist,
            interpreter,
            operator_id: config.operator_id,
            operator_chat,
            command_prefix: config.command_prefix.clone(),
            blocked_notice: format!(
                "You are currently blocked from contacting {}.",
                config.operator_name
            ),
        }
    }

    /// Handle one inbound event to completion.
    pub async fn handle(&self, message: &Message) -> AppResult<()> {
        match classify(message, self.operator_id) {
            RelayClass::Ignored => {
                debug!("Ignoring update in chat {}", message.chat.id);
                Ok(())
            }
            RelayClass::NewInbound | RelayClass::ReplyInbound => {
                self.relay_inbound(message).await
            }
            RelayClass::OwnerReply => self.route_owner_reply(message).await,
        }
    }

    /// Forward a correspondent's message to the operator chat, tagged with
    /// the sender's encoded identity.
    async fn relay_inbound(&self, message: &Message) -> AppResult<()> {
        // classify only returns an inbound class when a sender is present
        let Some(sender) = message.from.as_ref() else {
            return Ok(());
        };

        if self.blocklist.is_blocked(sender.id).await {
            debug!("Dropping message from blocked correspondent {}", sender.id);
            self.transport.reply(message, &self.blocked_notice).await?;
            return Ok(());
        }

        let header = match message.reply_to_message.as_deref() {
            Some(original) => {
                let original_name = original
                    .from
                    .as_ref()
                    .map(User::display_name)
                    .unwrap_or("unknown");
                format!(
                    "[{}#{}] replied to [{}] - {}\nOriginal Message: {}",
                    sender.display_name(),
                    sender.id,
                    original_name,
                    message.text_or_empty(),
                    original.text_or_empty()
                )
            }
            None => format!(
                "[{}#{}] - {}",
                sender.display_name(),
                sender.id,
                message.text_or_empty()
            ),
        };

        let relayed = identity_codec::tag(&header, sender.id);
        self.transport
            .send_message(self.operator_chat, &relayed)
            .await?;

        info!("Relayed message from {} to operator", sender.id);
        Ok(())
    }

    /// Route an operator reply back to the correspondent its quoted relayed
    /// message decodes to, or hand it to the command interpreter.
    async fn route_owner_reply(&self, message: &Message) -> AppResult<()> {
        let Some(original) = message.reply_to_message.as_deref() else {
            return Ok(());
        };

        let response_id = match identity_codec::extract_id(original.text_or_empty()) {
            Ok(id) => id,
            Err(e) => {
                // Never guess a destination from a malformed marker.
                warn!("Failed to decode routing marker: {}", e);
                self.transport
                    .send_message(
                        self.operator_chat,
                        "Could not determine the original sender of that message.",
                    )
                    .await?;
                return Ok(());
            }
        };

        let text = message.text_or_empty();
        if text.starts_with(&self.command_prefix) {
            let command = Command::parse(text, &self.command_prefix);
            match self
                .interpreter
                .execute(&self.transport, command, response_id)
                .await
            {
                Ok(()) => {}
                Err(AppError::Storage(e)) => {
                    error!("Blocklist unavailable: {}", e);
                    self.transport
                        .send_message(
                            self.operator_chat,
                            "Something went wrong handling that command.",
                        )
                        .await?;
                }
                Err(e) => return Err(e),
            }
            return Ok(());
        }

        self.transport
            .send_message(response_id as i64, text)
            .await?;
        info!("Forwarded operator reply to {}", response_id);
        Ok(())
    }
}
