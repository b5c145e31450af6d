//! Operator commands issued by replying to a relayed message.

use crate::error::AppResult;
use crate::transport::Transport;
use blocklist_store::BlocklistStore;
use tracing::info;

/// A parsed operator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Block,
    Unblock,
    Unknown,
}

impl Command {
    /// Parse operator text carrying the command prefix.
    pub fn parse(text: &str, prefix: &str) -> Self {
        let body = text.strip_prefix(prefix).unwrap_or(text);
        match body.trim().to_lowercase().as_str() {
            "help" => Command::Help,
            "block" => Command::Block,
            "unblock" => Command::Unblock,
            _ => Command::Unknown,
        }
    }
}

/// Executes operator commands against the blocklist.
///
/// The target correspondent is always the one the replied-to relayed message
/// decodes to; the interpreter never picks a destination on its own.
pub struct CommandInterpreter {
    blocklist: BlocklistStore,
    command_prefix: String,
    operator_chat: i64,
}

impl CommandInterpreter {
    pub fn new(blocklist: BlocklistStore, command_prefix: String, operator_chat: i64) -> Self {
        Self {
            blocklist,
            command_prefix,
            operator_chat,
        }
    }

    /// Run a command for the given correspondent and confirm to the operator.
    pub async fn execute<T: Transport>(
        &self,
        transport: &T,
        command: Command,
        response_id: u64,
    ) -> AppResult<()> {
        match command {
            Command::Help => {
                transport
                    .send_message(self.operator_chat, &self.help_text())
                    .await?;
            }
            Command::Block => {
                self.blocklist.block(response_id).await?;
                info!("Operator blocked {}", response_id);
                transport
                    .send_message(self.operator_chat, "User blocked.")
                    .await?;
            }
            Command::Unblock => {
                self.blocklist.unblock(response_id).await?;
                info!("Operator unblocked {}", response_id);
                transport
                    .send_message(self.operator_chat, "User unblocked.")
                    .await?;
            }
            Command::Unknown => {
                let notice = format!(
                    "Unknown command. Use {}help to list available commands.",
                    self.command_prefix
                );
                transport.send_message(self.operator_chat, &notice).await?;
            }
        }

        Ok(())
    }

    fn help_text(&self) -> String {
        let prefix = &self.command_prefix;
        format!(
            "Commands:\n\
             {prefix}help - Shows this message\n\
             {prefix}block - Blocks the user from contacting the bot\n\
             {prefix}unblock - Unblocks the user from contacting the bot"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_commands() {
        assert_eq!(Command::parse("!help", "!"), Command::Help);
        assert_eq!(Command::parse("!block", "!"), Command::Block);
        assert_eq!(Command::parse("!unblock", "!"), Command::Unblock);
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        assert_eq!(Command::parse("!BLOCK", "!"), Command::Block);
        assert_eq!(Command::parse("!  Help  ", "!"), Command::Help);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Command::parse("!banhammer", "!"), Command::Unknown);
        assert_eq!(Command::parse("!", "!"), Command::Unknown);
    }

    #[test]
    fn test_parse_custom_prefix() {
        assert_eq!(Command::parse("/block", "/"), Command::Block);
        assert_eq!(Command::parse("::unblock", "::"), Command::Unblock);
    }
}
