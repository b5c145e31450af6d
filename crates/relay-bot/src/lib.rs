//! Anonymizing message relay for Telegram.
//!
//! Inbound messages from correspondents are forwarded to a single operator
//! chat with the sender's id embedded as an invisible marker; operator
//! replies are routed back to the correspondent the quoted marker decodes
//! to, or interpreted as block/unblock/help commands.

pub mod commands;
pub mod config;
pub mod error;
pub mod router;
pub mod transport;

pub use commands::{Command, CommandInterpreter};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use router::{classify, RelayClass, RelayRouter};
pub use transport::Transport;
