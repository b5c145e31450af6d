//! Update receiver built on long polling.

use crate::client::TelegramClient;
use crate::types::Message;
use std::time::Duration;
use tokio::time::sleep;
use tokio_stream::Stream;
use tracing::{debug, error};

/// Receiver that turns `getUpdates` long polling into a message stream.
pub struct UpdateReceiver {
    client: TelegramClient,
    poll_timeout: Duration,
}

impl UpdateReceiver {
    /// Create a new receiver.
    pub fn new(client: TelegramClient, poll_timeout: Duration) -> Self {
        Self {
            client,
            poll_timeout,
        }
    }

    /// Start receiving text messages as an async stream.
    ///
    /// Non-text updates (stickers, photos, service messages) are skipped.
    pub fn stream(self) -> impl Stream<Item = Message> {
        async_stream::stream! {
            let mut offset = 0i64;

            loop {
                match self.client.get_updates(offset, self.poll_timeout).await {
                    Ok(updates) => {
                        for update in updates {
                            offset = offset.max(update.update_id + 1);

                            let Some(message) = update.message else {
                                continue;
                            };
                            if message.text.is_none() {
                                continue;
                            }

                            let preview: String =
                                message.text_or_empty().chars().take(50).collect();
                            debug!("Received: {} from chat {}", preview, message.chat.id);
                            yield message;
                        }
                    }
                    Err(e) => {
                        error!("Receive error: {}", e);
                        // Back off on error
                        sleep(Duration::from_secs(5)).await;
                    }
                }
            }
        }
    }
}
