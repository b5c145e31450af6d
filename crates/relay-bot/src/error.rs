//! Application error types.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Telegram error: {0}")]
    Telegram(#[from] telegram_client::TelegramError),

    #[error("Storage error: {0}")]
    Storage(#[from] blocklist_store::StoreError),

    #[error("Codec error: {0}")]
    Codec(#[from] identity_codec::CodecError),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
