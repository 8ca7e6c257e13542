//! Error types for songbox-bot

use thiserror::Error;

/// Errors surfaced by update handlers
#[derive(Error, Debug)]
pub enum Error {
    /// Telegram Bot API request failed
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// Catalog or storage failure
    #[error(transparent)]
    Common(#[from] songbox_common::Error),
}

/// Convenience Result type using songbox-bot Error
pub type Result<T> = std::result::Result<T, Error>;
