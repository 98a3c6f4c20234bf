//! Telegram Bot API integration
//!
//! - `relay`: doctor notification message and the teloxide-backed messenger
//! - `updates`: pending chats used to onboard doctor chat ids

pub mod relay;
pub mod updates;

use async_trait::async_trait;
use thiserror::Error;

pub use relay::{format_inquiry_message, TeloxideMessenger};
pub use updates::{pending_chats, PendingChat};

/// Errors from the Bot API.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("invalid Telegram chat id '{0}'")]
    InvalidChatId(String),
}

/// Outbound messaging channel to doctors.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends one message. No retry; the caller decides what a failure means.
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), RelayError>;

    /// Chats that have messaged the bot and are waiting to be read.
    async fn pending_chats(&self) -> Result<Vec<PendingChat>, RelayError>;
}
