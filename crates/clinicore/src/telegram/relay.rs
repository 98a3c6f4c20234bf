use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::html;

use super::{updates, Messenger, PendingChat, RelayError};
use crate::i18n::{self, DEFAULT_LANG};
use crate::intake::OutboundPayload;

/// Messenger backed by the Telegram Bot API.
#[derive(Clone)]
pub struct TeloxideMessenger {
    bot: Bot,
}

impl TeloxideMessenger {
    pub fn new(token: &str) -> Self {
        Self { bot: Bot::new(token) }
    }

    /// Wraps an existing bot (tests point it at a mock API server).
    pub fn from_bot(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Messenger for TeloxideMessenger {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), RelayError> {
        let chat: i64 = chat_id
            .trim()
            .parse()
            .map_err(|_| RelayError::InvalidChatId(chat_id.to_string()))?;

        self.bot
            .send_message(ChatId(chat), text)
            .parse_mode(ParseMode::Html)
            .await?;

        tracing::info!(chat_id = chat, "relay message sent");
        Ok(())
    }

    async fn pending_chats(&self) -> Result<Vec<PendingChat>, RelayError> {
        let updates = self.bot.get_updates().await?;
        tracing::debug!(updates = updates.len(), "fetched pending updates");
        Ok(updates::pending_chats(&updates))
    }
}

/// Doctor-facing notification for a new inquiry, in the visitor's locale
/// (default locale when unsupported). Values are HTML-escaped.
pub fn format_inquiry_message(payload: &OutboundPayload, locale: &str) -> String {
    let lang = i18n::lang_from_code(locale).unwrap_or_else(|| DEFAULT_LANG.clone());
    let label = |key: &str| i18n::t(&lang, key);

    let message = if payload.message.trim().is_empty() {
        format!("<i>{}</i>", html::escape(&label("relay-no-message")))
    } else {
        html::escape(&payload.message)
    };

    format!(
        "<b>{title}</b>\n\n\
         <b>{name_l}:</b> {name}\n\
         <b>{phone_l}:</b> {phone}\n\
         <b>{email_l}:</b> {email}\n\
         <b>{birth_l}:</b> {birth}\n\
         <b>{subject_l}:</b> {subject}\n\n\
         <b>{message_l}:</b>\n{message}",
        title = html::escape(&label("relay-title")),
        name_l = label("relay-name"),
        name = html::escape(&payload.name),
        phone_l = label("relay-phone"),
        phone = html::escape(&payload.phone),
        email_l = label("relay-email"),
        email = html::escape(&payload.email),
        birth_l = label("relay-birth-date"),
        birth = html::escape(&payload.birth_date),
        subject_l = label("relay-subject"),
        subject = html::escape(&payload.subject_name),
        message_l = label("relay-message"),
        message = message,
    )
}
