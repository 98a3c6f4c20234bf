use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use teloxide::types::{Message, Update, UpdateKind};

/// A chat that messaged the bot, as shown to the operator so the chat id
/// can be copied into the doctor directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingChat {
    pub chat_id: String,
    pub user_name: String,
    pub message: String,
    /// RFC 3339
    pub date: String,
}

impl PendingChat {
    fn from_message(msg: &Message) -> Self {
        let user_name = msg
            .from
            .as_ref()
            .map(|user| match &user.last_name {
                Some(last) => format!("{} {}", user.first_name, last),
                None => user.first_name.clone(),
            })
            .unwrap_or_default();

        Self {
            chat_id: msg.chat.id.0.to_string(),
            user_name,
            message: msg.text().unwrap_or("No text").to_string(),
            date: msg.date.to_rfc3339(),
        }
    }
}

/// Message updates projected to [`PendingChat`]s, one per chat, keeping the
/// first occurrence. Non-message updates are skipped.
pub fn pending_chats(updates: &[Update]) -> Vec<PendingChat> {
    let mut seen = HashSet::new();
    updates
        .iter()
        .filter_map(|update| match &update.kind {
            UpdateKind::Message(msg) => Some(msg),
            _ => None,
        })
        .filter(|msg| seen.insert(msg.chat.id))
        .map(PendingChat::from_message)
        .collect()
}
