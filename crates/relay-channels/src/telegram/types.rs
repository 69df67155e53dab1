//! Telegram Bot API deserialization types.

use relay_core::message::{IncomingMessage, Update};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct TgResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgUpdate {
    pub update_id: i64,
    pub message: Option<TgMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgMessage {
    pub chat: TgChat,
    /// Unix timestamp of the message.
    #[serde(default)]
    pub date: i64,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgChat {
    pub id: TgChatId,
}

/// Chat ids are integers in the Bot API; string ids are accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum TgChatId {
    Int(i64),
    Str(String),
}

impl std::fmt::Display for TgChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TgChatId::Int(id) => write!(f, "{id}"),
            TgChatId::Str(id) => f.write_str(id),
        }
    }
}

impl From<TgUpdate> for Update {
    fn from(update: TgUpdate) -> Self {
        Update {
            update_id: update.update_id,
            message: update.message.map(|msg| IncomingMessage {
                chat_id: msg.chat.id.to_string(),
                text: msg.text,
                timestamp: chrono::DateTime::from_timestamp(msg.date, 0).unwrap_or_default(),
            }),
        }
    }
}
