use chrono::{DateTime, Utc};

/// One inbound event from a channel's poll endpoint.
#[derive(Debug, Clone)]
pub struct Update {
    /// Monotonic identifier assigned by the platform.
    pub update_id: i64,
    /// Absent for update kinds the bridge does not handle (edits, joins, ...).
    pub message: Option<IncomingMessage>,
}

/// An incoming chat message.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Platform-specific chat id, used both for auth and as the reply target.
    pub chat_id: String,
    /// Message text content. `None` for stickers, photos, etc.
    pub text: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl IncomingMessage {
    /// Non-empty text body, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

/// An outgoing message to send back through a channel.
#[derive(Debug, Clone)]
pub struct OutgoingMessage {
    pub text: String,
    /// Platform-specific target for routing (e.g. Telegram chat_id).
    pub reply_target: Option<String>,
}

impl OutgoingMessage {
    /// Build a text reply addressed to a chat.
    pub fn to_chat(chat_id: &str, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reply_target: Some(chat_id.to_string()),
        }
    }
}
