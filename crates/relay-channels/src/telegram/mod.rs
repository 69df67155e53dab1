//! Telegram Bot API channel.
//!
//! Uses long polling via `getUpdates` and `sendMessage` for responses.
//! Docs: <https://core.telegram.org/bots/api>

mod polling;
mod send;
pub(crate) mod types;


use relay_core::config::TelegramConfig;
use std::time::Duration;

/// Telegram's per-message length limit, in UTF-16 code units.
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Extra time on top of the long-poll timeout before the HTTP request gives up.
const POLL_REQUEST_SLACK: Duration = Duration::from_secs(5);

/// Telegram channel using the Bot API with long polling.
///
/// Holds no poll state of its own: the caller passes the update offset on
/// every fetch.
pub struct TelegramChannel {
    client: reqwest::Client,
    base_url: String,
    poll_timeout: Duration,
}

impl TelegramChannel {
    /// Create a new Telegram channel from config.
    pub fn new(config: &TelegramConfig) -> Self {
        let base_url = format!("{}/bot{}", config.api_url, config.bot_token);
        Self {
            client: reqwest::Client::new(),
            base_url,
            poll_timeout: Duration::from_secs(config.poll_timeout_secs),
        }
    }
}
