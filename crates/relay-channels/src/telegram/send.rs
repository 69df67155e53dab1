//! Message sending and command registration.

use super::types::TgResponse;
use super::{TelegramChannel, MAX_MESSAGE_CHARS};
use crate::utils::split_message;
use relay_core::error::RelayError;
use tracing::{debug, info, warn};

impl TelegramChannel {
    /// Send a plain-text message to a chat, split into chunks that fit the limit.
    pub(crate) async fn send_text(&self, chat_id: &str, text: &str) -> Result<(), RelayError> {
        let chunks = split_message(text, MAX_MESSAGE_CHARS);
        if chunks.len() > 1 {
            debug!("splitting {} chars into {} messages", text.chars().count(), chunks.len());
        }

        for chunk in chunks {
            let url = format!("{}/sendMessage", self.base_url);
            let body = serde_json::json!({
                "chat_id": chat_id,
                "text": chunk,
            });

            let resp = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| RelayError::Channel(format!("telegram send failed: {e}")))?;

            let status = resp.status();
            let result: TgResponse<serde_json::Value> = resp.json().await.map_err(|e| {
                RelayError::Channel(format!("telegram send response unreadable ({status}): {e}"))
            })?;

            if !result.ok {
                return Err(RelayError::Channel(format!(
                    "telegram send failed ({status}): {}",
                    result.description.unwrap_or_default()
                )));
            }
        }

        Ok(())
    }

    /// Register bot commands with Telegram so users see an autocomplete menu.
    /// Best-effort: logs failures but does not propagate errors.
    pub(crate) async fn register_commands(&self) {
        let commands = serde_json::json!({
            "commands": [
                { "command": "start", "description": "Say hello" },
                { "command": "help", "description": "Show available commands" },
                { "command": "save_context", "description": "Summarize this session to a file" },
            ]
        });

        let url = format!("{}/setMyCommands", self.base_url);
        match self.client.post(&url).json(&commands).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("registered Telegram bot commands");
            }
            Ok(resp) => {
                let body = resp.text().await.unwrap_or_default();
                warn!("failed to register Telegram bot commands: {body}");
            }
            Err(e) => {
                warn!("failed to register Telegram bot commands: {e}");
            }
        }
    }
}
