//! `getUpdates` long polling and the Channel trait implementation.

use super::types::{TgResponse, TgUpdate};
use super::{TelegramChannel, POLL_REQUEST_SLACK};
use async_trait::async_trait;
use relay_core::{
    error::RelayError,
    message::{OutgoingMessage, Update},
    traits::Channel,
};
use tracing::debug;

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn fetch_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, RelayError> {
        let mut url = format!(
            "{}/getUpdates?timeout={}",
            self.base_url,
            self.poll_timeout.as_secs()
        );
        if let Some(off) = offset {
            url.push_str(&format!("&offset={off}"));
        }

        let resp = self
            .client
            .get(&url)
            .timeout(self.poll_timeout + POLL_REQUEST_SLACK)
            .send()
            .await
            .map_err(|e| RelayError::Channel(format!("telegram poll failed: {e}")))?;

        let status = resp.status();
        if status == reqwest::StatusCode::CONFLICT {
            let body = resp.text().await.unwrap_or_default();
            return Err(RelayError::Conflict(format!(
                "getUpdates returned {status}: {}",
                describe(&body)
            )));
        }

        let body: TgResponse<Vec<TgUpdate>> = resp.json().await.map_err(|e| {
            RelayError::Channel(format!("telegram poll parse failed ({status}): {e}"))
        })?;

        if !body.ok {
            return Err(RelayError::Channel(format!(
                "telegram API error ({status}): {}",
                body.description.unwrap_or_default()
            )));
        }

        let updates: Vec<Update> = body
            .result
            .unwrap_or_default()
            .into_iter()
            .map(Update::from)
            .collect();

        if !updates.is_empty() {
            debug!("telegram poll returned {} updates", updates.len());
        }
        Ok(updates)
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), RelayError> {
        let chat_id = message
            .reply_target
            .as_deref()
            .ok_or_else(|| RelayError::Channel("no reply_target on outgoing message".into()))?;

        self.send_text(chat_id, &message.text).await
    }

    async fn prepare(&self) {
        self.register_commands().await;
    }
}

/// Pull the `description` out of an error body, or return the raw body.
pub(super) fn describe(body: &str) -> String {
    serde_json::from_str::<TgResponse<serde_json::Value>>(body)
        .ok()
        .and_then(|r| r.description)
        .unwrap_or_else(|| body.to_string())
}
