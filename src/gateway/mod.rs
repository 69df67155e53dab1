//! Gateway: the polling loop connecting the chat channel and the assistant.
//!
//! Strictly sequential: fetch a batch, handle each update in order (auth,
//! reserved commands, assistant call, reply), pause, repeat. A slow assistant
//! call holds up every chat until it finishes.

mod cursor;


pub use cursor::UpdateCursor;

use crate::commands::{
    Command, GREETING_MESSAGE, HELP_MESSAGE, SAVE_CONTEXT_ACK, SAVE_CONTEXT_PROMPT,
    THINKING_MESSAGE,
};
use relay_core::{
    config::TelegramConfig,
    error::RelayError,
    message::{OutgoingMessage, Update},
    sanitize::preview,
    traits::{Channel, Provider},
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Upper bound for the poll error backoff.
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Lower bound for the first poll error backoff.
const MIN_BACKOFF: Duration = Duration::from_secs(1);

/// Assistant session label for a chat.
pub fn session_id_for(chat_id: &str) -> String {
    format!("tg_user_{chat_id}")
}

/// Double a poll error backoff, capped at [`MAX_BACKOFF`].
fn next_backoff(current: Duration) -> Duration {
    current.saturating_mul(2).min(MAX_BACKOFF)
}

/// The loop that routes chat messages to the assistant and back.
pub struct Gateway {
    channel: Arc<dyn Channel>,
    provider: Arc<dyn Provider>,
    allowed_chats: HashSet<String>,
    poll_interval: Duration,
    error_backoff: Duration,
}

impl Gateway {
    /// Create a new gateway.
    pub fn new(
        channel: Arc<dyn Channel>,
        provider: Arc<dyn Provider>,
        config: &TelegramConfig,
    ) -> Self {
        Self {
            channel,
            provider,
            allowed_chats: config.allowed_chats.iter().cloned().collect(),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            error_backoff: Duration::from_secs(config.error_backoff_secs)
                .clamp(MIN_BACKOFF, MAX_BACKOFF),
        }
    }

    /// Run until Ctrl-C.
    pub async fn run(&self) -> anyhow::Result<()> {
        info!(
            "relay gateway running | channel: {} | provider: {} | chats: {}",
            self.channel.name(),
            self.provider.name(),
            self.allowed_chats.len(),
        );

        self.channel.prepare().await;

        let mut cursor = UpdateCursor::default();
        tokio::select! {
            _ = self.poll_loop(&mut cursor) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal, shutting down. Bye!");
            }
        }

        Ok(())
    }

    /// Poll forever. Transport errors back off and retry; nothing here ends the loop.
    async fn poll_loop(&self, cursor: &mut UpdateCursor) {
        let mut backoff = self.error_backoff;

        loop {
            match self.poll_once(cursor).await {
                Ok(_) => {
                    backoff = self.error_backoff;
                    tokio::time::sleep(self.poll_interval).await;
                }
                Err(RelayError::Conflict(msg)) => {
                    error!(
                        "{msg} | another process is polling this bot or a webhook is set: \
                         stop the other instance or call deleteWebhook (retry in {}s)",
                        backoff.as_secs()
                    );
                    tokio::time::sleep(backoff).await;
                    backoff = next_backoff(backoff);
                }
                Err(e) => {
                    error!("poll error (retry in {}s): {e}", backoff.as_secs());
                    tokio::time::sleep(backoff).await;
                    backoff = next_backoff(backoff);
                }
            }
        }
    }

    /// Fetch one batch and handle it. Returns the number of updates seen.
    async fn poll_once(&self, cursor: &mut UpdateCursor) -> Result<usize, RelayError> {
        let updates = self.channel.fetch_updates(cursor.offset()).await?;
        let count = updates.len();
        if count > 0 {
            info!("received {count} update(s)");
        }

        for update in updates {
            self.handle_update(cursor, update).await;
        }

        Ok(count)
    }

    /// Handle one update. The cursor moves first, so a crash mid-handling
    /// never replays the same update forever.
    async fn handle_update(&self, cursor: &mut UpdateCursor, update: Update) {
        cursor.advance(update.update_id);

        let Some(msg) = update.message else {
            debug!("update {} has no message, skipping", update.update_id);
            return;
        };

        let chat_id = msg.chat_id.as_str();
        if !self.allowed_chats.contains(chat_id) {
            warn!("ignoring message from unauthorized chat {chat_id}");
            return;
        }

        let Some(text) = msg.text() else {
            debug!("message from {chat_id} has no text, skipping");
            return;
        };

        info!("message from {chat_id}: {}", preview(text, 50));
        let session_id = session_id_for(chat_id);

        match Command::parse(text) {
            Some(Command::Start) => self.reply(chat_id, GREETING_MESSAGE).await,
            Some(Command::Help) => self.reply(chat_id, HELP_MESSAGE).await,
            Some(Command::SaveContext) => {
                self.reply(chat_id, SAVE_CONTEXT_ACK).await;
                let response = self.provider.invoke(SAVE_CONTEXT_PROMPT, &session_id).await;
                self.reply(chat_id, &response).await;
            }
            None => {
                self.reply(chat_id, THINKING_MESSAGE).await;
                let response = self.provider.invoke(text, &session_id).await;
                self.reply(chat_id, &response).await;
            }
        }
    }

    /// Fire-and-forget send. A lost reply is logged, never fatal.
    async fn reply(&self, chat_id: &str, text: &str) {
        match self
            .channel
            .send(OutgoingMessage::to_chat(chat_id, text))
            .await
        {
            Ok(()) => debug!("sent reply to {chat_id} ({} chars)", text.chars().count()),
            Err(e) => warn!("failed to send reply to {chat_id}: {e}"),
        }
    }
}
