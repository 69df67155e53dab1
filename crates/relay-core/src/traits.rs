use crate::{
    error::RelayError,
    message::{OutgoingMessage, Update},
};
use async_trait::async_trait;

/// AI assistant provider trait.
///
/// Implementations never fail: every outcome, including a missing executable
/// or a crashed process, is rendered into text a chat user can read.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Send a prompt within the named conversation session and return the reply text.
    async fn invoke(&self, prompt: &str, session_id: &str) -> String;

    /// Check if the provider is available and ready.
    async fn is_available(&self) -> bool;
}

/// Messaging channel trait.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Fetch updates starting at `offset`. Blocks up to the channel's long-poll timeout.
    async fn fetch_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, RelayError>;

    /// Send a message back through this channel.
    async fn send(&self, message: OutgoingMessage) -> Result<(), RelayError>;

    /// One-off setup before polling starts (e.g. registering a command menu).
    async fn prepare(&self) {}
}
