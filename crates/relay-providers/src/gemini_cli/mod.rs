//! Gemini CLI provider.
//!
//! Uses the locally installed `gemini` CLI as a subprocess.
//! No API keys needed; relies on the user's existing CLI authentication.

mod classify;
mod command;
mod provider;


use relay_core::config::AssistantConfig;
use std::time::Duration;
use tokio::process::Command;

pub use classify::{
    classify_failure, needs_fresh_session, FailureKind, CANCELLED_MESSAGE, CAPACITY_MESSAGE,
    EMPTY_REPLY_MESSAGE, TIMEOUT_MESSAGE,
};
pub use command::{build_args, CliOutput, SessionMode};

/// Gemini CLI provider configuration.
pub struct GeminiCliProvider {
    /// Executable name or path.
    binary: String,
    /// Subprocess timeout. `None` waits for the CLI however long it takes.
    timeout: Option<Duration>,
}

impl GeminiCliProvider {
    /// Create a provider from config values.
    pub fn from_config(config: &AssistantConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
        }
    }

    /// The executable this provider launches.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Check if the CLI is installed and accessible.
    pub async fn check_cli(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .output()
            .await
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}
