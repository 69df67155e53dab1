//! Provider trait implementation with the resume → fresh-session fallback.

use super::classify::{needs_fresh_session, render_reply, TIMEOUT_MESSAGE};
use super::command::{CliOutput, SessionMode};
use super::GeminiCliProvider;
use async_trait::async_trait;
use relay_core::{
    error::RelayError,
    sanitize::{preview, strip_ansi},
    traits::Provider,
};
use std::future::Future;
use std::io::ErrorKind;
use std::time::Instant;
use tracing::{info, warn};

#[async_trait]
impl Provider for GeminiCliProvider {
    fn name(&self) -> &str {
        "gemini-cli"
    }

    async fn invoke(&self, prompt: &str, session_id: &str) -> String {
        let start = Instant::now();
        info!("gemini run (session {session_id}): {}", preview(prompt, 50));

        let result = run_with_fallback(|mode| self.run_cli(mode, session_id, prompt)).await;

        let reply = match result {
            Ok(output) => {
                if !output.success {
                    warn!(
                        "gemini exited with an error: {}",
                        preview(&strip_ansi(&output.stderr), 200)
                    );
                }
                render_reply(&output)
            }
            Err(e) => self.launch_failure_reply(&e),
        };

        info!(
            "gemini finished in {}ms ({} chars)",
            start.elapsed().as_millis(),
            reply.chars().count()
        );
        reply
    }

    async fn is_available(&self) -> bool {
        self.check_cli().await
    }
}

impl GeminiCliProvider {
    /// User-facing text for a run that never produced an exit status.
    pub(super) fn launch_failure_reply(&self, err: &RelayError) -> String {
        match err {
            RelayError::Io(e) if e.kind() == ErrorKind::NotFound => {
                warn!("assistant executable '{}' not found", self.binary);
                format!(
                    "❌ Assistant executable '{}' not found. Check your PATH.",
                    self.binary
                )
            }
            RelayError::Timeout(detail) => {
                warn!("assistant killed: {detail}");
                TIMEOUT_MESSAGE.to_string()
            }
            other => {
                warn!("failed to run assistant: {other}");
                format!("❌ Failed to run assistant: {other}")
            }
        }
    }
}

/// Resume the session; if the CLI says there is none, start it fresh once.
///
/// `attempt` performs a single CLI run in the given mode.
pub(super) async fn run_with_fallback<F, Fut>(mut attempt: F) -> Result<CliOutput, RelayError>
where
    F: FnMut(SessionMode) -> Fut,
    Fut: Future<Output = Result<CliOutput, RelayError>>,
{
    let first = attempt(SessionMode::Resume).await?;
    if first.success || !needs_fresh_session(&first.stderr) {
        return Ok(first);
    }

    info!("no saved session to resume, starting a fresh one");
    attempt(SessionMode::Create).await
}
