//! CLI argument building and subprocess execution.

use super::GeminiCliProvider;
use relay_core::{error::RelayError, sanitize::preview};
use tokio::process::Command;
use tracing::debug;

/// Auto-approve every tool call; there is no terminal to confirm on.
const AUTO_APPROVE_FLAG: &str = "--yolo";

/// How a run addresses the named conversation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Continue an existing session.
    Resume,
    /// Start a new session under the given label.
    Create,
}

impl SessionMode {
    fn flag(self) -> &'static str {
        match self {
            Self::Resume => "--resume",
            Self::Create => "--session",
        }
    }
}

/// Captured result of one CLI run.
#[derive(Debug, Clone, Default)]
pub struct CliOutput {
    /// Exit status was zero.
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Argument list for one run. The prompt is always last.
pub fn build_args(mode: SessionMode, session_id: &str, prompt: &str) -> Vec<String> {
    vec![
        AUTO_APPROVE_FLAG.to_string(),
        mode.flag().to_string(),
        session_id.to_string(),
        prompt.to_string(),
    ]
}

impl GeminiCliProvider {
    /// Run the CLI once and capture its output.
    ///
    /// Errors only when the process could not be started or hit the timeout
    /// ([`RelayError::Timeout`]);
    /// a non-zero exit is reported through [`CliOutput::success`].
    pub(super) async fn run_cli(
        &self,
        mode: SessionMode,
        session_id: &str,
        prompt: &str,
    ) -> Result<CliOutput, RelayError> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(build_args(mode, session_id, prompt)).kill_on_drop(true);

        debug!(
            "executing: {} {} {} {session_id} <prompt: {}>",
            self.binary,
            AUTO_APPROVE_FLAG,
            mode.flag(),
            preview(prompt, 50)
        );

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| {
                    RelayError::Timeout(format!(
                        "{} ran longer than {}s",
                        self.binary,
                        limit.as_secs()
                    ))
                })??,
            None => cmd.output().await?,
        };

        Ok(CliOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
