//! Turning CLI output into chat-ready reply text.

use super::command::CliOutput;
use relay_core::sanitize::{strip_ansi, truncate_chars};

/// Reply when the CLI reports exhausted quota or capacity.
pub const CAPACITY_MESSAGE: &str =
    "😅 The assistant is taking a break (usage limit reached).\nPlease ask again in a little while.";

/// Reply when the CLI reports the operation was cancelled.
pub const CANCELLED_MESSAGE: &str = "🛑 The operation was cancelled.";

/// Reply when the CLI ran past its time limit and was killed.
pub const TIMEOUT_MESSAGE: &str =
    "⏳ The assistant took too long to answer and was stopped. Please try again.";

/// Reply when the CLI succeeded but printed nothing.
pub const EMPTY_REPLY_MESSAGE: &str =
    "I received your message but the assistant returned an empty response. Please try again.";

/// Maximum characters of raw error output shown to the user.
const ERROR_EXCERPT_CHARS: usize = 300;

/// Why a failed run failed, decided from its error output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    CapacityExhausted,
    Cancelled,
    /// Sanitized, length-bounded excerpt of the error output.
    Other(String),
}

impl FailureKind {
    /// Text sent to the chat for this failure.
    pub fn into_reply(self) -> String {
        match self {
            Self::CapacityExhausted => CAPACITY_MESSAGE.to_string(),
            Self::Cancelled => CANCELLED_MESSAGE.to_string(),
            Self::Other(excerpt) => format!("⚠️ Assistant error:\n{excerpt}..."),
        }
    }
}

/// Whether a failed resume should be retried as a fresh session.
pub fn needs_fresh_session(stderr: &str) -> bool {
    stderr.contains("No previous sessions found") || stderr.to_lowercase().contains("not found")
}

/// Classify the error output of a failed run.
pub fn classify_failure(stderr: &str) -> FailureKind {
    let lower = stderr.to_lowercase();
    if lower.contains("exhausted your capacity") || lower.contains("quota") {
        FailureKind::CapacityExhausted
    } else if lower.contains("cancelled") || lower.contains("canceled") {
        FailureKind::Cancelled
    } else {
        let clean = strip_ansi(stderr);
        FailureKind::Other(truncate_chars(clean.trim(), ERROR_EXCERPT_CHARS).to_string())
    }
}

/// Reply text for a finished run, successful or not.
pub(super) fn render_reply(output: &CliOutput) -> String {
    if !output.success {
        return classify_failure(&output.stderr).into_reply();
    }

    let text = strip_ansi(&output.stdout);
    let text = text.trim();
    if text.is_empty() {
        EMPTY_REPLY_MESSAGE.to_string()
    } else {
        text.to_string()
    }
}
