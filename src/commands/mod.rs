//! Built-in bot commands and the fixed texts the bridge sends on its own.

#[cfg(test)]
mod tests;

/// Reply to `/start`.
pub const GREETING_MESSAGE: &str =
    "Hello! I'm a bot connected to your local Gemini CLI. Ask me anything.";

/// Reply to `/help`.
pub const HELP_MESSAGE: &str = "Send any text and I'll pass it to your local assistant.\n\n\
     /start - say hello\n\
     /help - show this message\n\
     /save_context - summarize this session into context_history.md";

/// Placeholder sent before a prompt goes to the assistant.
pub const THINKING_MESSAGE: &str = "🤔 Thinking...";

/// Acknowledgement sent before the save-context prompt runs.
pub const SAVE_CONTEXT_ACK: &str = "💾 Compressing and saving the conversation context...";

/// Prompt sent to the assistant for `/save_context`.
pub const SAVE_CONTEXT_PROMPT: &str = "Summarize the conversation so far, the project's progress, \
     and the key decisions made, and save it to a file named 'context_history.md'. \
     Be specific enough that the work can be resumed later by reading that file.";

/// Reserved commands, matched on the exact message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    SaveContext,
}

impl Command {
    /// Parse a command. Anything other than an exact match goes to the assistant.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "/start" => Some(Self::Start),
            "/help" => Some(Self::Help),
            "/save_context" => Some(Self::SaveContext),
            _ => None,
        }
    }
}
