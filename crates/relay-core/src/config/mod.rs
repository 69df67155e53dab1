mod defaults;

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::RelayError;
use defaults::*;

/// Raw `KEY=VALUE` pairs read from an env file.
pub type EnvMap = HashMap<String, String>;

/// Name of the env file looked up next to the executable.
pub const ENV_FILE_NAME: &str = ".env";

/// Bot token key.
pub const KEY_BOT_TOKEN: &str = "GEMINI_BOT_TOKEN";
/// Comma-separated authorized chat ids.
pub const KEY_ALLOWED_IDS: &str = "ALLOWED_USER_ID";
pub const KEY_API_URL: &str = "TELEGRAM_API_URL";
pub const KEY_ASSISTANT_BIN: &str = "ASSISTANT_BIN";
pub const KEY_ASSISTANT_TIMEOUT: &str = "ASSISTANT_TIMEOUT_SECS";
pub const KEY_POLL_TIMEOUT: &str = "POLL_TIMEOUT_SECS";
pub const KEY_POLL_INTERVAL: &str = "POLL_INTERVAL_MS";
pub const KEY_ERROR_BACKOFF: &str = "POLL_ERROR_BACKOFF_SECS";

/// Top-level relay configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub assistant: AssistantConfig,
}

/// Telegram bot config.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Chat ids allowed to talk to the bot.
    pub allowed_chats: Vec<String>,
    /// Bot API base URL, without the `/bot<token>` suffix.
    pub api_url: String,
    /// `timeout` parameter sent to `getUpdates`.
    pub poll_timeout_secs: u64,
    /// Pause after each processed batch.
    pub poll_interval_ms: u64,
    /// First backoff after a failed poll; doubles up to a minute.
    pub error_backoff_secs: u64,
}

/// Assistant CLI config.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub binary: String,
    /// `None` lets the child run as long as it wants.
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Resolve from the env file, falling back to process environment variables.
    pub fn resolve(file: &EnvMap) -> Result<Self, RelayError> {
        Self::resolve_with(file, |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit fallback lookup. File values win over the fallback.
    pub fn resolve_with<F>(file: &EnvMap, fallback: F) -> Result<Self, RelayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| -> Option<String> {
            file.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .or_else(|| fallback(key).map(|v| v.trim().to_string()))
                .filter(|v| !v.is_empty())
        };

        let bot_token = lookup(KEY_BOT_TOKEN);
        let allowed_raw = lookup(KEY_ALLOWED_IDS);
        let (bot_token, allowed_raw) = match (bot_token, allowed_raw) {
            (Some(t), Some(a)) => (t, a),
            _ => {
                return Err(RelayError::Config(format!(
                    "{KEY_BOT_TOKEN} and {KEY_ALLOWED_IDS} must be set in the env file \
                     or the process environment"
                )))
            }
        };

        let allowed_chats = parse_id_list(&allowed_raw);
        if allowed_chats.is_empty() {
            return Err(RelayError::Config(format!(
                "{KEY_ALLOWED_IDS} contains no chat ids"
            )));
        }

        let assistant_timeout: u64 =
            parse_or(lookup(KEY_ASSISTANT_TIMEOUT), KEY_ASSISTANT_TIMEOUT, 0)?;

        Ok(Self {
            telegram: TelegramConfig {
                bot_token,
                allowed_chats,
                api_url: lookup(KEY_API_URL)
                    .map(|u| u.trim_end_matches('/').to_string())
                    .unwrap_or_else(default_api_url),
                poll_timeout_secs: parse_or(
                    lookup(KEY_POLL_TIMEOUT),
                    KEY_POLL_TIMEOUT,
                    default_poll_timeout_secs(),
                )?,
                poll_interval_ms: parse_or(
                    lookup(KEY_POLL_INTERVAL),
                    KEY_POLL_INTERVAL,
                    default_poll_interval_ms(),
                )?,
                error_backoff_secs: parse_or(
                    lookup(KEY_ERROR_BACKOFF),
                    KEY_ERROR_BACKOFF,
                    default_error_backoff_secs(),
                )?,
            },
            assistant: AssistantConfig {
                binary: lookup(KEY_ASSISTANT_BIN).unwrap_or_else(default_assistant_bin),
                timeout_secs: (assistant_timeout > 0).then_some(assistant_timeout),
            },
        })
    }
}

/// Split a comma-separated id list, dropping blanks.
pub fn parse_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_or<T: FromStr>(value: Option<String>, key: &str, default: T) -> Result<T, RelayError>
where
    T::Err: std::fmt::Display,
{
    match value {
        Some(v) => v
            .parse()
            .map_err(|e| RelayError::Config(format!("invalid {key} '{v}': {e}"))),
        None => Ok(default),
    }
}

/// Default env file location: `.env` next to the running executable.
///
/// Falls back to the working directory when the executable path is unknown.
pub fn default_env_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(ENV_FILE_NAME)
}

/// Load `KEY=VALUE` pairs from an env file.
///
/// Blank lines and `#` comments are skipped and quotes around values are
/// removed. Lines go through the dotenv parser first. A line it rejects (an
/// unquoted space, as in `ALLOWED_USER_ID=1, 2`) is read with the plain rule
/// instead: split on the first `=`, trim, strip quotes. Values are never
/// expanded, so a `$` stays as written.
///
/// A missing file is not fatal: values may still come from the process
/// environment, so an empty map is returned with a warning.
pub fn load_env(path: &Path) -> EnvMap {
    let mut vars = EnvMap::new();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("env file not found at {}", path.display());
            return vars;
        }
        Err(e) => {
            warn!("failed to read env file {}: {e}", path.display());
            return vars;
        }
    };

    for item in dotenvy::from_read_iter(content.as_bytes()) {
        match item {
            Ok((key, value)) => {
                vars.insert(key, value);
            }
            // The error text echoes the value, which may be the bot token.
            Err(_) => warn!(
                "{}: a line is not dotenv syntax, reading it as plain KEY=VALUE",
                path.display()
            ),
        }
    }

    for (key, value) in plain_pairs(&content) {
        let keep_parsed = vars.contains_key(&key) && !value.contains('$');
        if !keep_parsed {
            debug!("{key}: using the value as written in {}", path.display());
            vars.insert(key, value);
        }
    }

    debug!("loaded {} keys from {}", vars.len(), path.display());
    vars
}

/// Every `KEY=VALUE` line read with the plain rule. Later lines win.
fn plain_pairs(content: &str) -> EnvMap {
    content.lines().filter_map(plain_pair).collect()
}

/// Split one line on its first `=`; trim both sides and strip surrounding quotes.
fn plain_pair(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let key = key.strip_prefix("export ").map_or(key, str::trim);
    if key.is_empty() {
        return None;
    }
    let value = value.trim().trim_matches('"').trim_matches('\'');
    Some((key.to_string(), value.to_string()))
}
