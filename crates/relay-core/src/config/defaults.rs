//! Default values for optional configuration keys.

pub fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}

pub fn default_assistant_bin() -> String {
    "gemini".to_string()
}

pub fn default_poll_timeout_secs() -> u64 {
    10
}

pub fn default_poll_interval_ms() -> u64 {
    1000
}

pub fn default_error_backoff_secs() -> u64 {
    3
}
