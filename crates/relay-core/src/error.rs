use thiserror::Error;

/// Top-level error type for relay.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Error from the assistant provider.
    #[error("provider error: {0}")]
    Provider(String),

    /// Error from a messaging channel.
    #[error("channel error: {0}")]
    Channel(String),

    /// Another client is already polling the same bot (HTTP 409).
    #[error("poll conflict: {0}")]
    Conflict(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The assistant process ran past its time limit and was killed.
    #[error("timed out: {0}")]
    Timeout(String),
}
