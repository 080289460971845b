//! Error types for the Oddsdesk application.

use thiserror::Error;

/// The main error type for Oddsdesk.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level HTTP failures (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned {status} for {url}")]
    Status { status: u16, url: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Channel communication errors
    #[error("Channel error: {0}")]
    Channel(String),

    /// Invalid input or state
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network connectivity errors
    #[error("Network error: {0}")]
    Network(String),

    /// Rate limiting errors
    #[error("Rate limited: retry after {0} seconds")]
    RateLimited(u64),
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new channel error.
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    /// Create a new invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new network error.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Check if this error is recoverable (the next poll may succeed).
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(_) | Self::RateLimited(_) | Self::Channel(_) | Self::Http(_) => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// The backend could not be reached at all, as opposed to answering
    /// with an error.
    pub fn is_offline(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Network(_))
    }

    /// Short user-facing notice for a failed fetch.
    pub fn notice(&self) -> String {
        match self {
            Self::Http(e) if e.is_timeout() => "request timed out".to_string(),
            Self::Http(_) | Self::Network(_) => "backend unreachable".to_string(),
            Self::Status { status: 401, .. } => "API key rejected".to_string(),
            Self::Status { status, .. } => format!("backend error ({status})"),
            Self::RateLimited(secs) => format!("rate limited, retry in {secs}s"),
            Self::Serialization(_) => "unexpected response from backend".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_recoverability() {
        let server = Error::Status {
            status: 503,
            url: "/api/odds/1".into(),
        };
        let client = Error::Status {
            status: 404,
            url: "/api/odds/1".into(),
        };
        assert!(server.is_recoverable());
        assert!(!client.is_recoverable());
        assert!(Error::RateLimited(5).is_recoverable());
        assert!(!Error::config("bad").is_recoverable());
    }

    #[test]
    fn test_notice_is_short() {
        let err = Error::Status {
            status: 401,
            url: "/api/fair/7".into(),
        };
        assert_eq!(err.notice(), "API key rejected");
        assert_eq!(Error::RateLimited(12).notice(), "rate limited, retry in 12s");

        let parse = serde_json::from_str::<Vec<u8>>("<html>").unwrap_err();
        assert_eq!(Error::from(parse).notice(), "unexpected response from backend");
    }

    #[test]
    fn test_offline_only_without_an_answer() {
        assert!(Error::network("connection refused").is_offline());
        assert!(!Error::RateLimited(5).is_offline());
        assert!(
            !Error::Status {
                status: 503,
                url: "/api/matches".into(),
            }
            .is_offline()
        );
    }
}
