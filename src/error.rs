// src/error.rs

//! Unified error handling for the notifier.

use std::fmt;

use thiserror::Error;

/// Result type alias for notifier operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Required environment variables are absent or empty
    #[error("Missing required credentials: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Review API answered with a non-200 status
    #[error("Review API returned HTTP {status} for from_date={from_date}")]
    ServerConnection { status: u16, from_date: i64 },

    /// Request never produced a response (timeout, DNS, reset)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body does not have the expected shape
    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    /// A homework record could not be interpreted
    #[error("Cannot parse homework status: {0}")]
    ParseStatus(String),

    /// Message delivery failed
    #[error("Delivery error: {0}")]
    Delivery(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a transport error from any displayable cause.
    pub fn transport(cause: impl fmt::Display) -> Self {
        Self::Transport(cause.to_string())
    }

    /// Create a malformed-response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Create a status parsing error.
    pub fn parse_status(message: impl Into<String>) -> Self {
        Self::ParseStatus(message.into())
    }

    /// Create a delivery error.
    pub fn delivery(cause: impl fmt::Display) -> Self {
        Self::Delivery(cause.to_string())
    }

    /// Whether the failure is expected to clear up on the next poll.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::ServerConnection { .. } | Self::Delivery(_)
        )
    }
}

/// Category of a failed polling iteration, reported to the chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    ServerConnection,
    Transport,
    MalformedResponse,
    ParseStatus,
    Unexpected,
}

impl From<&AppError> for FailureKind {
    fn from(error: &AppError) -> Self {
        match error {
            AppError::ServerConnection { .. } => Self::ServerConnection,
            AppError::Transport(_) => Self::Transport,
            AppError::MalformedResponse(_) => Self::MalformedResponse,
            AppError::ParseStatus(_) => Self::ParseStatus,
            _ => Self::Unexpected,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ServerConnection => "server connection",
            Self::Transport => "transport",
            Self::MalformedResponse => "malformed response",
            Self::ParseStatus => "status parsing",
            Self::Unexpected => "unexpected",
        };
        f.write_str(name)
    }
}
