//! Completion source error types

use thiserror::Error;

use ghostink_core::TrackerError;

/// Errors raised by the completion source collaborator
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The channel to the background collaborator is gone
    #[error("background channel disconnected")]
    Disconnected,

    /// No reply arrived within the hard per-message timeout
    #[error("message timed out after {0} ms")]
    Timeout(u64),

    /// Send or receive failure on the background channel
    #[error("messaging error: {0}")]
    Messaging(String),

    /// Network failure talking to the provider
    #[error("network error: {0}")]
    Network(String),

    /// The completion payload could not be parsed
    #[error("invalid completion payload: {0}")]
    InvalidResponse(String),

    /// The provider reported an upstream failure
    #[error("model error: {0}")]
    Model(String),

    /// Missing or unusable configuration (e.g. no API key)
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<SourceError> for TrackerError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Disconnected
            | SourceError::Timeout(_)
            | SourceError::Messaging(_)
            | SourceError::Network(_) => TrackerError::Messaging(err.to_string()),
            SourceError::InvalidResponse(msg) => TrackerError::InvalidResponse(msg),
            SourceError::Model(msg) | SourceError::Config(msg) => TrackerError::Model(msg),
        }
    }
}
