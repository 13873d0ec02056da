//! Tracker error types
//!
//! Every error is caught at the boundary of the operation that can raise
//! it. The worst externally visible effect of any of these is "no
//! suggestion shown this cycle".

use thiserror::Error;

/// Tracker result type
pub type TrackerResult<T> = std::result::Result<T, TrackerError>;

/// Errors crossing into the suggestion core
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// Host DOM access failure; callers degrade to empty text / offset 0
    #[error("surface error: {0}")]
    Surface(#[from] ghostink_surfaces::SurfaceError),

    /// Sending to or hearing back from the background collaborator failed
    #[error("messaging error: {0}")]
    Messaging(String),

    /// The completion payload could not be parsed
    #[error("invalid completion response: {0}")]
    InvalidResponse(String),

    /// The collaborator reported an upstream model failure
    #[error("model error: {0}")]
    Model(String),
}

impl TrackerError {
    /// Whether the error notice should auto-dismiss
    ///
    /// Messaging hiccups are transient; model errors (missing credential,
    /// upstream outage) stay until dismissed and are never retried
    /// automatically.
    pub fn is_transient(&self) -> bool {
        matches!(self, TrackerError::Messaging(_) | TrackerError::Surface(_))
    }
}
