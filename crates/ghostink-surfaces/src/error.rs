//! Surface error types

use thiserror::Error;

/// Surface result type
pub type SurfaceResult<T> = std::result::Result<T, SurfaceError>;

/// Errors raised by surface read/write operations
///
/// These never escape the adapter boundary as failures: callers degrade to
/// "no content" / cursor 0 via the `read_text_or_empty` / `read_cursor_or_zero`
/// helpers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The host node is no longer attached to the page
    #[error("surface detached from host node")]
    Detached,

    /// Reading text or cursor state from the host node failed
    #[error("surface read failed: {0}")]
    ReadFailed(String),

    /// Writing text or cursor state to the host node failed
    #[error("surface write failed: {0}")]
    WriteFailed(String),

    /// The requested cursor offset does not exist in the content
    #[error("offset {offset} out of bounds (len {len})")]
    OffsetOutOfBounds { offset: usize, len: usize },
}
