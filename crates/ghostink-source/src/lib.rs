//! GhostInk completion source
//!
//! The collaborator that turns buffer text, cursor offset and page context
//! into model completions. The session only sees the `CompletionPort`
//! seam; behind it sit the cross-process background channel with its
//! synchronous acknowledgment and hard per-message timeout, an explicit
//! connection state machine with bounded backoff, payload sanitation, and
//! the OpenAI-backed provider.

pub mod channel;
pub mod client;
pub mod connection;
pub mod error;
pub mod openai;
pub mod sanitize;

pub use channel::{
    BackgroundChannel, ChannelMessage, ChannelReply, Envelope, MESSAGE_TIMEOUT,
};
pub use client::{BackgroundService, ChannelCompletionSource};
pub use connection::{
    ConnectionState, ConnectionSupervisor, BACKOFF_CAP, MAX_RECONNECT_ATTEMPTS,
};
pub use error::SourceError;
pub use openai::OpenAiCompletionSource;
pub use sanitize::{parse_completion_payload, sanitize_response};
