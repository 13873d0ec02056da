//! Cross-process message channel
//!
//! The core talks to the background collaborator (which runs the actual
//! API call) over an asynchronous request/response channel. Posting a
//! message yields a synchronous acknowledgment — the send either lands in
//! the collaborator's queue or fails immediately — so the host messaging
//! layer never treats the conversation as hung. The asynchronous reply is
//! bounded by a hard per-message timeout.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::warn;

use ghostink_core::{CompletionRequest, CompletionResponse};

use crate::error::SourceError;

/// Hard per-message timeout
pub const MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Messages the core sends to the background collaborator
#[derive(Debug)]
pub enum ChannelMessage {
    /// Liveness probe
    Ping,
    /// A completion request for the focused surface
    Complete(CompletionRequest),
}

/// Replies from the background collaborator
#[derive(Debug)]
pub enum ChannelReply {
    Pong,
    Completion(CompletionResponse),
    /// The collaborator reports an upstream failure
    Error(String),
}

/// One queued message with its reply slot
#[derive(Debug)]
pub struct Envelope {
    pub message: ChannelMessage,
    pub reply: oneshot::Sender<ChannelReply>,
}

/// Client half of the background channel
#[derive(Clone)]
pub struct BackgroundChannel {
    outbound: mpsc::UnboundedSender<Envelope>,
    message_timeout: Duration,
}

impl BackgroundChannel {
    /// Build a connected channel pair: the client half and the service's
    /// inbound queue
    pub fn pair() -> (Self, mpsc::UnboundedReceiver<Envelope>) {
        let (outbound, inbound) = mpsc::unbounded_channel();
        (
            Self {
                outbound,
                message_timeout: MESSAGE_TIMEOUT,
            },
            inbound,
        )
    }

    pub fn with_timeout(mut self, message_timeout: Duration) -> Self {
        self.message_timeout = message_timeout;
        self
    }

    /// Post a message and await the bounded reply
    ///
    /// The queue insertion is the synchronous acknowledgment; a dead
    /// collaborator fails the send immediately rather than hanging.
    pub async fn request(&self, message: ChannelMessage) -> Result<ChannelReply, SourceError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.outbound
            .send(Envelope {
                message,
                reply: reply_tx,
            })
            .map_err(|_| SourceError::Disconnected)?;

        match timeout(self.message_timeout, reply_rx).await {
            Ok(Ok(reply)) => Ok(reply),
            Ok(Err(_)) => Err(SourceError::Messaging(
                "channel closed before reply".to_string(),
            )),
            Err(_) => {
                warn!(timeout_ms = self.message_timeout.as_millis() as u64, "message timed out");
                Err(SourceError::Timeout(self.message_timeout.as_millis() as u64))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_request_reply_round_trip() {
        let (channel, mut inbound) = BackgroundChannel::pair();
        tokio::spawn(async move {
            while let Some(envelope) = inbound.recv().await {
                let _ = envelope.reply.send(ChannelReply::Pong);
            }
        });
        let reply = channel.request(ChannelMessage::Ping).await.unwrap();
        assert!(matches!(reply, ChannelReply::Pong));
    }

    #[tokio::test]
    async fn test_dead_collaborator_fails_synchronously() {
        let (channel, inbound) = BackgroundChannel::pair();
        drop(inbound);
        let err = channel.request(ChannelMessage::Ping).await.unwrap_err();
        assert_eq!(err, SourceError::Disconnected);
    }

    #[tokio::test]
    async fn test_reply_timeout_resolves_as_error() {
        let (channel, mut inbound) = BackgroundChannel::pair();
        let channel = channel.with_timeout(Duration::from_millis(20));
        tokio::spawn(async move {
            // Accept the envelope but never reply
            let _held = inbound.recv().await;
            tokio::time::sleep(Duration::from_secs(1)).await;
        });
        let err = channel.request(ChannelMessage::Ping).await.unwrap_err();
        assert!(matches!(err, SourceError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_dropped_reply_slot_is_messaging_error() {
        let (channel, mut inbound) = BackgroundChannel::pair();
        tokio::spawn(async move {
            while let Some(envelope) = inbound.recv().await {
                drop(envelope.reply);
            }
        });
        let err = channel.request(ChannelMessage::Ping).await.unwrap_err();
        assert!(matches!(err, SourceError::Messaging(_)));
    }
}
