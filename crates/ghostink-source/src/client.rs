//! Channel-backed completion source and the background service loop
//!
//! `ChannelCompletionSource` is what the session sees: a `CompletionPort`
//! that forwards requests over the background channel and tracks channel
//! health. `BackgroundService` is the other half: it drains the inbound
//! queue, acknowledges synchronously by accepting the envelope, and does
//! the actual provider work asynchronously.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{debug, warn};

use ghostink_core::{CompletionPort, CompletionRequest, CompletionResponse, TrackerError, TrackerResult};
use tokio::sync::mpsc;

use crate::channel::{BackgroundChannel, ChannelMessage, ChannelReply, Envelope};
use crate::connection::{ConnectionState, ConnectionSupervisor};
use crate::error::SourceError;
use crate::sanitize::sanitize_response;

/// Completion port over the background channel
pub struct ChannelCompletionSource {
    channel: BackgroundChannel,
    supervisor: Mutex<ConnectionSupervisor>,
}

impl ChannelCompletionSource {
    pub fn new(channel: BackgroundChannel) -> Self {
        Self {
            channel,
            supervisor: Mutex::new(ConnectionSupervisor::new()),
        }
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.supervisor
            .lock()
            .map(|s| s.state())
            .unwrap_or(ConnectionState::Disconnected)
    }

    fn record_success(&self) {
        if let Ok(mut supervisor) = self.supervisor.lock() {
            supervisor.record_success();
        }
    }

    fn record_failure(&self) {
        if let Ok(mut supervisor) = self.supervisor.lock() {
            supervisor.record_failure();
        }
    }
}

#[async_trait]
impl CompletionPort for ChannelCompletionSource {
    async fn complete(&self, request: CompletionRequest) -> TrackerResult<CompletionResponse> {
        if self.connection_state() == ConnectionState::Disconnected {
            return Err(TrackerError::Messaging(
                "background channel disconnected".to_string(),
            ));
        }

        // While reconnecting, every exchange doubles as a probe; pace it
        // by the supervisor's backoff.
        let backoff = self
            .supervisor
            .lock()
            .ok()
            .and_then(|supervisor| supervisor.next_backoff());
        if let Some(delay) = backoff {
            tokio::time::sleep(delay).await;
        }

        match self.channel.request(ChannelMessage::Complete(request)).await {
            Ok(ChannelReply::Completion(response)) => {
                self.record_success();
                Ok(response)
            }
            Ok(ChannelReply::Error(message)) => {
                // The channel itself is healthy; the provider failed.
                self.record_success();
                Err(TrackerError::Model(message))
            }
            Ok(ChannelReply::Pong) => {
                self.record_success();
                Err(SourceError::InvalidResponse("unexpected pong".to_string()).into())
            }
            Err(err) => {
                warn!(error = %err, "background channel exchange failed");
                self.record_failure();
                Err(err.into())
            }
        }
    }
}

/// Background half: answers the inbound queue using an inner provider
pub struct BackgroundService {
    inbound: mpsc::UnboundedReceiver<Envelope>,
    provider: Arc<dyn CompletionPort>,
}

impl BackgroundService {
    pub fn new(inbound: mpsc::UnboundedReceiver<Envelope>, provider: Arc<dyn CompletionPort>) -> Self {
        Self { inbound, provider }
    }

    /// Drain the queue until the client half is dropped
    ///
    /// Accepting an envelope is the synchronous acknowledgment; provider
    /// work runs on a spawned task so a slow request never blocks the
    /// queue.
    pub async fn run(mut self) {
        while let Some(envelope) = self.inbound.recv().await {
            let provider = Arc::clone(&self.provider);
            tokio::spawn(async move {
                let reply = match envelope.message {
                    ChannelMessage::Ping => ChannelReply::Pong,
                    ChannelMessage::Complete(request) => {
                        match provider.complete(request).await {
                            Ok(response) => match sanitize_response(response) {
                                Ok(clean) => ChannelReply::Completion(clean),
                                Err(err) => ChannelReply::Error(err.to_string()),
                            },
                            Err(err) => ChannelReply::Error(err.to_string()),
                        }
                    }
                };
                if envelope.reply.send(reply).is_err() {
                    debug!("reply dropped: requester gone");
                }
            });
        }
    }
}
