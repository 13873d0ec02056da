//! Background-channel connection state
//!
//! An explicit state machine replaces ad hoc disconnected flags: the
//! channel is `Connected`, `Reconnecting` with a bounded number of
//! backoff attempts, or `Disconnected` once the attempts are spent.

use std::time::Duration;

use tracing::{debug, info};

/// Maximum reconnection attempts before giving up
pub const MAX_RECONNECT_ATTEMPTS: u32 = 10;

/// Backoff ceiling
pub const BACKOFF_CAP: Duration = Duration::from_secs(30);

/// Connection health of the background channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    /// Waiting to retry; `attempt` counts completed failures
    Reconnecting { attempt: u32 },
    /// Attempts exhausted; no further retries
    Disconnected,
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Connected => write!(f, "Connected"),
            ConnectionState::Reconnecting { attempt } => {
                write!(f, "Reconnecting(attempt {attempt})")
            }
            ConnectionState::Disconnected => write!(f, "Disconnected"),
        }
    }
}

/// Tracks channel health and paces reconnection attempts
#[derive(Debug)]
pub struct ConnectionSupervisor {
    state: ConnectionState,
    max_attempts: u32,
    base_delay: Duration,
    cap: Duration,
}

impl ConnectionSupervisor {
    pub fn new() -> Self {
        Self {
            state: ConnectionState::Connected,
            max_attempts: MAX_RECONNECT_ATTEMPTS,
            base_delay: Duration::from_secs(1),
            cap: BACKOFF_CAP,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    /// Record a successful exchange; resets any backoff
    pub fn record_success(&mut self) {
        if self.state != ConnectionState::Connected {
            info!("background channel reconnected");
        }
        self.state = ConnectionState::Connected;
    }

    /// Record a failed exchange; advances the state machine
    pub fn record_failure(&mut self) {
        self.state = match self.state {
            ConnectionState::Connected => ConnectionState::Reconnecting { attempt: 1 },
            ConnectionState::Reconnecting { attempt } if attempt >= self.max_attempts => {
                info!("giving up on background channel after {attempt} attempts");
                ConnectionState::Disconnected
            }
            ConnectionState::Reconnecting { attempt } => ConnectionState::Reconnecting {
                attempt: attempt + 1,
            },
            ConnectionState::Disconnected => ConnectionState::Disconnected,
        };
        debug!(state = %self.state, "background channel failure recorded");
    }

    /// Delay before the next reconnection attempt, if one is allowed
    ///
    /// Doubles per attempt from the base delay, capped.
    pub fn next_backoff(&self) -> Option<Duration> {
        match self.state {
            ConnectionState::Reconnecting { attempt } => {
                let exponent = attempt.saturating_sub(1).min(31);
                let delay = self
                    .base_delay
                    .saturating_mul(1u32.checked_shl(exponent).unwrap_or(u32::MAX));
                Some(delay.min(self.cap))
            }
            _ => None,
        }
    }
}

impl Default for ConnectionSupervisor {
    fn default() -> Self {
        Self::new()
    }
}
