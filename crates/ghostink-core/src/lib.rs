//! GhostInk suggestion core
//!
//! The suggestion-tracking state machine and request coordination for
//! inline ghost-text completion. On every observed edit the tracker
//! decides whether the user's keystrokes are still inside the held
//! suggestion, computes the exact remaining text to display without
//! re-querying the model, and otherwise lets the debounce coordinator
//! schedule exactly one new request.
//!
//! # Architecture
//!
//! - [`SuggestionTracker`]: `Idle → Held → Consuming → Idle` state machine
//!   over one [`PendingSuggestion`]
//! - [`DebounceCoordinator`]: the request window — typing flag, armed
//!   deadline, generation-stamped staleness
//! - [`TrackerSession`]: one per focused surface; owns the surface binding
//!   and both machines, and talks to the renderer and completion source
//!   only through the [`OverlayPort`] / [`CompletionPort`] seams
//!
//! Every error is contained: the worst externally visible effect of any
//! internal failure is "no suggestion shown this cycle".

pub mod coordinator;
pub mod error;
pub mod ports;
pub mod session;
pub mod splice;
pub mod tracker;
pub mod types;
pub mod words;

pub use coordinator::{DebounceCoordinator, FireDecision};
pub use error::{TrackerError, TrackerResult};
pub use ports::{ClearReason, CompletionPort, OverlayPort, SuggestionView};
pub use session::{OutboundRequest, SessionCommand, SessionInput, TrackerSession};
pub use splice::splice_displayed;
pub use tracker::{display_remaining, is_redundant, EditVerdict, OfferVerdict, SuggestionTracker};
pub use types::{
    AcceptCandidate, AcceptedSplice, CompletionRequest, CompletionResponse, MatchCursor,
    PageContext, PendingSuggestion, TrackerState,
};
