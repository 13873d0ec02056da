//! Ports the session's collaborators plug into
//!
//! The overlay renderer and the completion source never reach into
//! tracker state directly; they communicate through these traits and the
//! session's operations, preventing torn reads during a render.

use async_trait::async_trait;

use crate::error::TrackerResult;
use crate::types::{CompletionRequest, CompletionResponse};

/// What the renderer is asked to display for a held suggestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionView {
    /// Remaining (unconsumed) primary text
    pub remaining: String,
    /// Remaining texts of up to three alternatives
    pub alternatives: Vec<String>,
}

/// Why an overlay is being removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearReason {
    FocusLost,
    PageSignal,
    Accepted,
    Dismissed,
    Invalidated,
    /// The user retyped the whole suggestion themselves
    Exhausted,
}

/// Rendering operations the session drives
///
/// Implementations decide how the view materializes (inline ghost text or
/// an anchored tooltip); the session only states what is displayable.
pub trait OverlayPort: Send {
    /// Show the in-progress indicator while a request is out
    fn show_loading(&mut self);

    /// Display a suggestion (or re-display with updated remaining text)
    fn show_suggestion(&mut self, view: SuggestionView);

    /// Show an error notice; transient notices auto-dismiss
    fn show_notice(&mut self, message: &str, transient: bool);

    /// Remove everything currently displayed
    fn clear(&mut self, reason: ClearReason);

    /// Switch between ghost-text and tooltip display
    fn set_ghost_mode(&mut self, use_ghost_text: bool);

    /// Whether ghost text is currently visible
    fn is_ghost_visible(&self) -> bool;
}

/// The completion source collaborator
///
/// One outstanding response is acted upon per request; staleness is the
/// session's concern, implementations just answer.
#[async_trait]
pub trait CompletionPort: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> TrackerResult<CompletionResponse>;
}
