//! Overlay display model
//!
//! The renderer's output is a view model, not pixels: cursor-relative
//! geometry and styling are the host shell's concern.

use serde::{Deserialize, Serialize};

/// Mutually exclusive display modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Inert inline text at the cursor
    GhostText,
    /// Interactive panel below the cursor with alternatives
    Tooltip,
}

/// Maximum number of alternatives a tooltip shows
pub const MAX_ALTERNATIVES: usize = 3;

/// What the overlay currently shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayModel {
    Hidden,
    /// Request in flight
    Loading,
    /// Inline ghost text: only the remaining suggestion text
    Ghost { text: String },
    /// Tooltip: remaining primary plus digit-keyed alternatives
    Tooltip {
        primary: String,
        alternatives: Vec<String>,
        hint: String,
    },
    /// Error notice; transient notices auto-dismiss
    Notice { message: String, transient: bool },
}

impl OverlayModel {
    /// Whether a suggestion (either mode) is on display
    pub fn shows_suggestion(&self) -> bool {
        matches!(self, OverlayModel::Ghost { .. } | OverlayModel::Tooltip { .. })
    }
}

/// The usage hint rendered at the bottom of a tooltip
pub fn tooltip_hint(has_alternatives: bool) -> String {
    if has_alternatives {
        "Press Tab to accept or 1-3 for alternatives. Esc to dismiss".to_string()
    } else {
        "Press Tab to accept or Esc to dismiss".to_string()
    }
}
