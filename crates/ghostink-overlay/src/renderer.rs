//! Overlay renderer
//!
//! Turns tracker output into the current overlay view model and fully
//! removes it on focus loss, page signals, accept, dismiss and
//! invalidation. Implements the session's `OverlayPort`; it never touches
//! tracker state directly.

use tracing::debug;

use ghostink_core::{ClearReason, OverlayPort, SuggestionView};

use crate::model::{tooltip_hint, DisplayMode, OverlayModel, MAX_ALTERNATIVES};

/// The one overlay for the active surface
pub struct SuggestionOverlay {
    mode: DisplayMode,
    model: OverlayModel,
    last_clear: Option<ClearReason>,
}

impl SuggestionOverlay {
    pub fn new(mode: DisplayMode) -> Self {
        Self {
            mode,
            model: OverlayModel::Hidden,
            last_clear: None,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn model(&self) -> &OverlayModel {
        &self.model
    }

    /// Why the overlay was last removed, for the host shell's bookkeeping
    pub fn last_clear(&self) -> Option<ClearReason> {
        self.last_clear
    }
}

impl Default for SuggestionOverlay {
    fn default() -> Self {
        Self::new(DisplayMode::GhostText)
    }
}

impl OverlayPort for SuggestionOverlay {
    fn show_loading(&mut self) {
        self.model = OverlayModel::Loading;
    }

    fn show_suggestion(&mut self, view: SuggestionView) {
        if view.remaining.trim().is_empty() {
            // Never render an empty suggestion
            self.model = OverlayModel::Hidden;
            return;
        }
        self.model = match self.mode {
            DisplayMode::GhostText => OverlayModel::Ghost {
                text: view.remaining,
            },
            DisplayMode::Tooltip => {
                let mut alternatives = view.alternatives;
                alternatives.truncate(MAX_ALTERNATIVES);
                let hint = tooltip_hint(!alternatives.is_empty());
                OverlayModel::Tooltip {
                    primary: view.remaining,
                    alternatives,
                    hint,
                }
            }
        };
    }

    fn show_notice(&mut self, message: &str, transient: bool) {
        self.model = OverlayModel::Notice {
            message: message.to_string(),
            transient,
        };
    }

    fn clear(&mut self, reason: ClearReason) {
        debug!(?reason, "overlay cleared");
        self.model = OverlayModel::Hidden;
        self.last_clear = Some(reason);
    }

    fn set_ghost_mode(&mut self, use_ghost_text: bool) {
        self.mode = if use_ghost_text {
            DisplayMode::GhostText
        } else {
            DisplayMode::Tooltip
        };
    }

    fn is_ghost_visible(&self) -> bool {
        matches!(self.model, OverlayModel::Ghost { .. })
    }
}
