//! GhostInk overlay rendering
//!
//! Turns tracker output into a positioned overlay view model — inline
//! ghost text or a tooltip with digit-keyed alternatives — and maps user
//! accept/dismiss/cycle gestures back into session commands. Pixel
//! geometry and styling are the host shell's concern.

pub mod gestures;
pub mod model;
pub mod renderer;

pub use gestures::{command_for_click, command_for_key, ClickTarget, KeyPress};
pub use model::{tooltip_hint, DisplayMode, OverlayModel, MAX_ALTERNATIVES};
pub use renderer::SuggestionOverlay;
