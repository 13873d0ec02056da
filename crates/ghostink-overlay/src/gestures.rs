//! Gesture-to-command mapping
//!
//! Keyboard contract while an overlay is visible: Tab accepts, Escape and
//! Enter dismiss, digits 1–3 pick a tooltip alternative when it exists.
//! Clicks mirror the key gestures, plus the tooltip header's regenerate
//! and mode-toggle actions.

use ghostink_core::SessionCommand;

use crate::model::OverlayModel;

/// Keys the overlay intercepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    Tab,
    Escape,
    Enter,
    /// A digit key, 1–9
    Digit(u8),
}

/// Clickable overlay regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Primary,
    /// Zero-based alternative row
    Alternative(usize),
    Regenerate,
    ModeToggle,
}

/// Map a key press against the current model to a session command
///
/// Returns `None` when the key is not intercepted and should reach the
/// host page untouched.
pub fn command_for_key(model: &OverlayModel, key: KeyPress) -> Option<SessionCommand> {
    match model {
        OverlayModel::Ghost { .. } => match key {
            KeyPress::Tab => Some(SessionCommand::AcceptPrimary),
            KeyPress::Escape | KeyPress::Enter => Some(SessionCommand::Dismiss),
            KeyPress::Digit(_) => None,
        },
        OverlayModel::Tooltip { alternatives, .. } => match key {
            KeyPress::Tab => Some(SessionCommand::AcceptPrimary),
            KeyPress::Escape | KeyPress::Enter => Some(SessionCommand::Dismiss),
            KeyPress::Digit(n) if (1..=3).contains(&n) && (n as usize) <= alternatives.len() => {
                Some(SessionCommand::AcceptAlternative(n as usize - 1))
            }
            KeyPress::Digit(_) => None,
        },
        OverlayModel::Notice { .. } => match key {
            KeyPress::Escape => Some(SessionCommand::Dismiss),
            _ => None,
        },
        OverlayModel::Hidden | OverlayModel::Loading => None,
    }
}

/// Map a click against the current model to a session command
pub fn command_for_click(model: &OverlayModel, target: ClickTarget) -> Option<SessionCommand> {
    match model {
        OverlayModel::Tooltip { alternatives, .. } => match target {
            ClickTarget::Primary => Some(SessionCommand::AcceptPrimary),
            ClickTarget::Alternative(index) if index < alternatives.len() => {
                Some(SessionCommand::AcceptAlternative(index))
            }
            ClickTarget::Alternative(_) => None,
            ClickTarget::Regenerate => Some(SessionCommand::Regenerate),
            ClickTarget::ModeToggle => Some(SessionCommand::ToggleMode),
        },
        _ => None,
    }
}
