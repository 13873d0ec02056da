//! Normalized edit and focus events
//!
//! Each surface kind has exactly one edit-event source. Programmatic writes
//! re-enter as `Synthetic` events so host-page observers stay consistent
//! without a mutation-observer feedback loop.

use serde::{Deserialize, Serialize};

/// Where an edit came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditSource {
    /// A human keystroke (or host-native paste/cut)
    User,
    /// A programmatic write issued through an `EditableSurface`
    Synthetic,
}

/// The shape of a single edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditKind {
    /// Characters inserted at the cursor
    Insert(String),
    /// One backward deletion (Backspace)
    DeleteBackward,
    /// Content replaced wholesale (programmatic write, rich paste)
    Replace,
}

/// A normalized edit event observed on the active surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditEvent {
    pub kind: EditKind,
    pub source: EditSource,
}

impl EditEvent {
    pub fn user(kind: EditKind) -> Self {
        Self {
            kind,
            source: EditSource::User,
        }
    }

    pub fn synthetic(kind: EditKind) -> Self {
        Self {
            kind,
            source: EditSource::Synthetic,
        }
    }

    /// True when the event is a user insertion of exactly one space
    pub fn is_single_space_insert(&self) -> bool {
        matches!(&self.kind, EditKind::Insert(data) if data == " ")
            && self.source == EditSource::User
    }

    /// True when the event is a backward deletion
    pub fn is_delete_backward(&self) -> bool {
        matches!(self.kind, EditKind::DeleteBackward)
    }
}

/// Host-page signals that must clear suggestion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSignal {
    /// A button or link was activated
    Activate,
    /// A form was submitted
    Submit,
    /// The page is navigating away
    Navigation,
}

/// Everything a `TrackerSession` can observe about its bound surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Edited(EditEvent),
    FocusLost,
    Signal(PageSignal),
}
