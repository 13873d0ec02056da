//! Core suggestion types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Page-level context shipped with every completion request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub nearby_text: String,
    #[serde(default)]
    pub headings: String,
    #[serde(default)]
    pub form_field_names: Vec<String>,
    #[serde(default)]
    pub input_label: String,
    #[serde(default)]
    pub input_placeholder: String,
    #[serde(default)]
    pub input_name: String,
    #[serde(default)]
    pub input_type: String,
}

/// A completion request for the currently focused surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub buffer_text: String,
    pub cursor_offset: usize,
    pub page_context: PageContext,
}

/// A sanitized completion response from the source collaborator
///
/// `last_word` is empty when the completion continues a partial word the
/// user is still typing; otherwise it names the complete word the
/// continuation follows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub completion: String,
    #[serde(default)]
    pub last_word: String,
    #[serde(default)]
    pub alternatives: Vec<String>,
    #[serde(default = "default_confidence")]
    pub confidence: f32,
}

fn default_confidence() -> f32 {
    0.5
}

/// The model's last accepted proposal for the focused surface
///
/// At most one exists per surface at a time; a new one always fully
/// replaces the old.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSuggestion {
    /// Primary completion, an ordered sequence of words
    pub primary: String,
    /// Up to three alternative completions
    pub alternatives: Vec<String>,
    /// Last complete word in the buffer the suggestion continues from
    pub anchor_word: String,
    /// Model confidence, 0.0–1.0
    pub confidence: f32,
    pub created_at: DateTime<Utc>,
}

impl PendingSuggestion {
    pub fn from_response(response: CompletionResponse) -> Self {
        let mut alternatives = response.alternatives;
        alternatives.truncate(3);
        Self {
            primary: response.completion,
            alternatives,
            anchor_word: response.last_word,
            confidence: response.confidence.clamp(0.0, 1.0),
            created_at: Utc::now(),
        }
    }
}

/// How far into the held suggestion the user has already retyped
///
/// Derived per edit event; never persisted across edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchCursor {
    /// Index of the suggestion word the cursor sits in
    pub word_index: usize,
    /// Characters of that word already typed
    pub char_offset: usize,
}

/// Tracker lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackerState {
    /// No pending suggestion
    #[default]
    Idle,
    /// A pending suggestion exists and is displayed
    Held,
    /// Latest keystrokes are a prefix match against the held suggestion
    Consuming,
}

/// A buffer splice produced by accepting a suggestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedSplice {
    pub new_text: String,
    pub new_cursor: usize,
}

/// Which displayed candidate an accept gesture refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptCandidate {
    Primary,
    /// Zero-based alternative index
    Alternative(usize),
}
