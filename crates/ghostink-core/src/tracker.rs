//! Suggestion tracking state machine
//!
//! Owns the one outstanding [`PendingSuggestion`] for the focused surface
//! and decides, on every observed edit, whether the user's keystrokes are
//! still inside it. States: `Idle` (nothing held) → `Held` (displayed) →
//! `Consuming` (keystrokes prefix-match the suggestion) → back to `Idle`
//! on exhaustion, accept, dismiss or invalidation.
//!
//! The remaining text to display is recomputed from the buffer on every
//! event; the model is never re-queried while consumption continues.

use tracing::debug;

use ghostink_surfaces::{EditEvent, EditKind};

use crate::types::{
    AcceptCandidate, CompletionResponse, MatchCursor, PendingSuggestion, TrackerState,
};
use crate::words::{
    char_len, char_prefix, char_suffix, current_word, ends_with_whitespace, eq_ignore_case,
    last_complete_word, split_words, starts_with_ignore_case,
};

/// Result of running one edit event through the tracker
#[derive(Debug, Clone, PartialEq)]
pub enum EditVerdict {
    /// Nothing held; the edit flows on to the request coordinator
    NotTracking,
    /// The edit stayed inside the suggestion; display `remaining`
    Consuming {
        remaining: String,
        cursor: MatchCursor,
    },
    /// The user retyped the suggestion verbatim; no re-request
    Exhausted,
    /// The edit contradicts the suggestion
    Invalidated,
}

/// Result of offering a newly arrived suggestion for display
#[derive(Debug, Clone, PartialEq)]
pub enum OfferVerdict {
    /// Display with the given remaining texts (primary, then alternatives)
    Displayed {
        remaining: String,
        alternatives: Vec<String>,
    },
    /// The suggestion duplicates what the user already wrote
    RejectedRedundant,
    /// Nothing would be shown (remaining text empty)
    RejectedEmpty,
}

/// The suggestion tracker for one focused surface
#[derive(Debug, Default)]
pub struct SuggestionTracker {
    state: TrackerState,
    pending: Option<PendingSuggestion>,
    /// Remaining text as currently displayed; the value an accept splices
    displayed_remaining: Option<String>,
    /// Alternative remaining texts, present until consumption begins
    displayed_alternatives: Vec<String>,
}

impl SuggestionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn pending(&self) -> Option<&PendingSuggestion> {
        self.pending.as_ref()
    }

    /// Remaining text currently on display, if any
    pub fn displayed_remaining(&self) -> Option<&str> {
        self.displayed_remaining.as_deref()
    }

    pub fn displayed_alternatives(&self) -> &[String] {
        &self.displayed_alternatives
    }

    /// Run one observed edit against the held suggestion
    ///
    /// `before_cursor` is the buffer text up to the cursor offset.
    pub fn on_edit(&mut self, event: &EditEvent, before_cursor: &str) -> EditVerdict {
        let primary = match &self.pending {
            Some(pending) => pending.primary.clone(),
            None => return EditVerdict::NotTracking,
        };

        // A deletion always contradicts the held suggestion.
        if matches!(event.kind, EditKind::DeleteBackward | EditKind::Replace) {
            debug!(kind = ?event.kind, "edit contradicts held suggestion");
            return self.invalidate();
        }

        let suggestion_words = split_words(&primary);
        if suggestion_words.is_empty() {
            return self.invalidate();
        }
        let typed = current_word(before_cursor);

        if typed.is_empty() && ends_with_whitespace(before_cursor) {
            // Space boundary: the user just finished a word. If it is one of
            // the suggestion words, keep consuming from the next word on.
            let last_typed = match split_words(before_cursor).last().copied() {
                Some(word) => word,
                None => return self.invalidate(),
            };
            let found = suggestion_words
                .iter()
                .position(|word| eq_ignore_case(word, last_typed));
            match found {
                Some(index) if index + 1 < suggestion_words.len() => {
                    let remaining = suggestion_words[index + 1..].join(" ");
                    let cursor = MatchCursor {
                        word_index: index,
                        char_offset: char_len(suggestion_words[index]),
                    };
                    self.enter_consuming(remaining.clone());
                    EditVerdict::Consuming { remaining, cursor }
                }
                Some(_) => self.exhaust(),
                None => self.invalidate(),
            }
        } else if !typed.is_empty() {
            // Mid-word: the first suggestion word whose prefix matches wins,
            // by position, not best match.
            let found = suggestion_words
                .iter()
                .position(|word| starts_with_ignore_case(word, typed));
            match found {
                Some(index) => {
                    let word = suggestion_words[index];
                    let mut remaining = char_suffix(word, char_len(typed)).to_string();
                    if index + 1 < suggestion_words.len() {
                        remaining.push(' ');
                        remaining.push_str(&suggestion_words[index + 1..].join(" "));
                    }
                    if remaining.is_empty() {
                        return self.exhaust();
                    }
                    let cursor = MatchCursor {
                        word_index: index,
                        char_offset: char_len(typed),
                    };
                    self.enter_consuming(remaining.clone());
                    EditVerdict::Consuming { remaining, cursor }
                }
                None => self.invalidate(),
            }
        } else {
            // Cursor not adjacent to any trackable word boundary.
            self.invalidate()
        }
    }

    /// Offer a newly arrived suggestion for display
    ///
    /// Redundant suggestions (already contained in the buffer, or opening
    /// with the user's last three words) are rejected and never shown.
    pub fn offer(
        &mut self,
        response: CompletionResponse,
        buffer: &str,
        cursor_offset: usize,
    ) -> OfferVerdict {
        if is_redundant(buffer, &response.completion) {
            debug!("rejecting redundant suggestion");
            self.clear();
            return OfferVerdict::RejectedRedundant;
        }

        let before_cursor = char_prefix(buffer, cursor_offset);
        let suggestion = PendingSuggestion::from_response(response);
        let remaining = display_remaining(&suggestion.primary, before_cursor);
        if remaining.trim().is_empty() {
            self.clear();
            return OfferVerdict::RejectedEmpty;
        }
        let alternatives: Vec<String> = suggestion
            .alternatives
            .iter()
            .map(|alt| display_remaining(alt, before_cursor))
            .filter(|alt| !alt.trim().is_empty())
            .collect();

        self.pending = Some(suggestion);
        self.state = TrackerState::Held;
        self.displayed_remaining = Some(remaining.clone());
        self.displayed_alternatives = alternatives.clone();
        OfferVerdict::Displayed {
            remaining,
            alternatives,
        }
    }

    /// Take the text an accept gesture should splice into the buffer
    ///
    /// Identical for ghost text and tooltip candidates; only the candidate
    /// string differs. Clears all suggestion state.
    pub fn accept(&mut self, candidate: AcceptCandidate) -> Option<String> {
        let text = match candidate {
            AcceptCandidate::Primary => self.displayed_remaining.clone(),
            AcceptCandidate::Alternative(index) => self.displayed_alternatives.get(index).cloned(),
        };
        if text.is_some() {
            self.clear();
        }
        text
    }

    /// Explicit dismiss: drop the suggestion without committing anything
    pub fn dismiss(&mut self) {
        self.clear();
    }

    /// Whether a host-page reset signal should be ignored
    ///
    /// While the current word still prefixes the anchor word or the
    /// suggestion itself, the user is mid-consumption and Enter/click
    /// signals do not clear the overlay.
    pub fn keeps_through_reset(&self, before_cursor: &str) -> bool {
        let pending = match &self.pending {
            Some(pending) => pending,
            None => return false,
        };
        let typed = current_word(before_cursor);
        if typed.is_empty() {
            return false;
        }
        starts_with_ignore_case(&pending.anchor_word, typed)
            || starts_with_ignore_case(&pending.primary, typed)
    }

    fn enter_consuming(&mut self, remaining: String) {
        self.state = TrackerState::Consuming;
        self.displayed_remaining = Some(remaining);
        self.displayed_alternatives.clear();
    }

    fn exhaust(&mut self) -> EditVerdict {
        debug!("suggestion exhausted by retyping");
        self.clear();
        EditVerdict::Exhausted
    }

    fn invalidate(&mut self) -> EditVerdict {
        debug!("suggestion invalidated");
        self.clear();
        EditVerdict::Invalidated
    }

    fn clear(&mut self) {
        self.state = TrackerState::Idle;
        self.pending = None;
        self.displayed_remaining = None;
        self.displayed_alternatives.clear();
    }
}

/// Remaining text to display for a fresh candidate against the buffer
///
/// Mid-word, a candidate whose first word extends the in-progress word
/// shows only the unconsumed suffix (no space between prefix and suffix).
/// Otherwise a single separating space is added when the buffer does not
/// already end in whitespace and a previous complete word exists.
pub fn display_remaining(candidate: &str, before_cursor: &str) -> String {
    let typed = current_word(before_cursor);
    let words = split_words(candidate);

    if !typed.is_empty() {
        if let Some(first) = words.first() {
            if starts_with_ignore_case(first, typed) {
                let mut remaining = char_suffix(first, char_len(typed)).to_string();
                if words.len() > 1 {
                    remaining.push(' ');
                    remaining.push_str(&words[1..].join(" "));
                }
                return remaining;
            }
        }
    }

    let needs_space =
        !ends_with_whitespace(before_cursor) && last_complete_word(before_cursor).is_some();
    if needs_space {
        format!(" {candidate}")
    } else {
        candidate.to_string()
    }
}

/// Whether a proposed completion duplicates text already in the buffer
///
/// True when the buffer already contains the suggestion verbatim
/// (case-insensitive), or the suggestion opens with the last three typed
/// words.
pub fn is_redundant(buffer: &str, suggestion: &str) -> bool {
    let clean_buffer = buffer.trim().to_lowercase();
    let clean_suggestion = suggestion.trim().to_lowercase();
    if clean_suggestion.is_empty() {
        return true;
    }
    if clean_buffer.contains(&clean_suggestion) {
        return true;
    }
    let words: Vec<&str> = clean_buffer.split_whitespace().collect();
    if words.len() >= 3 {
        let last_three = words[words.len() - 3..].join(" ");
        if clean_suggestion.starts_with(&last_three) {
            return true;
        }
    }
    false
}
