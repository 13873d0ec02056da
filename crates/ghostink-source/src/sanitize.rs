//! Completion payload parsing and sanitation
//!
//! The model is asked for a JSON object; anything unparseable falls back
//! to treating the whole raw text as the primary completion with no
//! alternatives and default confidence. Sanitation then trims the texts
//! and drops alternatives that duplicate the primary or the anchor word.

use serde::Deserialize;
use tracing::debug;

use ghostink_core::CompletionResponse;

use crate::error::SourceError;

/// Raw shape the model is asked to produce
#[derive(Debug, Deserialize)]
struct RawCompletionPayload {
    completion: String,
    #[serde(default, rename = "lastWord")]
    last_word: String,
    #[serde(default)]
    alternatives: Vec<String>,
    #[serde(default = "default_confidence")]
    confidence: f32,
}

fn default_confidence() -> f32 {
    0.5
}

/// Parse the model's text into a completion response
///
/// An unparseable payload is not an error for the caller: the raw text
/// becomes the primary completion, alternatives empty, confidence 0.5.
pub fn parse_completion_payload(raw: &str) -> CompletionResponse {
    match serde_json::from_str::<RawCompletionPayload>(raw) {
        Ok(payload) => CompletionResponse {
            completion: payload.completion,
            last_word: payload.last_word,
            alternatives: payload.alternatives,
            confidence: payload.confidence,
        },
        Err(err) => {
            debug!(error = %err, "completion payload not JSON, using raw text");
            CompletionResponse {
                completion: raw.trim().to_string(),
                last_word: String::new(),
                alternatives: Vec::new(),
                confidence: 0.5,
            }
        }
    }
}

/// Trim and filter a parsed response
///
/// Alternatives equal to the primary or to the anchor word are dropped,
/// duplicates removed, and at most three kept. An empty primary after
/// trimming is an invalid response.
pub fn sanitize_response(mut response: CompletionResponse) -> Result<CompletionResponse, SourceError> {
    response.completion = response.completion.trim().to_string();
    if response.completion.is_empty() {
        return Err(SourceError::InvalidResponse(
            "empty completion".to_string(),
        ));
    }
    response.last_word = response.last_word.trim().to_string();

    let primary_lower = response.completion.to_lowercase();
    let anchor_lower = response.last_word.to_lowercase();
    let mut seen: Vec<String> = Vec::new();
    for alternative in std::mem::take(&mut response.alternatives) {
        let trimmed = alternative.trim().to_string();
        if trimmed.is_empty() {
            continue;
        }
        let lower = trimmed.to_lowercase();
        if lower == primary_lower {
            continue;
        }
        if !anchor_lower.is_empty() && lower == anchor_lower {
            continue;
        }
        if seen.iter().any(|kept| kept.to_lowercase() == lower) {
            continue;
        }
        seen.push(trimmed);
        if seen.len() == 3 {
            break;
        }
    }
    response.alternatives = seen;
    response.confidence = response.confidence.clamp(0.0, 1.0);
    Ok(response)
}
