//! Property tests for remaining-text computation and acceptance splices

use proptest::prelude::*;

use ghostink_core::{
    display_remaining, splice_displayed, words::char_suffix, CompletionResponse, EditVerdict,
    SuggestionTracker,
};
use ghostink_surfaces::{EditEvent, EditKind};

fn word() -> impl Strategy<Value = String> {
    "[a-z]{2,8}"
}

fn suggestion_words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(word(), 1..4)
}

fn response(completion: &str) -> CompletionResponse {
    CompletionResponse {
        completion: completion.to_string(),
        last_word: String::new(),
        alternatives: Vec::new(),
        confidence: 0.9,
    }
}

proptest! {
    /// Typing any proper prefix of the first suggestion word into an
    /// empty-cursor context leaves exactly the suggestion minus that
    /// prefix on display.
    #[test]
    fn prefix_of_first_word_strips_exactly(
        words in suggestion_words(),
        split in 1usize..8,
    ) {
        let first_len = words[0].chars().count();
        prop_assume!(split < first_len);
        let suggestion = words.join(" ");
        let prefix: String = words[0].chars().take(split).collect();

        let mut tracker = SuggestionTracker::new();
        tracker.offer(response(&suggestion), "", 0);

        let event = EditEvent::user(EditKind::Insert(prefix.clone()));
        match tracker.on_edit(&event, &prefix) {
            EditVerdict::Consuming { remaining, .. } => {
                prop_assert_eq!(remaining, char_suffix(&suggestion, split));
            }
            other => prop_assert!(false, "expected consuming, got {:?}", other),
        }
    }

    /// The same invariant holds for the stateless display computation
    /// used for alternatives.
    #[test]
    fn display_remaining_strips_typed_prefix(
        words in suggestion_words(),
        split in 1usize..8,
    ) {
        let first_len = words[0].chars().count();
        prop_assume!(split < first_len);
        let suggestion = words.join(" ");
        let prefix: String = words[0].chars().take(split).collect();

        let remaining = display_remaining(&suggestion, &prefix);
        prop_assert_eq!(remaining, char_suffix(&suggestion, split));
    }

    /// Splicing displayed text R into buffer B at the cursor yields
    /// B + R + (separator if needed) + after, cursor at the end of B + R.
    #[test]
    fn splice_preserves_before_and_after(
        before in "[a-z ]{0,20}",
        displayed in "[a-z ]{1,15}",
        after in "[a-z ]{0,10}",
    ) {
        let buffer = format!("{before}{after}");
        let cursor = before.chars().count();
        let splice = splice_displayed(&buffer, cursor, &displayed);

        let expected_prefix = format!("{before}{displayed}");
        prop_assert!(splice.new_text.starts_with(&expected_prefix));
        prop_assert_eq!(splice.new_cursor, expected_prefix.chars().count());
        // Trailing content survives, possibly behind one inserted space
        prop_assert!(splice.new_text.ends_with(after.as_str()));
        let inserted = splice.new_text.chars().count()
            - buffer.chars().count()
            - displayed.chars().count();
        prop_assert!(inserted <= 1);
    }

    /// The acceptance result never glues the displayed text onto trailing
    /// content without a separator.
    #[test]
    fn splice_separates_nonspace_trailing_content(
        before in "[a-z]{1,10}",
        displayed in "[a-z]{1,10}",
        after in "[a-z]{1,10}",
    ) {
        let buffer = format!("{before}{after}");
        let cursor = before.chars().count();
        let splice = splice_displayed(&buffer, cursor, &displayed);
        let expected = format!("{before}{displayed} {after}");
        prop_assert_eq!(splice.new_text, expected);
    }
}
