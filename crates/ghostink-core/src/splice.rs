//! Acceptance splice
//!
//! Committing a displayed candidate inserts it at the cursor and leaves
//! the cursor at the end of the inserted text. The displayed text already
//! carries its leading separator when one is needed; here only the
//! boundary against trailing buffer content is repaired.

use crate::types::AcceptedSplice;
use crate::words::{char_len, char_prefix, char_suffix};

/// Splice `displayed` into `buffer` at `cursor_offset`
///
/// If content follows the cursor and does not start with whitespace, a
/// single separating space is inserted before it. The new cursor sits at
/// the end of the spliced text, before any trailing content.
pub fn splice_displayed(buffer: &str, cursor_offset: usize, displayed: &str) -> AcceptedSplice {
    let before = char_prefix(buffer, cursor_offset);
    let after = char_suffix(buffer, cursor_offset);

    let mut new_text = String::with_capacity(buffer.len() + displayed.len() + 1);
    new_text.push_str(before);
    new_text.push_str(displayed);
    let new_cursor = char_len(before) + char_len(displayed);

    if !after.is_empty() && !after.starts_with(char::is_whitespace) {
        new_text.push(' ');
    }
    new_text.push_str(after);

    AcceptedSplice {
        new_text,
        new_cursor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splice_at_end_of_buffer() {
        let splice = splice_displayed("Dear team", 9, " how are you");
        assert_eq!(splice.new_text, "Dear team how are you");
        assert_eq!(splice.new_cursor, 21);
    }

    #[test]
    fn test_splice_mid_word_completion() {
        let splice = splice_displayed("I am writ", 9, "ing to you");
        assert_eq!(splice.new_text, "I am writing to you");
        assert_eq!(splice.new_cursor, 19);
    }

    #[test]
    fn test_splice_separates_trailing_content() {
        // "Regards" follows the cursor without a leading space
        let splice = splice_displayed("Dear teamRegards", 9, " hello");
        assert_eq!(splice.new_text, "Dear team hello Regards");
        assert_eq!(splice.new_cursor, 15);
    }

    #[test]
    fn test_splice_keeps_existing_trailing_space() {
        let splice = splice_displayed("Dear team Regards", 9, " hello");
        assert_eq!(splice.new_text, "Dear team hello Regards");
        assert_eq!(splice.new_cursor, 15);
    }

    #[test]
    fn test_splice_into_empty_buffer() {
        let splice = splice_displayed("", 0, "Thank you for");
        assert_eq!(splice.new_text, "Thank you for");
        assert_eq!(splice.new_cursor, 13);
    }
}
