//! Word and offset helpers over character-indexed buffers
//!
//! Cursor offsets are character offsets into the normalized text content;
//! these helpers keep every slice char-safe.

/// Number of characters in `s`
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The first `chars` characters of `s`
pub fn char_prefix(s: &str, chars: usize) -> &str {
    match s.char_indices().nth(chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Everything after the first `chars` characters of `s`
pub fn char_suffix(s: &str, chars: usize) -> &str {
    match s.char_indices().nth(chars) {
        Some((idx, _)) => &s[idx..],
        None => "",
    }
}

/// The in-progress word: the trailing run of non-whitespace characters
///
/// Empty when the character immediately before the cursor is whitespace
/// (or the buffer is empty).
pub fn current_word(before_cursor: &str) -> &str {
    let trailing_start = before_cursor
        .char_indices()
        .rev()
        .take_while(|(_, c)| !c.is_whitespace())
        .last()
        .map(|(idx, _)| idx);
    match trailing_start {
        Some(idx) => &before_cursor[idx..],
        None => "",
    }
}

/// The most recently completed word before the in-progress one
pub fn last_complete_word(before_cursor: &str) -> Option<&str> {
    let current = current_word(before_cursor);
    let completed = &before_cursor[..before_cursor.len() - current.len()];
    completed.split_whitespace().last()
}

/// Ordered sequence of words in `s`
pub fn split_words(s: &str) -> Vec<&str> {
    s.split_whitespace().collect()
}

/// Whether the buffer ends in whitespace (cursor sits on a word boundary)
pub fn ends_with_whitespace(before_cursor: &str) -> bool {
    before_cursor
        .chars()
        .last()
        .map(char::is_whitespace)
        .unwrap_or(false)
}

/// Case-insensitive equality
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Case-insensitive prefix test
pub fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.to_lowercase().starts_with(&prefix.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_word_mid_word() {
        assert_eq!(current_word("I am writ"), "writ");
    }

    #[test]
    fn test_current_word_after_space_is_empty() {
        assert_eq!(current_word("I am "), "");
        assert_eq!(current_word(""), "");
    }

    #[test]
    fn test_last_complete_word() {
        assert_eq!(last_complete_word("I am writ"), Some("am"));
        assert_eq!(last_complete_word("I am "), Some("am"));
        assert_eq!(last_complete_word("writ"), None);
    }

    #[test]
    fn test_char_prefix_suffix_multibyte() {
        let s = "héllo";
        assert_eq!(char_prefix(s, 2), "hé");
        assert_eq!(char_suffix(s, 2), "llo");
        assert_eq!(char_len(s), 5);
    }

    #[test]
    fn test_case_insensitive_helpers() {
        assert!(eq_ignore_case("Writing", "writing"));
        assert!(starts_with_ignore_case("Writing", "wRiT"));
        assert!(!starts_with_ignore_case("writ", "writing"));
    }
}
