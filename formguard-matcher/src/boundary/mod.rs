//! Word-boundary checks with the same meaning as a regex `\b`.

/// A "word" character in the sense of Unicode `\w`: alphabetic, digits,
/// marks, connector punctuation and join controls.
pub fn is_word_char(c: char) -> bool {
    regex_syntax::is_word_character(c)
}

/// True when `pos` sits between a word and a non-word character (or at an
/// edge of `text` next to a word character).
///
/// `pos` must be a char boundary of `text`.
pub fn is_boundary(text: &str, pos: usize) -> bool {
    let before = text[..pos].chars().next_back().map_or(false, is_word_char);
    let after = text[pos..].chars().next().map_or(false, is_word_char);
    before != after
}

/// True when `text[start..end]` is delimited by word boundaries on both sides.
pub fn is_bounded(text: &str, start: usize, end: usize) -> bool {
    is_boundary(text, start) && is_boundary(text, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_does_not_match_inside_monkey() {
        let text = "monkey key";
        assert!(!is_bounded(text, 3, 6));
        assert!(is_bounded(text, 7, 10));
    }

    #[test]
    fn test_edges_count_as_non_word() {
        assert!(is_bounded("drop", 0, 4));
        assert!(!is_bounded("", 0, 0));
    }

    #[test]
    fn test_marks_and_connectors_are_word_chars() {
        assert!(is_word_char('\u{0308}'));
        assert!(is_word_char('\u{203F}'));
        assert!(is_word_char('\u{200D}'));
        assert!(is_word_char('é'));
        assert!(!is_word_char('-'));
        assert!(!is_boundary("spam\u{0308}", 4));
    }

    #[test]
    fn test_symbol_led_term_needs_word_before_it() {
        // `\b@ss` only matches when a word character precedes the '@'.
        assert!(!is_boundary(" @ss", 1));
        assert!(is_boundary("x@ss", 1));
    }
}
