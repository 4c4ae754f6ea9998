//! Multi-pattern blocked-term matcher.
//!
//! Builds one double-array Aho-Corasick automaton over the lowercased terms,
//! scans the lowercased input for every overlapping hit and keeps the hits
//! that sit on word boundaries in the original text. Overlaps are resolved
//! leftmost-first, longest-first, which is what a `\b(?:long|short)\b`
//! alternation sorted longest-first reports.

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use daachorse::DoubleArrayAhoCorasick;

use crate::boundary::is_bounded;
use crate::fold::{fold_term, FoldedText};

/// A matched byte range in the original (unfolded) text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    /// Index of the matched pattern in [`WordMatcher::patterns`].
    pub pattern: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatcherError {
    /// No non-empty pattern survived folding and deduplication.
    NoPatterns,
    /// The automaton could not be built.
    Build(String),
}

impl fmt::Display for MatcherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatcherError::NoPatterns => write!(f, "no patterns to build a matcher from"),
            MatcherError::Build(msg) => write!(f, "failed to build automaton: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MatcherError {}

pub struct WordMatcher {
    automaton: DoubleArrayAhoCorasick<u32>,
    patterns: Vec<String>,
}

impl fmt::Debug for WordMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordMatcher")
            .field("automaton", &"<DoubleArrayAhoCorasick>")
            .field("patterns", &self.patterns.len())
            .finish()
    }
}

impl WordMatcher {
    /// Builds a matcher from `patterns`. Patterns are lowercased and
    /// deduplicated; empty patterns are ignored.
    pub fn new<I, P>(patterns: I) -> Result<Self, MatcherError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let unique: BTreeSet<String> = patterns
            .into_iter()
            .map(|p| fold_term(p.as_ref()))
            .filter(|p| !p.is_empty())
            .collect();

        if unique.is_empty() {
            return Err(MatcherError::NoPatterns);
        }

        let patterns: Vec<String> = unique.into_iter().collect();
        let automaton = DoubleArrayAhoCorasick::new(patterns.iter())
            .map_err(|e| MatcherError::Build(alloc::format!("{}", e)))?;

        Ok(Self { automaton, patterns })
    }

    /// The folded, deduplicated patterns, indexed by [`Span::pattern`].
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Finds non-overlapping, word-bounded matches in `text`, in order.
    pub fn find_spans(&self, text: &str) -> Vec<Span> {
        let folded = FoldedText::new(text);

        let mut candidates: Vec<Span> = self
            .automaton
            .find_overlapping_iter(folded.as_bytes())
            .filter_map(|m| {
                let (start, end) = folded.original_range(m.start(), m.end())?;
                if is_bounded(text, start, end) {
                    Some(Span { start, end, pattern: m.value() })
                } else {
                    None
                }
            })
            .collect();

        candidates.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

        let mut selected = Vec::with_capacity(candidates.len());
        let mut last_end = 0usize;
        for span in candidates {
            if span.start < last_end {
                continue;
            }
            last_end = span.end;
            selected.push(span);
        }
        selected
    }

    pub fn is_match(&self, text: &str) -> bool {
        !self.find_spans(text).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn matched<'a>(text: &'a str, spans: &[Span]) -> Vec<&'a str> {
        spans.iter().map(|s| &text[s.start..s.end]).collect()
    }

    #[test]
    fn test_empty_pattern_list_is_rejected() {
        let empty: Vec<&str> = Vec::new();
        assert_eq!(WordMatcher::new(empty).unwrap_err(), MatcherError::NoPatterns);
        assert_eq!(WordMatcher::new(vec!["", ""]).unwrap_err(), MatcherError::NoPatterns);
    }

    #[test]
    fn test_case_insensitive_whole_words() {
        let matcher = WordMatcher::new(vec!["drop", "union"]).unwrap();
        let text = "DROP table; Union all; dropped";
        assert_eq!(matched(text, &matcher.find_spans(text)), vec!["DROP", "Union"]);
    }

    #[test]
    fn test_longest_match_wins_at_same_start() {
        let matcher = WordMatcher::new(vec!["bad", "bad word"]).unwrap();
        let text = "a bad word here";
        assert_eq!(matched(text, &matcher.find_spans(text)), vec!["bad word"]);
    }

    #[test]
    fn test_shorter_match_used_when_longer_fails_boundary() {
        let matcher = WordMatcher::new(vec!["select", "selection"]).unwrap();
        let text = "selections select";
        assert_eq!(matched(text, &matcher.find_spans(text)), vec!["select"]);
    }

    #[test]
    fn test_duplicate_patterns_collapse() {
        let matcher = WordMatcher::new(vec!["Drop", "drop", "DROP"]).unwrap();
        assert_eq!(matcher.pattern_count(), 1);
        assert_eq!(matcher.patterns()[0], "drop");
    }

    #[test]
    fn test_non_ascii_input_offsets() {
        let matcher = WordMatcher::new(vec!["mierda"]).unwrap();
        let text = "¡Qué MIERDA!";
        let spans = matcher.find_spans(text);
        assert_eq!(matched(text, &spans), vec!["MIERDA"]);
        assert!(matcher.is_match(text));
    }
}
