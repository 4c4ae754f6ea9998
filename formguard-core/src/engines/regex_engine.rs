// formguard-core/src/engines/regex_engine.rs
//! A `MatchEngine` that compiles the whole term set into one
//! case-insensitive, word-bounded regex alternation.
//! License: MIT OR APACHE 2.0

use std::ops::Range;

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::config::EngineKind;
use crate::engine::MatchEngine;
use crate::errors::FormguardError;

#[derive(Debug)]
pub struct RegexEngine {
    regex: Regex,
}

impl RegexEngine {
    /// Builds `\bterm1\b|\bterm2\b|...` over the escaped terms.
    ///
    /// `terms` should already be ordered longest-first so that, at a given
    /// position, the longest blocked term is the one removed.
    pub fn new(terms: &[String], size_limit: usize) -> Result<Self, FormguardError> {
        let pattern = build_alternation(terms);
        debug!(
            target: "formguard_core::compiler",
            "Compiling regex alternation over {} term(s), pattern length {}.",
            terms.len(),
            pattern.len()
        );

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .size_limit(size_limit)
            .dfa_size_limit(size_limit)
            .build()
            .map_err(|e| FormguardError::MatcherCompilation(terms.len(), e))?;

        Ok(Self { regex })
    }

    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }
}

/// Joins escaped, word-bounded terms into one alternation.
pub fn build_alternation(terms: &[String]) -> String {
    terms
        .iter()
        .map(|term| format!(r"\b{}\b", regex::escape(term)))
        .collect::<Vec<_>>()
        .join("|")
}

impl MatchEngine for RegexEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Regex
    }

    fn find_spans(&self, text: &str) -> Vec<Range<usize>> {
        self.regex.find_iter(text).map(|m| m.range()).collect()
    }

    fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_alternation_escapes_metacharacters() {
        let pattern = build_alternation(&terms(&["a(e", "$hit"]));
        assert_eq!(pattern, r"\ba\(e\b|\b\$hit\b");
    }

    #[test]
    fn test_matches_whole_words_case_insensitively() {
        let engine = RegexEngine::new(&terms(&["drop", "union"]), 1 << 20).unwrap();
        let text = "DROP it; reunion; Union";
        let found: Vec<&str> = engine.find_spans(text).into_iter().map(|r| &text[r]).collect();
        assert_eq!(found, vec!["DROP", "Union"]);
        assert_eq!(engine.kind(), EngineKind::Regex);
    }

    #[test]
    fn test_size_limit_is_enforced() {
        let many: Vec<String> = (0..2000).map(|i| format!("term{:04}word", i)).collect();
        let result = RegexEngine::new(&many, 1024);
        assert!(matches!(result, Err(FormguardError::MatcherCompilation(2000, _))));
    }
}
