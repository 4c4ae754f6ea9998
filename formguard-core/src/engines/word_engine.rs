// formguard-core/src/engines/word_engine.rs
//! A `MatchEngine` backed by the `formguard-matcher` Aho-Corasick automaton.
//!
//! Scales better than one giant alternation once the obfuscation-expanded
//! term set reaches tens of thousands of entries.
//! License: MIT OR APACHE 2.0

use std::ops::Range;

use formguard_matcher::{MatcherError, WordMatcher};
use log::debug;

use crate::config::EngineKind;
use crate::engine::MatchEngine;
use crate::errors::FormguardError;

#[derive(Debug)]
pub struct AhoCorasickEngine {
    matcher: WordMatcher,
}

impl AhoCorasickEngine {
    pub fn new(terms: &[String]) -> Result<Self, FormguardError> {
        let matcher = WordMatcher::new(terms).map_err(|e| match e {
            MatcherError::NoPatterns => FormguardError::AutomatonBuild("term set is empty".to_string()),
            MatcherError::Build(msg) => FormguardError::AutomatonBuild(msg),
        })?;
        debug!(
            target: "formguard_core::compiler",
            "Built Aho-Corasick automaton over {} pattern(s).",
            matcher.pattern_count()
        );
        Ok(Self { matcher })
    }
}

impl MatchEngine for AhoCorasickEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::AhoCorasick
    }

    fn find_spans(&self, text: &str) -> Vec<Range<usize>> {
        self.matcher
            .find_spans(text)
            .into_iter()
            .map(|span| span.start..span.end)
            .collect()
    }
}
