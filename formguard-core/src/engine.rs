// formguard-core/src/engine.rs
//! Defines the `MatchEngine` trait behind a compiled blocked-term matcher.
//!
//! The compiler can back a matcher with different engines (a regex
//! alternation or an Aho-Corasick automaton). This module defines the
//! contract every engine adheres to so the sanitizer never needs to know
//! which one it is talking to.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;
use std::ops::Range;

use crate::config::EngineKind;

/// A blocked-term search strategy over a fixed, already normalized term set.
///
/// Engines are immutable after construction and shared across threads.
pub trait MatchEngine: Send + Sync + fmt::Debug {
    /// Which engine this is.
    fn kind(&self) -> EngineKind;

    /// Byte ranges of every blocked term found in `text`.
    ///
    /// Ranges are non-overlapping, sorted, and each one is delimited by word
    /// boundaries. At a given start the longest term wins.
    fn find_spans(&self, text: &str) -> Vec<Range<usize>>;

    /// Whether `text` contains at least one blocked term.
    fn is_match(&self, text: &str) -> bool {
        !self.find_spans(text).is_empty()
    }
}
