//! Removes blocked terms from a free-text field.
//!
//! Input is NFKC-normalized first, so full-width and compatibility forms of a
//! blocked term are caught. Inputs on the exception allow-list pass through
//! untouched. After removal, whitespace runs collapse to one space and the
//! result is trimmed; a single trailing space survives if the input had one,
//! since form widgets re-feed the field while the user is still typing.

use std::sync::Arc;

use log::error;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::blocked_match::{log_blocked_match_debug, BlockedMatch};
use crate::config::FormguardConfig;
use crate::sanitizers::compiler::CompiledMatcher;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").expect("static regex is valid"));

static BUILTIN_EXCEPTIONS: Lazy<Vec<String>> = Lazy::new(|| match FormguardConfig::load_default() {
    Ok(config) => normalize_exceptions(&config.filter.exceptions),
    Err(e) => {
        error!("Failed to load built-in exception list: {:#}", e);
        Vec::new()
    }
});

fn normalize_exceptions(exceptions: &[String]) -> Vec<String> {
    exceptions
        .iter()
        .map(|e| e.nfkc().collect::<String>().trim().to_string())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Sanitizes `input` with the built-in exception list.
///
/// A `None` matcher is a no-op apart from normalization.
pub fn sanitize(input: &str, matcher: Option<&CompiledMatcher>) -> String {
    sanitize_with_exceptions(input, matcher, &BUILTIN_EXCEPTIONS)
}

/// Sanitizes `input`, exempting any input whose trimmed, normalized form
/// equals one of `exceptions` (which must already be normalized).
pub fn sanitize_with_exceptions(input: &str, matcher: Option<&CompiledMatcher>, exceptions: &[String]) -> String {
    let normalized: String = input.nfkc().collect();

    let Some(matcher) = matcher else {
        return normalized;
    };
    if is_exception(&normalized, exceptions) {
        return normalized;
    }

    let spans = matcher.find_spans(&normalized);
    let mut stripped = String::with_capacity(normalized.len());
    let mut last_end = 0usize;
    for span in spans {
        stripped.push_str(&normalized[last_end..span.start]);
        last_end = span.end;
    }
    stripped.push_str(&normalized[last_end..]);

    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");
    let mut result = collapsed.trim().to_string();
    if input.ends_with(' ') {
        result.push(' ');
    }
    result
}

fn is_exception(normalized: &str, exceptions: &[String]) -> bool {
    let trimmed = normalized.trim();
    exceptions.iter().any(|e| e == trimmed)
}

/// A compiled matcher bundled with its exception allow-list.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    matcher: Option<Arc<CompiledMatcher>>,
    exceptions: Vec<String>,
}

impl Sanitizer {
    pub fn new(matcher: Option<Arc<CompiledMatcher>>, exceptions: &[String]) -> Self {
        Self {
            matcher,
            exceptions: normalize_exceptions(exceptions),
        }
    }

    /// A sanitizer that only normalizes.
    pub fn passthrough() -> Self {
        Self::new(None, &[])
    }

    pub fn matcher(&self) -> Option<&CompiledMatcher> {
        self.matcher.as_deref()
    }

    pub fn exceptions(&self) -> &[String] {
        &self.exceptions
    }

    pub fn sanitize(&self, input: &str) -> String {
        sanitize_with_exceptions(input, self.matcher(), &self.exceptions)
    }

    /// Whether sanitizing `input` would remove anything.
    pub fn contains_blocked(&self, input: &str) -> bool {
        !self.find_blocked(input).is_empty()
    }

    /// The blocked terms `sanitize` would remove, with offsets into the
    /// normalized input.
    pub fn find_blocked(&self, input: &str) -> Vec<BlockedMatch> {
        let Some(matcher) = self.matcher() else {
            return Vec::new();
        };
        let normalized: String = input.nfkc().collect();
        if is_exception(&normalized, &self.exceptions) {
            return Vec::new();
        }

        matcher
            .find_spans(&normalized)
            .into_iter()
            .map(|span| {
                let m = BlockedMatch {
                    matched_text: normalized[span.clone()].to_string(),
                    start: span.start,
                    end: span.end,
                };
                log_blocked_match_debug(module_path!(), &m);
                m
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineKind;
    use crate::obfuscation::ObfuscationMap;
    use crate::sanitizers::compiler::{compile_term_set, FilterOptions, TermSet};

    fn matcher(terms: &[&str], engine: EngineKind) -> CompiledMatcher {
        let options = FilterOptions {
            engine,
            min_term_length: 3,
            obfuscation_depth: 0,
            regex_size_limit: 1 << 22,
            obfuscation: ObfuscationMap::default(),
            sql_keywords: Vec::new(),
        };
        compile_term_set(TermSet::from_terms(terms.iter().copied(), 3), &options)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_trailing_space_preserved_once() {
        let m = matcher(&["bad", "word"], EngineKind::Regex);
        assert_eq!(sanitize("bad word ", Some(&m)), " ");
        assert_eq!(sanitize("bad word", Some(&m)), "");
        assert_eq!(sanitize("hello   bad  there  ", Some(&m)), "hello there ");
    }

    #[test]
    fn test_none_matcher_only_normalizes() {
        assert_eq!(sanitize("hello world", None), "hello world");
        assert_eq!(sanitize("ｈｅｌｌｏ  world ", None), "hello  world ");
    }

    #[test]
    fn test_allow_listed_url_is_untouched() {
        let m = matcher(&["bigass", "ass", "fans"], EngineKind::Regex);
        assert_eq!(sanitize("https://bigassfans.com/", Some(&m)), "https://bigassfans.com/");
        assert_eq!(sanitize("  https://bigassfans.com/ ", Some(&m)), "  https://bigassfans.com/ ");
    }

    #[test]
    fn test_custom_exceptions() {
        let m = Arc::new(matcher(&["scunthorpe"], EngineKind::Regex));
        let sanitizer = Sanitizer::new(Some(m), &["Scunthorpe".to_string()]);
        assert_eq!(sanitizer.sanitize("Scunthorpe"), "Scunthorpe");
        assert_eq!(sanitizer.sanitize("near Scunthorpe"), "near");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for engine in [EngineKind::Regex, EngineKind::AhoCorasick] {
            let m = matcher(&["drop", "crap", "union select"], engine);
            let input = "Please   DROP the crap, then union select   everything ";
            let once = sanitize(input, Some(&m));
            assert_eq!(once, "Please the , then everything ");
            assert_eq!(sanitize(&once, Some(&m)), once);
        }
    }

    #[test]
    fn test_nfkc_catches_fullwidth_terms() {
        let m = matcher(&["drop"], EngineKind::Regex);
        assert_eq!(sanitize("ＤＲＯＰ table", Some(&m)), "table");
    }

    #[test]
    fn test_find_blocked_reports_offsets() {
        let sanitizer = Sanitizer::new(Some(Arc::new(matcher(&["spam"], EngineKind::AhoCorasick))), &[]);
        let found = sanitizer.find_blocked("no SPAM here");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].matched_text, "SPAM");
        assert_eq!((found[0].start, found[0].end), (3, 7));
        assert!(sanitizer.contains_blocked("spam"));
        assert!(!sanitizer.contains_blocked("spammy"));
        assert!(!Sanitizer::passthrough().contains_blocked("spam"));
    }
}
