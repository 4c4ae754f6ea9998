//! Blocked-term inputs: the external term list, the profanity dictionary and
//! the normalization every term goes through before it is compiled.
//!
//! License: MIT OR Apache-2.0

pub mod dictionary;
pub mod source;

use std::collections::BTreeSet;

use log::{debug, info, warn};
use unicode_normalization::UnicodeNormalization;

use crate::errors::FormguardError;
use self::source::TermSource;

/// NFKC-normalizes, trims and lowercases a term.
pub fn normalize_term(term: &str) -> String {
    let normalized: String = term.nfkc().collect();
    normalized.trim().to_lowercase()
}

/// Parses comma- and/or newline-separated term text.
///
/// Each entry is lowercased, stripped of backslashes and wrapping quote
/// characters, and trimmed. Empty entries are dropped and duplicates
/// collapse.
pub fn parse_term_list(text: &str) -> BTreeSet<String> {
    text.split(|c| c == ',' || c == '\n' || c == '\r')
        .map(clean_term)
        .filter(|t| !t.is_empty())
        .collect()
}

fn clean_term(raw: &str) -> String {
    let lowered = raw.to_lowercase().replace('\\', "");
    lowered
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}

/// Fetches and parses the external term list, propagating fetch errors.
pub async fn fetch_external_terms(source: &dyn TermSource) -> Result<BTreeSet<String>, FormguardError> {
    debug!("Fetching external terms from {}.", source.describe());
    let text = source.fetch().await?;
    let terms = parse_term_list(&text);
    info!("Loaded {} external term(s) from {}.", terms.len(), source.describe());
    Ok(terms)
}

/// Fetches and parses the external term list.
///
/// A failed fetch is logged and yields an empty set, so compilation can
/// proceed with the built-in terms only.
pub async fn load_external_terms(source: &dyn TermSource) -> BTreeSet<String> {
    match fetch_external_terms(source).await {
        Ok(terms) => terms,
        Err(e) => {
            warn!("Continuing without external terms: {}", e);
            BTreeSet::new()
        }
    }
}
