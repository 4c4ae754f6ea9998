// formguard-core/src/blocked_match.rs
//! Reporting types for blocked terms found in user input, and debug logging
//! that keeps the matched text out of logs unless explicitly allowed.

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Whether matched text may appear verbatim in debug logs.
    static ref TERM_DEBUG_ALLOWED: bool = {
        std::env::var("FORMGUARD_ALLOW_DEBUG_TERMS")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// One blocked term found in a (normalized) input string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedMatch {
    /// The text as it appeared in the input.
    pub matched_text: String,
    /// Byte offsets into the normalized input.
    pub start: usize,
    pub end: usize,
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

fn get_loggable_content(content: &str) -> String {
    if *TERM_DEBUG_ALLOWED {
        content.to_string()
    } else {
        redact_sensitive(content)
    }
}

pub fn log_blocked_match_debug(module_path: &str, m: &BlockedMatch) {
    debug!(
        "{} Blocked term at {}..{}: '{}'",
        module_path,
        m.start,
        m.end,
        get_loggable_content(&m.matched_text)
    );
}
