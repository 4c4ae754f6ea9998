//! Standalone SQL-injection keyword stripping.
//!
//! Used where a field only needs SQL safety and not the full profanity
//! filter. Matching is whole-word and case-insensitive.

use log::{debug, error};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::config::FormguardConfig;
use crate::errors::FormguardError;

static BUILTIN_STRIPPER: Lazy<SqlKeywordStripper> = Lazy::new(|| {
    let keywords = match FormguardConfig::load_default() {
        Ok(config) => config.filter.sql_keywords,
        Err(e) => {
            error!("Failed to load built-in SQL keyword list: {:#}", e);
            Vec::new()
        }
    };
    SqlKeywordStripper::new(&keywords).unwrap_or_else(|e| {
        error!("Failed to compile built-in SQL keyword pattern: {}", e);
        SqlKeywordStripper::default()
    })
});

/// Removes whole-word SQL keywords from text.
#[derive(Debug, Clone, Default)]
pub struct SqlKeywordStripper {
    regex: Option<Regex>,
    keywords: Vec<String>,
}

impl SqlKeywordStripper {
    pub fn new(keywords: &[String]) -> Result<Self, FormguardError> {
        let keywords: Vec<String> = keywords
            .iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();

        if keywords.is_empty() {
            return Ok(Self::default());
        }

        let alternation = keywords
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let regex = RegexBuilder::new(&format!(r"\b(?:{})\b", alternation))
            .case_insensitive(true)
            .build()
            .map_err(|e| FormguardError::MatcherCompilation(keywords.len(), e))?;

        debug!("Compiled SQL keyword pattern over {} keyword(s).", keywords.len());
        Ok(Self { regex: Some(regex), keywords })
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn strip(&self, input: &str) -> String {
        match &self.regex {
            Some(regex) => regex.replace_all(input, "").into_owned(),
            None => input.to_string(),
        }
    }

    pub fn contains_keyword(&self, input: &str) -> bool {
        self.regex.as_ref().map_or(false, |r| r.is_match(input))
    }
}

/// Strips the built-in SQL keyword list from `input`.
pub fn strip_sql_keywords(input: &str) -> String {
    BUILTIN_STRIPPER.strip(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_builtin_keywords_whole_word() {
        assert_eq!(strip_sql_keywords("1; DROP TABLE users"), "1;  TABLE users");
        assert_eq!(strip_sql_keywords("Select * from t UNION select 1"), " * from t   1");
        assert_eq!(strip_sql_keywords("dropped selection"), "dropped selection");
    }

    #[test]
    fn test_custom_keywords() {
        let stripper = SqlKeywordStripper::new(&["waitfor".to_string(), " ".to_string()]).unwrap();
        assert_eq!(stripper.keywords(), &["waitfor".to_string()]);
        assert_eq!(stripper.strip("x WAITFOR delay"), "x  delay");
        assert!(stripper.contains_keyword("WaitFor"));
    }

    #[test]
    fn test_empty_list_is_passthrough() {
        let stripper = SqlKeywordStripper::new(&[]).unwrap();
        assert_eq!(stripper.strip("DROP"), "DROP");
        assert!(!stripper.contains_keyword("DROP"));
    }
}
