//! Leetspeak-style variant expansion for the profanity dictionary.
//!
//! Each dictionary word is expanded into the spellings reachable by swapping
//! up to `max_depth` characters for visually similar substitutes
//! (`a -> @`, `s -> $`, ...). Expansion happens once at compile time; the
//! matcher itself never looks at the map.
//!
//! License: MIT OR Apache-2.0

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::errors::FormguardError;

/// Letter -> substitute characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObfuscationMap {
    substitutes: BTreeMap<char, Vec<char>>,
}

impl ObfuscationMap {
    pub fn new(substitutes: BTreeMap<char, Vec<char>>) -> Self {
        Self { substitutes }
    }

    /// Builds a map from its configuration form, where keys and substitutes
    /// are strings that must each hold exactly one character.
    pub fn from_config(raw: &BTreeMap<String, Vec<String>>) -> Result<Self, FormguardError> {
        let mut substitutes = BTreeMap::new();
        for (key, alternatives) in raw {
            let letter = single_char(key).ok_or_else(|| {
                FormguardError::InvalidConfig(format!("obfuscation key '{}' is not a single character", key))
            })?;
            let mut chars = Vec::with_capacity(alternatives.len());
            for alt in alternatives {
                let c = single_char(alt).ok_or_else(|| {
                    FormguardError::InvalidConfig(format!(
                        "obfuscation substitute '{}' for '{}' is not a single character",
                        alt, key
                    ))
                })?;
                if !chars.contains(&c) {
                    chars.push(c);
                }
            }
            substitutes.insert(letter, chars);
        }
        Ok(Self { substitutes })
    }

    pub fn substitutes_for(&self, c: char) -> &[char] {
        self.substitutes.get(&c).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.substitutes.is_empty()
    }

    pub fn expand(&self, word: &str, max_depth: usize) -> BTreeSet<String> {
        expand_obfuscated_variants(word, max_depth, self)
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// One entry of the expansion worklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionState {
    pub text: Vec<char>,
    pub depth_used: usize,
    /// Next character index to consider.
    pub position: usize,
}

/// Every spelling of `word` reachable by substituting at most `max_depth`
/// positions, scanned left to right, each position visited once.
///
/// The original word is always part of the result. The output grows
/// exponentially with `max_depth`, which is why callers keep it small.
pub fn expand_obfuscated_variants(word: &str, max_depth: usize, map: &ObfuscationMap) -> BTreeSet<String> {
    let mut variants = BTreeSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(ExpansionState {
        text: word.chars().collect(),
        depth_used: 0,
        position: 0,
    });

    while let Some(state) = queue.pop_front() {
        if state.depth_used == max_depth || state.position >= state.text.len() {
            variants.insert(state.text.iter().collect());
            continue;
        }

        let current = state.text[state.position];
        for &substitute in map.substitutes_for(current) {
            let mut text = state.text.clone();
            text[state.position] = substitute;
            queue.push_back(ExpansionState {
                text,
                depth_used: state.depth_used + 1,
                position: state.position + 1,
            });
        }

        queue.push_back(ExpansionState {
            position: state.position + 1,
            ..state
        });
    }

    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ace_map() -> ObfuscationMap {
        ObfuscationMap::new(BTreeMap::from([
            ('a', vec!['@', '4']),
            ('c', vec!['(']),
            ('e', vec!['3']),
        ]))
    }

    #[test]
    fn test_depth_one_closure() {
        let variants = expand_obfuscated_variants("ace", 1, &ace_map());
        let expected: BTreeSet<String> = ["ace", "@ce", "4ce", "a(e", "ac3"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(variants, expected);
    }

    #[test]
    fn test_depth_zero_is_identity() {
        let variants = expand_obfuscated_variants("ace", 0, &ace_map());
        assert_eq!(variants.len(), 1);
        assert!(variants.contains("ace"));
    }

    #[test]
    fn test_depth_two_counts() {
        // Positions have 2, 1 and 1 substitutes: 1 + (2 + 1 + 1) + (2*1 + 2*1 + 1*1) = 10.
        let variants = expand_obfuscated_variants("ace", 2, &ace_map());
        assert_eq!(variants.len(), 10);
        assert!(variants.contains("@(e"));
        assert!(variants.contains("4c3"));
        assert!(!variants.contains("@(3"));
    }

    #[test]
    fn test_unmapped_word_is_returned_as_is() {
        let variants = ace_map().expand("xyz", 2);
        assert_eq!(variants.into_iter().collect::<Vec<_>>(), vec!["xyz".to_string()]);
    }

    #[test]
    fn test_empty_word_yields_empty_variant() {
        let variants = ace_map().expand("", 2);
        assert!(variants.contains(""));
        assert_eq!(variants.len(), 1);
    }

    #[test]
    fn test_from_config_rejects_multi_char_entries() {
        let raw = BTreeMap::from([("ab".to_string(), vec!["@".to_string()])]);
        assert!(ObfuscationMap::from_config(&raw).is_err());

        let raw = BTreeMap::from([("a".to_string(), vec!["/\\".to_string()])]);
        assert!(ObfuscationMap::from_config(&raw).is_err());

        let raw = BTreeMap::from([("a".to_string(), vec!["@".to_string(), "@".to_string()])]);
        let map = ObfuscationMap::from_config(&raw).unwrap();
        assert_eq!(map.substitutes_for('a'), &['@']);
    }
}
