//! Case folding that remembers where every folded byte came from.
//!
//! Lowercasing can change the byte length of a character (and occasionally
//! expand one character into several), so matches found in the folded text
//! have to be mapped back before they can be cut out of the original.

use alloc::string::String;
use alloc::vec::Vec;

/// Lowercased copy of a string plus a byte-level map back to the source.
#[derive(Debug, Clone)]
pub struct FoldedText {
    text: String,
    // For each folded byte: the byte range of the original character it came from.
    origins: Vec<(usize, usize)>,
}

impl FoldedText {
    pub fn new(original: &str) -> Self {
        let mut text = String::with_capacity(original.len());
        let mut origins = Vec::with_capacity(original.len());

        for (idx, ch) in original.char_indices() {
            let source = (idx, idx + ch.len_utf8());
            for lower in ch.to_lowercase() {
                text.push(lower);
                for _ in 0..lower.len_utf8() {
                    origins.push(source);
                }
            }
        }

        Self { text, origins }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Maps a folded `[start, end)` byte range to the smallest original range
    /// covering every source character it touches.
    pub fn original_range(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        if start >= end || end > self.origins.len() {
            return None;
        }
        let (orig_start, _) = self.origins[start];
        let (_, orig_end) = self.origins[end - 1];
        Some((orig_start, orig_end))
    }
}

/// Lowercases a single term the same way input text is folded.
pub fn fold_term(term: &str) -> String {
    term.chars().flat_map(char::to_lowercase).collect()
}
