//! compiler.rs - Builds and caches the blocked-term matcher.
//!
//! This module merges the external term list, the obfuscation-expanded
//! profanity dictionary and the SQL keyword list into one normalized
//! `TermSet`, and compiles that set into a `CompiledMatcher`. A global,
//! shared cache keyed by the term-set fingerprint avoids recompiling the
//! same set; a changed term list produces a new fingerprint and therefore a
//! fresh compilation.
//!
//! License: MIT OR APACHE 2.0

use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeSet, HashMap};
use std::hash::{Hash, Hasher};
use std::ops::Range;
use std::sync::{Arc, RwLock};

use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use log::debug;
use sha2::{Digest, Sha256};

use crate::config::{EngineKind, FilterConfig, FormguardConfig};
use crate::engine::MatchEngine;
use crate::engines::regex_engine::RegexEngine;
use crate::engines::word_engine::AhoCorasickEngine;
use crate::errors::FormguardError;
use crate::obfuscation::ObfuscationMap;
use crate::terms::dictionary::ProfanityDictionary;
use crate::terms::normalize_term;

/// Compiler settings distilled from a [`FilterConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    pub engine: EngineKind,
    pub min_term_length: usize,
    pub obfuscation_depth: usize,
    pub regex_size_limit: usize,
    pub obfuscation: ObfuscationMap,
    pub sql_keywords: Vec<String>,
}

impl FilterOptions {
    pub fn from_config(config: &FilterConfig) -> Result<Self, FormguardError> {
        Ok(Self {
            engine: config.engine(),
            min_term_length: config.min_term_length(),
            obfuscation_depth: config.obfuscation_depth(),
            regex_size_limit: config.regex_size_limit(),
            obfuscation: ObfuscationMap::from_config(&config.obfuscation_map)?,
            sql_keywords: config.sql_keywords.clone(),
        })
    }

    /// Options built from the embedded default configuration.
    pub fn builtin() -> Result<Self, FormguardError> {
        let config = FormguardConfig::load_default()?;
        Self::from_config(&config.filter)
    }
}

/// A normalized, length-filtered, deduplicated set of blocked terms.
///
/// Terms are stored longest-first (then lexicographically) so that
/// alternation-based engines prefer the longest term at a given position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermSet {
    terms: Vec<String>,
    fingerprint: String,
}

impl TermSet {
    /// Normalizes every term (NFKC, trim, lowercase) and drops those shorter
    /// than `min_term_length` characters.
    pub fn from_terms<I, S>(terms: I, min_term_length: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unique: BTreeSet<String> = terms
            .into_iter()
            .map(|t| normalize_term(t.as_ref()))
            .filter(|t| t.chars().count() >= min_term_length)
            .collect();

        let mut terms: Vec<String> = unique.into_iter().collect();
        terms.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));

        let fingerprint = fingerprint_terms(&terms);
        Self { terms, fingerprint }
    }

    /// Unions the external terms, every dictionary word expanded into its
    /// obfuscated variants, and the SQL keywords.
    pub fn build(
        external_terms: &BTreeSet<String>,
        dictionary: &ProfanityDictionary,
        options: &FilterOptions,
    ) -> Self {
        let mut raw: BTreeSet<String> = external_terms.clone();

        let words = dictionary.flatten();
        for word in &words {
            let lowered = normalize_term(word);
            raw.extend(options.obfuscation.expand(&lowered, options.obfuscation_depth));
        }
        raw.extend(options.sql_keywords.iter().cloned());

        debug!(
            "Building term set: {} external, {} dictionary word(s), {} SQL keyword(s), {} raw term(s) after expansion.",
            external_terms.len(),
            words.len(),
            options.sql_keywords.len(),
            raw.len()
        );

        Self::from_terms(raw, options.min_term_length)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t == term)
    }

    /// Hex SHA-256 over the ordered terms.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn fingerprint_terms(terms: &[String]) -> String {
    let mut hasher = Sha256::new();
    for term in terms {
        hasher.update(term.as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}

/// An immutable, ready-to-use blocked-term matcher.
#[derive(Debug)]
pub struct CompiledMatcher {
    engine: Box<dyn MatchEngine>,
    terms: TermSet,
}

impl CompiledMatcher {
    pub fn kind(&self) -> EngineKind {
        self.engine.kind()
    }

    pub fn terms(&self) -> &TermSet {
        &self.terms
    }

    pub fn fingerprint(&self) -> &str {
        self.terms.fingerprint()
    }

    pub fn find_spans(&self, text: &str) -> Vec<Range<usize>> {
        self.engine.find_spans(text)
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.engine.is_match(text)
    }
}

/// Compiles an already built term set. Returns `Ok(None)` when the set is
/// empty, which callers treat as "no filtering".
pub fn compile_term_set(terms: TermSet, options: &FilterOptions) -> Result<Option<CompiledMatcher>, FormguardError> {
    if terms.is_empty() {
        debug!("Term set is empty; no matcher compiled.");
        return Ok(None);
    }

    let engine: Box<dyn MatchEngine> = match options.engine {
        EngineKind::Regex => Box::new(RegexEngine::new(terms.terms(), options.regex_size_limit)?),
        EngineKind::AhoCorasick => Box::new(AhoCorasickEngine::new(terms.terms())?),
    };

    debug!(
        "Compiled {:?} matcher over {} term(s), fingerprint {}.",
        options.engine,
        terms.len(),
        &terms.fingerprint()[..12]
    );
    Ok(Some(CompiledMatcher { engine, terms }))
}

/// Builds the merged term set and compiles it.
pub fn compile(
    external_terms: &BTreeSet<String>,
    dictionary: &ProfanityDictionary,
    options: &FilterOptions,
) -> Result<Option<CompiledMatcher>, FormguardError> {
    compile_term_set(TermSet::build(external_terms, dictionary, options), options)
}

lazy_static! {
    /// A thread-safe, global cache of compiled matchers.
    /// The key is a hash of the term-set fingerprint and the engine settings.
    static ref COMPILED_MATCHER_CACHE: RwLock<HashMap<u64, Arc<CompiledMatcher>>> = RwLock::new(HashMap::new());
}

fn cache_key(terms: &TermSet, options: &FilterOptions) -> u64 {
    let mut hasher = DefaultHasher::new();
    terms.fingerprint().hash(&mut hasher);
    options.engine.hash(&mut hasher);
    options.regex_size_limit.hash(&mut hasher);
    hasher.finish()
}

/// Gets a matcher from the cache or compiles it if not found.
///
/// Empty term sets are never cached and yield `Ok(None)`.
pub fn get_or_compile(
    external_terms: &BTreeSet<String>,
    dictionary: &ProfanityDictionary,
    options: &FilterOptions,
) -> Result<Option<Arc<CompiledMatcher>>> {
    let terms = TermSet::build(external_terms, dictionary, options);
    if terms.is_empty() {
        return Ok(None);
    }
    let key = cache_key(&terms, options);

    {
        let cache = COMPILED_MATCHER_CACHE
            .read()
            .map_err(|_| anyhow!("Compiled matcher cache lock poisoned"))?;
        if let Some(matcher) = cache.get(&key) {
            debug!("Serving compiled matcher from cache for key: {}", key);
            return Ok(Some(Arc::clone(matcher)));
        }
    }

    debug!("Compiled matcher not found in cache. Compiling now.");
    let Some(compiled) = compile_term_set(terms, options)? else {
        return Ok(None);
    };
    let compiled = Arc::new(compiled);

    COMPILED_MATCHER_CACHE
        .write()
        .map_err(|_| anyhow!("Compiled matcher cache lock poisoned"))?
        .insert(key, Arc::clone(&compiled));

    debug!("Successfully compiled and cached matcher for key: {}", key);
    Ok(Some(compiled))
}

/// Drops every cached matcher.
pub fn clear_cache() -> Result<()> {
    COMPILED_MATCHER_CACHE
        .write()
        .map_err(|_| anyhow!("Compiled matcher cache lock poisoned"))?
        .clear();
    Ok(())
}
