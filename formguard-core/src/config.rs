//! Configuration management for `formguard-core`.
//!
//! This module defines the data structures that drive the blocked-term filter,
//! the external term source and the tracking-identifier generator. It handles
//! YAML (de)serialization and provides utilities for loading, merging and
//! validating configs.
//!
//! Scalar settings are `Option`s so that a user file only overrides what it
//! actually sets; accessors supply the built-in defaults.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::validators;

/// Terms shorter than this (in characters) are never compiled.
pub const DEFAULT_MIN_TERM_LENGTH: usize = 3;
/// Number of positions the obfuscation expansion may substitute.
pub const DEFAULT_OBFUSCATION_DEPTH: usize = 2;
/// Compiled-size ceiling for the blocked-term regex.
pub const DEFAULT_REGEX_SIZE_LIMIT: usize = 32 * (1 << 20);
/// State code embedded when the state cannot be resolved.
pub const DEFAULT_FALLBACK_STATE_FIPS: &str = "78";
/// County code embedded when neither the county nor the address resolves.
pub const DEFAULT_FALLBACK_COUNTY_FIPS: &str = "78030";

const CONFIG_DIR_NAME: &str = "formguard";
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Which matching engine backs a compiled blocked-term matcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineKind {
    /// One case-insensitive, word-bounded regex alternation.
    #[default]
    Regex,
    /// Double-array Aho-Corasick automaton with word-boundary post-checks.
    AhoCorasick,
}

/// Settings for the blocked-term compiler and the sanitizer.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterConfig {
    pub engine: Option<EngineKind>,
    pub min_term_length: Option<usize>,
    pub obfuscation_depth: Option<usize>,
    pub regex_size_limit: Option<usize>,
    /// Literal inputs that are never sanitized.
    pub exceptions: Vec<String>,
    /// Keywords stripped by `strip_sql_keywords` and merged into the term set.
    pub sql_keywords: Vec<String>,
    /// Letter -> visually similar substitutes.
    pub obfuscation_map: BTreeMap<String, Vec<String>>,
    /// Optional user profanity dictionary (JSON, locale -> words).
    pub profanity_path: Option<PathBuf>,
}

impl FilterConfig {
    pub fn engine(&self) -> EngineKind {
        self.engine.unwrap_or_default()
    }

    pub fn min_term_length(&self) -> usize {
        self.min_term_length.unwrap_or(DEFAULT_MIN_TERM_LENGTH)
    }

    pub fn obfuscation_depth(&self) -> usize {
        self.obfuscation_depth.unwrap_or(DEFAULT_OBFUSCATION_DEPTH)
    }

    pub fn regex_size_limit(&self) -> usize {
        self.regex_size_limit.unwrap_or(DEFAULT_REGEX_SIZE_LIMIT)
    }
}

/// Where the external (caller-maintained) blocked-term list comes from.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TermsConfig {
    pub url: Option<String>,
    pub path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

/// Settings for the tracking-identifier generator.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub strict_categories: Option<bool>,
    pub fallback_state_fips: Option<String>,
    pub fallback_county_fips: Option<String>,
    /// Optional replacement for the bundled geographic tables.
    pub geo_data_path: Option<PathBuf>,
}

impl TrackingConfig {
    pub fn strict_categories(&self) -> bool {
        self.strict_categories.unwrap_or(true)
    }

    pub fn fallback_state_fips(&self) -> &str {
        self.fallback_state_fips.as_deref().unwrap_or(DEFAULT_FALLBACK_STATE_FIPS)
    }

    pub fn fallback_county_fips(&self) -> &str {
        self.fallback_county_fips.as_deref().unwrap_or(DEFAULT_FALLBACK_COUNTY_FIPS)
    }
}

/// Represents the top-level configuration structure for formguard.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FormguardConfig {
    pub filter: FilterConfig,
    pub terms: TermsConfig,
    pub tracking: TrackingConfig,
}

impl FormguardConfig {
    /// Loads a configuration from a YAML file and validates it.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: FormguardConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_config(&config)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!(
            "Loaded config from {} ({} exception(s), {} SQL keyword(s)).",
            path.display(),
            config.filter.exceptions.len(),
            config.filter.sql_keywords.len()
        );
        Ok(config)
    }

    /// Loads the built-in defaults from the embedded configuration.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default configuration from embedded string...");
        let default_yaml = include_str!("../config/default_config.yaml");
        let config: FormguardConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default configuration")?;
        validate_config(&config).context("Embedded default configuration is invalid")?;
        Ok(config)
    }

    /// Defaults merged with `explicit` if given, otherwise with the user file
    /// at [`default_config_path`] when one exists.
    pub fn load_effective(explicit: Option<&Path>) -> Result<Self> {
        let defaults = Self::load_default()?;
        let user_path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path().filter(|p| p.is_file()),
        };
        let user = match user_path {
            Some(p) => Some(Self::load_from_file(&p)?),
            None => None,
        };
        let merged = merge_config(defaults, user);
        validate_config(&merged).context("Merged configuration is invalid")?;
        Ok(merged)
    }
}

/// `<config_dir>/formguard/config.yaml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Merges a user configuration over the defaults.
///
/// `Option` fields override when set, lists replace the defaults when
/// non-empty, and obfuscation-map entries override per letter.
pub fn merge_config(default_config: FormguardConfig, user_config: Option<FormguardConfig>) -> FormguardConfig {
    let Some(user) = user_config else {
        debug!("merge_config called without a user config; using defaults.");
        return default_config;
    };

    let FormguardConfig { filter: base_filter, terms: base_terms, tracking: base_tracking } = default_config;
    let user_filter = user.filter;

    let mut obfuscation_map = base_filter.obfuscation_map;
    for (letter, substitutes) in user_filter.obfuscation_map {
        debug!("Overriding obfuscation substitutes for '{}'.", letter);
        obfuscation_map.insert(letter, substitutes);
    }

    let filter = FilterConfig {
        engine: user_filter.engine.or(base_filter.engine),
        min_term_length: user_filter.min_term_length.or(base_filter.min_term_length),
        obfuscation_depth: user_filter.obfuscation_depth.or(base_filter.obfuscation_depth),
        regex_size_limit: user_filter.regex_size_limit.or(base_filter.regex_size_limit),
        exceptions: replace_if_set(base_filter.exceptions, user_filter.exceptions),
        sql_keywords: replace_if_set(base_filter.sql_keywords, user_filter.sql_keywords),
        obfuscation_map,
        profanity_path: user_filter.profanity_path.or(base_filter.profanity_path),
    };

    // A user that names one term source means that source, not both.
    let terms = if user.terms.url.is_some() || user.terms.path.is_some() {
        TermsConfig {
            url: user.terms.url,
            path: user.terms.path,
            timeout_secs: user.terms.timeout_secs.or(base_terms.timeout_secs),
        }
    } else {
        TermsConfig {
            timeout_secs: user.terms.timeout_secs.or(base_terms.timeout_secs),
            ..base_terms
        }
    };

    let tracking = TrackingConfig {
        strict_categories: user.tracking.strict_categories.or(base_tracking.strict_categories),
        fallback_state_fips: user.tracking.fallback_state_fips.or(base_tracking.fallback_state_fips),
        fallback_county_fips: user.tracking.fallback_county_fips.or(base_tracking.fallback_county_fips),
        geo_data_path: user.tracking.geo_data_path.or(base_tracking.geo_data_path),
    };

    FormguardConfig { filter, terms, tracking }
}

fn replace_if_set(base: Vec<String>, user: Vec<String>) -> Vec<String> {
    if user.is_empty() {
        base
    } else {
        user
    }
}

/// Checks the invariants the compiler and generator rely on.
pub fn validate_config(config: &FormguardConfig) -> Result<()> {
    let mut errors = Vec::new();

    if config.filter.min_term_length == Some(0) {
        errors.push("`filter.min_term_length` must be at least 1.".to_string());
    }

    for (letter, substitutes) in &config.filter.obfuscation_map {
        if letter.chars().count() != 1 {
            errors.push(format!("Obfuscation map key '{}' must be a single character.", letter));
        }
        if substitutes.iter().any(|s| s.chars().count() != 1) {
            errors.push(format!("Obfuscation map entry '{}' has a substitute that is not a single character.", letter));
        }
    }

    if config.filter.sql_keywords.iter().any(|k| k.trim().is_empty()) {
        errors.push("`filter.sql_keywords` contains an empty keyword.".to_string());
    }

    if config.terms.url.is_some() && config.terms.path.is_some() {
        errors.push("Only one of `terms.url` and `terms.path` may be set.".to_string());
    }

    if let Some(code) = &config.tracking.fallback_state_fips {
        if !validators::is_valid_state_fips(code) {
            errors.push(format!("`tracking.fallback_state_fips` must be exactly 2 digits, got '{}'.", code));
        }
    }
    if let Some(code) = &config.tracking.fallback_county_fips {
        if !validators::is_valid_county_fips(code) {
            errors.push(format!("`tracking.fallback_county_fips` must be 3 to 5 digits, got '{}'.", code));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("Configuration validation failed:\n{}", errors.join("\n")))
    }
}
