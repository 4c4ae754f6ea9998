// formguard-core/src/lib.rs
//! # Formguard Core Library
//!
//! `formguard-core` provides the platform-independent logic behind form
//! intake hygiene: it compiles a blocked-term matcher out of an external term
//! list, a multi-locale profanity dictionary and a SQL keyword list, applies
//! that matcher to free-text fields, and mints tracking identifiers that
//! encode a submission's category, location and date.
//!
//! ## Modules
//!
//! * `config`: YAML configuration for the filter, the term source and the tracking generator.
//! * `terms`: Term-list parsing, the profanity dictionary and pluggable `TermSource`s.
//! * `obfuscation`: Breadth-first expansion of words into look-alike spellings.
//! * `engine`: The `MatchEngine` trait every compiled matcher is built on.
//! * `engines`: The regex and Aho-Corasick `MatchEngine` implementations.
//! * `sanitizers`: Term-set compilation and caching, input sanitization and SQL keyword stripping.
//! * `blocked_match`: Reporting types for detected terms.
//! * `geo`: State and county FIPS lookup tables.
//! * `tracking`: Tracking-identifier generation and parsing.
//! * `validators`: Structural checks for tracking-identifier segments.
//! * `headless`: One-call wiring of a configuration into a ready sanitizer.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use formguard_core::{headless_sanitize_string, FormguardConfig};
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = FormguardConfig::load_default()?;
//!     let clean = headless_sanitize_string(&config, "1; DROP TABLE users").await?;
//!     println!("{}", clean);
//!
//!     let id = formguard_core::generate("Merchant", "CA", "Orange County", "0000", "0001", None)?;
//!     println!("{}", id);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library-level failures are [`FormguardError`] values; loaders that touch
//! the filesystem return `anyhow::Result` with context attached.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod blocked_match;
pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod geo;
pub mod headless;
pub mod obfuscation;
pub mod sanitizers;
pub mod terms;
pub mod tracking;
pub mod validators;

/// Configuration types and loaders.
pub use config::{
    default_config_path, merge_config, validate_config, EngineKind, FilterConfig, FormguardConfig, TermsConfig,
    TrackingConfig,
};

pub use errors::FormguardError;

pub use engine::MatchEngine;
pub use engines::regex_engine::RegexEngine;
pub use engines::word_engine::AhoCorasickEngine;

pub use blocked_match::{redact_sensitive, BlockedMatch};

pub use obfuscation::{expand_obfuscated_variants, ObfuscationMap};

pub use terms::dictionary::ProfanityDictionary;
pub use terms::source::{FileTermSource, StaticTermSource, TermSource, UrlTermSource};
pub use terms::{fetch_external_terms, load_external_terms, parse_term_list};

pub use sanitizers::compiler::{compile, get_or_compile, CompiledMatcher, FilterOptions, TermSet};
pub use sanitizers::input::{sanitize, Sanitizer};
pub use sanitizers::sql::{strip_sql_keywords, SqlKeywordStripper};

pub use geo::GeoTables;
pub use tracking::{date_stamp, generate, Category, TrackingId, TrackingIdGenerator, TrackingRequest};

pub use headless::{build_sanitizer, headless_sanitize_string};
