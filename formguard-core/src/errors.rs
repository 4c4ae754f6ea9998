//! errors.rs - Custom error types for the formguard-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `formguard-core` library.
///
/// `#[non_exhaustive]` leaves room for new variants without breaking callers
/// that match on it.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FormguardError {
    #[error("Failed to compile blocked-term pattern over {0} term(s): {1}")]
    MatcherCompilation(usize, regex::Error),

    #[error("Failed to build blocked-term automaton: {0}")]
    AutomatonBuild(String),

    #[error("Failed to load external terms from {0}: {1}")]
    TermSource(String, String),

    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse data file '{0}': {1}")]
    DataFile(String, String),

    #[error("Malformed tracking identifier '{0}': {1}")]
    MalformedTrackingId(String, String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),
}
