// formguard-core/src/engines/mod.rs
//! Concrete `MatchEngine` implementations.
//!
//! Each engine lives in its own file and is selected through
//! [`EngineKind`](crate::config::EngineKind) when a term set is compiled.
//!
//! # License
//! MIT OR APACHE 2.0

pub mod regex_engine;
pub mod word_engine;
