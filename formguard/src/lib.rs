// formguard/src/lib.rs
//! # Formguard CLI Application
//!
//! This crate provides the command-line interface for `formguard-core`:
//! sanitizing text, stripping SQL keywords, previewing obfuscation variants,
//! inspecting the compiled term list and minting tracking identifiers.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
