//! The multi-locale profanity dictionary.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::FormguardError;

static BUILTIN: Lazy<Result<ProfanityDictionary, String>> = Lazy::new(|| {
    ProfanityDictionary::from_json_str(include_str!("../../data/profanity.json")).map_err(|e| e.to_string())
});

/// Locale -> words, as shipped in `data/profanity.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ProfanityDictionary {
    locales: BTreeMap<String, Vec<String>>,
}

impl ProfanityDictionary {
    pub fn new(locales: BTreeMap<String, Vec<String>>) -> Self {
        Self { locales }
    }

    /// The bundled dictionary, parsed on first use.
    pub fn builtin() -> Result<&'static ProfanityDictionary, FormguardError> {
        BUILTIN
            .as_ref()
            .map_err(|e| FormguardError::DataFile("data/profanity.json".to_string(), e.clone()))
    }

    pub fn from_json_str(json: &str) -> Result<Self, FormguardError> {
        let dictionary: ProfanityDictionary = serde_json::from_str(json)
            .map_err(|e| FormguardError::DataFile("profanity dictionary".to_string(), e.to_string()))?;
        debug!(
            "Parsed profanity dictionary with {} locale(s).",
            dictionary.locales.len()
        );
        Ok(dictionary)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read profanity dictionary {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("Failed to parse profanity dictionary {}", path.display()))
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// All words across locales, deduplicated.
    pub fn flatten(&self) -> BTreeSet<String> {
        self.locales.values().flatten().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.values().all(Vec::is_empty)
    }
}
