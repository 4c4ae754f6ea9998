//! State and county FIPS lookup tables.
//!
//! Built once from a JSON data file (the bundled `data/geo.json` or a user
//! file of the same shape). County names are keyed with the literal
//! `" County"` / `" Municipio"` suffixes removed, so `"Orange County"` and
//! `"Orange"` resolve alike. Counties are indexed per state and in one flat
//! table where the first occurrence of a name wins.
//!
//! License: MIT OR Apache-2.0

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::FormguardError;

const COUNTY_SUFFIXES: [&str; 2] = [" County", " Municipio"];

static BUILTIN: Lazy<Result<Arc<GeoTables>, String>> = Lazy::new(|| {
    GeoTables::from_json_str(include_str!("../data/geo.json"))
        .map(Arc::new)
        .map_err(|e| e.to_string())
});

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CountyRecord {
    pub name: String,
    pub fips: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StateRecord {
    pub name: String,
    pub abbreviation: String,
    pub fips: String,
    #[serde(default)]
    pub counties: Vec<CountyRecord>,
}

/// The on-disk shape of a geographic data file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeoData {
    pub states: Vec<StateRecord>,
}

/// Removes the first `" County"` and `" Municipio"` from a county name.
pub fn strip_county_suffix(name: &str) -> String {
    let mut stripped = name.to_string();
    for suffix in COUNTY_SUFFIXES {
        stripped = stripped.replacen(suffix, "", 1);
    }
    stripped
}

fn county_key(name: &str) -> String {
    strip_county_suffix(name.trim()).trim().to_lowercase()
}

#[derive(Debug, Clone, Default)]
pub struct GeoTables {
    /// Lowercased state name and abbreviation -> state FIPS.
    states: HashMap<String, String>,
    /// State FIPS -> county key -> county FIPS.
    counties_by_state: HashMap<String, HashMap<String, String>>,
    /// County key -> county FIPS, first occurrence wins.
    counties: HashMap<String, String>,
}

impl GeoTables {
    pub fn from_data(data: &GeoData) -> Self {
        let mut tables = GeoTables::default();

        for state in &data.states {
            tables.states.insert(state.name.trim().to_lowercase(), state.fips.clone());
            tables.states.insert(state.abbreviation.trim().to_lowercase(), state.fips.clone());

            let scoped = tables.counties_by_state.entry(state.fips.clone()).or_default();
            for county in &state.counties {
                let key = county_key(&county.name);
                scoped.entry(key.clone()).or_insert_with(|| county.fips.clone());
                tables.counties.entry(key).or_insert_with(|| county.fips.clone());
            }
        }

        debug!(
            "Built geographic tables: {} state key(s), {} distinct county name(s).",
            tables.states.len(),
            tables.counties.len()
        );
        tables
    }

    pub fn from_json_str(json: &str) -> Result<Self, FormguardError> {
        let data: GeoData = serde_json::from_str(json)
            .map_err(|e| FormguardError::DataFile("geographic data".to_string(), e.to_string()))?;
        Ok(Self::from_data(&data))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read geographic data {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("Failed to parse geographic data {}", path.display()))
    }

    /// The bundled tables, parsed on first use.
    pub fn builtin() -> Result<Arc<GeoTables>, FormguardError> {
        BUILTIN
            .as_ref()
            .map(Arc::clone)
            .map_err(|e| FormguardError::DataFile("data/geo.json".to_string(), e.clone()))
    }

    /// State FIPS for a state name or abbreviation, case-insensitively.
    pub fn state_fips(&self, state: &str) -> Option<&str> {
        self.states.get(&state.trim().to_lowercase()).map(String::as_str)
    }

    /// County FIPS for a county name, looked up within `state_fips` first
    /// and then across all states.
    pub fn county_fips(&self, county: &str, state_fips: Option<&str>) -> Option<&str> {
        let key = county_key(county);
        if key.is_empty() {
            return None;
        }
        state_fips
            .and_then(|fips| self.counties_by_state.get(fips))
            .and_then(|scoped| scoped.get(&key))
            .or_else(|| self.counties.get(&key))
            .map(String::as_str)
    }

    /// County FIPS from the county field, falling back to the comma-separated
    /// segments of `full_address`, tried left to right.
    pub fn resolve_county(&self, county: &str, state_fips: Option<&str>, full_address: Option<&str>) -> Option<&str> {
        if let Some(fips) = self.county_fips(county, state_fips) {
            return Some(fips);
        }
        let address = full_address?;
        address
            .split(',')
            .map(str::trim)
            .find_map(|segment| self.county_fips(segment, state_fips))
    }

    pub fn state_count(&self) -> usize {
        self.counties_by_state.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_county_suffix() {
        assert_eq!(strip_county_suffix("Orange County"), "Orange");
        assert_eq!(strip_county_suffix("San Juan Municipio"), "San Juan");
        assert_eq!(strip_county_suffix("District of Columbia"), "District of Columbia");
    }

    #[test]
    fn test_builtin_state_lookup() {
        let geo = GeoTables::builtin().unwrap();
        assert_eq!(geo.state_fips("California"), Some("06"));
        assert_eq!(geo.state_fips("ca"), Some("06"));
        assert_eq!(geo.state_fips(" PUERTO RICO "), Some("72"));
        assert_eq!(geo.state_fips("Nowhereland"), None);
    }

    #[test]
    fn test_builtin_county_lookup_prefers_state() {
        let geo = GeoTables::builtin().unwrap();
        assert_eq!(geo.county_fips("Orange County", Some("06")), Some("059"));
        assert_eq!(geo.county_fips("Orange", Some("12")), Some("095"));
        // Unscoped lookups take the first occurrence in the data file.
        assert_eq!(geo.county_fips("Orange", None), Some("059"));
        assert_eq!(geo.county_fips("San Juan Municipio", None), Some("127"));
        assert_eq!(geo.county_fips("", None), None);
    }

    #[test]
    fn test_resolve_county_walks_address_segments() {
        let geo = GeoTables::builtin().unwrap();
        let fips = geo.resolve_county("Nonexistent", Some("06"), Some("123 Main St, Orange County, CA"));
        assert_eq!(fips, Some("059"));
        assert_eq!(geo.resolve_county("Nonexistent", None, Some("1 Elm St, Nowhere")), None);
        assert_eq!(geo.resolve_county("Nonexistent", None, None), None);
    }

    #[test]
    fn test_custom_data() {
        let json = r#"{"states":[{"name":"Testland","abbreviation":"TL","fips":"99","counties":[{"name":"Alpha County","fips":"001"}]}]}"#;
        let geo = GeoTables::from_json_str(json).unwrap();
        assert_eq!(geo.state_fips("tl"), Some("99"));
        assert_eq!(geo.county_fips("alpha", Some("99")), Some("001"));
        assert_eq!(geo.state_count(), 1);
    }
}
