//! Tracking-identifier generation.
//!
//! A tracking identifier correlates one form submission across systems:
//!
//! ```text
//! {SegmentCode}{StateFIPS}-{CountyFIPS}-{MMDDYYYY}-{Rand1}-{Rand2}-{IncA}-{IncB}
//! ```
//!
//! The state and county are resolved through [`GeoTables`]; lookups never
//! fail outward but fall back to fixed codes (`78` / `78030` by default) that
//! callers can detect with [`TrackingIdGenerator::is_fallback_state`] and
//! [`TrackingIdGenerator::is_fallback_county`]. `IncA`/`IncB` are caller
//! counters and are embedded verbatim.
//!
//! License: MIT OR Apache-2.0

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{TrackingConfig, DEFAULT_FALLBACK_COUNTY_FIPS, DEFAULT_FALLBACK_STATE_FIPS};
use crate::errors::FormguardError;
use crate::geo::GeoTables;
use crate::validators::{
    is_valid_county_fips, is_valid_date_stamp, is_valid_segment_code, is_valid_state_fips, parse_random_segment,
    RANDOM_SEGMENT_MAX, RANDOM_SEGMENT_MIN,
};

/// The sector a submission belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Consumer,
    Merchant,
    FinancialInstitution,
    Government,
    Enterprise,
    HealthCare,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Consumer,
        Category::Merchant,
        Category::FinancialInstitution,
        Category::Government,
        Category::Enterprise,
        Category::HealthCare,
    ];

    /// The short code that leads a tracking identifier.
    pub fn code(self) -> &'static str {
        match self {
            Category::Consumer => "C",
            Category::Merchant => "M",
            Category::FinancialInstitution => "FI",
            Category::Government => "G",
            Category::Enterprise => "E",
            Category::HealthCare => "HC",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Consumer => "Consumer",
            Category::Merchant => "Merchant",
            Category::FinancialInstitution => "Financial Institution",
            Category::Government => "Government",
            Category::Enterprise => "Enterprise",
            Category::HealthCare => "Health Care",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = FormguardError;

    /// Case-insensitive; internal whitespace runs count as one space.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        match label.as_str() {
            "consumer" => Ok(Category::Consumer),
            "merchant" => Ok(Category::Merchant),
            "financial institution" => Ok(Category::FinancialInstitution),
            "government" => Ok(Category::Government),
            "enterprise" => Ok(Category::Enterprise),
            "health care" | "healthcare" => Ok(Category::HealthCare),
            _ => Err(FormguardError::UnknownCategory(s.to_string())),
        }
    }
}

/// The caller-supplied fields a tracking identifier is built from.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackingRequest<'a> {
    pub category: &'a str,
    pub state: &'a str,
    pub county: &'a str,
    pub inc_a: &'a str,
    pub inc_b: &'a str,
    pub full_address: Option<&'a str>,
}

/// A generated (or parsed) tracking identifier, segment by segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackingId {
    pub segment_code: String,
    pub state_fips: String,
    pub county_fips: String,
    pub date_stamp: String,
    pub rand1: u32,
    pub rand2: u32,
    pub inc_a: String,
    pub inc_b: String,
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}-{}-{}-{}-{}-{}-{}",
            self.segment_code,
            self.state_fips,
            self.county_fips,
            self.date_stamp,
            self.rand1,
            self.rand2,
            self.inc_a,
            self.inc_b
        )
    }
}

impl FromStr for TrackingId {
    type Err = FormguardError;

    /// Parses the composite form. `IncA` may itself contain hyphens; `IncB`
    /// is everything after the last one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: &str| FormguardError::MalformedTrackingId(s.to_string(), reason.to_string());

        let mut parts = s.splitn(6, '-');
        let (Some(head), Some(county), Some(date), Some(r1), Some(r2), Some(rest)) =
            (parts.next(), parts.next(), parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed("expected at least seven hyphen-separated groups"));
        };
        let Some((inc_a, inc_b)) = rest.rsplit_once('-') else {
            return Err(malformed("missing increment groups"));
        };

        if !head.is_ascii() || head.len() < 2 {
            return Err(malformed("leading group must be a category code followed by a state code"));
        }
        let (code, state) = head.split_at(head.len() - 2);
        if !is_valid_segment_code(code) {
            return Err(malformed("invalid category code"));
        }
        if !is_valid_state_fips(state) {
            return Err(malformed("invalid state code"));
        }
        if !is_valid_county_fips(county) {
            return Err(malformed("invalid county code"));
        }
        if !is_valid_date_stamp(date) {
            return Err(malformed("invalid date stamp"));
        }
        let rand1 = parse_random_segment(r1).ok_or_else(|| malformed("invalid first random group"))?;
        let rand2 = parse_random_segment(r2).ok_or_else(|| malformed("invalid second random group"))?;
        if inc_a.is_empty() || inc_b.is_empty() || inc_a.contains(char::is_whitespace) || inc_b.contains(char::is_whitespace) {
            return Err(malformed("increment groups must be non-empty and contain no whitespace"));
        }

        Ok(TrackingId {
            segment_code: code.to_string(),
            state_fips: state.to_string(),
            county_fips: county.to_string(),
            date_stamp: date.to_string(),
            rand1,
            rand2,
            inc_a: inc_a.to_string(),
            inc_b: inc_b.to_string(),
        })
    }
}

/// `MMDDYYYY`, zero-padded.
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%m%d%Y").to_string()
}

#[derive(Debug, Clone)]
pub struct TrackingIdGenerator {
    geo: Arc<GeoTables>,
    strict_categories: bool,
    fallback_state_fips: String,
    fallback_county_fips: String,
}

impl TrackingIdGenerator {
    /// A strict generator with the default fallback codes.
    pub fn new(geo: Arc<GeoTables>) -> Self {
        Self {
            geo,
            strict_categories: true,
            fallback_state_fips: DEFAULT_FALLBACK_STATE_FIPS.to_string(),
            fallback_county_fips: DEFAULT_FALLBACK_COUNTY_FIPS.to_string(),
        }
    }

    /// A generator over the bundled geographic tables.
    pub fn builtin() -> Result<Self, FormguardError> {
        Ok(Self::new(GeoTables::builtin()?))
    }

    /// Builds a generator from configuration, loading the configured
    /// geographic data file if there is one.
    pub fn from_config(config: &TrackingConfig) -> Result<Self> {
        let geo = match &config.geo_data_path {
            Some(path) => Arc::new(GeoTables::load_from_file(path)?),
            None => GeoTables::builtin()?,
        };
        let (state, county) = (config.fallback_state_fips(), config.fallback_county_fips());
        if !is_valid_state_fips(state) || !is_valid_county_fips(county) {
            bail!("Invalid fallback codes '{}'/'{}': expected 2 and 3-5 digits.", state, county);
        }
        Ok(Self::new(geo)
            .with_strict_categories(config.strict_categories())
            .with_fallbacks(state, county))
    }

    pub fn with_strict_categories(mut self, strict: bool) -> Self {
        self.strict_categories = strict;
        self
    }

    pub fn with_fallbacks(mut self, state_fips: &str, county_fips: &str) -> Self {
        self.fallback_state_fips = state_fips.to_string();
        self.fallback_county_fips = county_fips.to_string();
        self
    }

    pub fn geo(&self) -> &GeoTables {
        &self.geo
    }

    /// The code for `category`.
    ///
    /// Unknown labels are an error in strict mode; otherwise they yield an
    /// empty code.
    pub fn segment_code(&self, category: &str) -> Result<&'static str, FormguardError> {
        match category.parse::<Category>() {
            Ok(c) => Ok(c.code()),
            Err(e) if self.strict_categories => Err(e),
            Err(_) => {
                warn!("Unknown category '{}'; embedding an empty category code.", category);
                Ok("")
            }
        }
    }

    pub fn resolve_state(&self, state: &str) -> String {
        match self.geo.state_fips(state) {
            Some(fips) => fips.to_string(),
            None => {
                debug!("State '{}' not found; using fallback {}.", state, self.fallback_state_fips);
                self.fallback_state_fips.clone()
            }
        }
    }

    pub fn resolve_county(&self, county: &str, state: &str, full_address: Option<&str>) -> String {
        let state_fips = self.geo.state_fips(state);
        match self.geo.resolve_county(county, state_fips, full_address) {
            Some(fips) => fips.to_string(),
            None => {
                debug!("County '{}' not resolvable; using fallback {}.", county, self.fallback_county_fips);
                self.fallback_county_fips.clone()
            }
        }
    }

    /// Generates an identifier stamped with today's local date.
    pub fn generate(&self, request: &TrackingRequest<'_>) -> Result<TrackingId, FormguardError> {
        let mut rng = rand::rng();
        self.generate_with(&mut rng, Local::now().date_naive(), request)
    }

    /// Generates an identifier with an injected RNG and date.
    pub fn generate_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        date: NaiveDate,
        request: &TrackingRequest<'_>,
    ) -> Result<TrackingId, FormguardError> {
        let segment_code = self.segment_code(request.category)?;
        let state_fips = self.resolve_state(request.state);
        let county_fips = self.resolve_county(request.county, request.state, request.full_address);

        let id = TrackingId {
            segment_code: segment_code.to_string(),
            state_fips,
            county_fips,
            date_stamp: date_stamp(date),
            rand1: rng.random_range(RANDOM_SEGMENT_MIN..=RANDOM_SEGMENT_MAX),
            rand2: rng.random_range(RANDOM_SEGMENT_MIN..=RANDOM_SEGMENT_MAX),
            inc_a: request.inc_a.to_string(),
            inc_b: request.inc_b.to_string(),
        };
        debug!("Generated tracking identifier {}.", id);
        Ok(id)
    }

    pub fn is_fallback_state(&self, id: &TrackingId) -> bool {
        id.state_fips == self.fallback_state_fips
    }

    pub fn is_fallback_county(&self, id: &TrackingId) -> bool {
        id.county_fips == self.fallback_county_fips
    }
}

/// Generates a tracking identifier with the bundled tables and default,
/// strict settings.
pub fn generate(
    category: &str,
    state: &str,
    county: &str,
    inc_a: &str,
    inc_b: &str,
    full_address: Option<&str>,
) -> Result<TrackingId, FormguardError> {
    TrackingIdGenerator::builtin()?.generate(&TrackingRequest {
        category,
        state,
        county,
        inc_a,
        inc_b,
        full_address,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn request<'a>(category: &'a str, state: &'a str, county: &'a str) -> TrackingRequest<'a> {
        TrackingRequest {
            category,
            state,
            county,
            inc_a: "0000",
            inc_b: "0001",
            full_address: None,
        }
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("consumer".parse::<Category>().unwrap(), Category::Consumer);
        assert_eq!("Financial   Institution".parse::<Category>().unwrap(), Category::FinancialInstitution);
        assert_eq!("Healthcare".parse::<Category>().unwrap(), Category::HealthCare);
        assert!(matches!("Education".parse::<Category>(), Err(FormguardError::UnknownCategory(_))));
        for c in Category::ALL {
            assert_eq!(c.label().parse::<Category>().unwrap(), c);
        }
    }

    #[test]
    fn test_date_stamp_zero_pads() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(date_stamp(date), "03072024");
    }

    #[test]
    fn test_generate_with_is_deterministic() {
        let generator = TrackingIdGenerator::builtin().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 11, 2).unwrap();
        let a = generator
            .generate_with(&mut StdRng::seed_from_u64(7), date, &request("Merchant", "CA", "Orange County"))
            .unwrap();
        let b = generator
            .generate_with(&mut StdRng::seed_from_u64(7), date, &request("Merchant", "CA", "Orange County"))
            .unwrap();
        assert_eq!(a, b);
        assert!(a.to_string().starts_with("M06-059-11022025-"));
        assert!(a.to_string().ends_with("-0000-0001"));
    }

    #[test]
    fn test_lenient_mode_embeds_empty_code() {
        let generator = TrackingIdGenerator::builtin().unwrap().with_strict_categories(false);
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let id = generator
            .generate_with(&mut StdRng::seed_from_u64(1), date, &request("Education", "NY", "Kings"))
            .unwrap();
        assert_eq!(id.segment_code, "");
        assert!(id.to_string().starts_with("36-047-01012025-"));
    }

    #[test]
    fn test_custom_fallbacks_are_detectable() {
        let generator = TrackingIdGenerator::builtin().unwrap().with_fallbacks("00", "00000");
        let id = generator.generate(&request("Government", "Atlantis", "Nowhere")).unwrap();
        assert_eq!(id.state_fips, "00");
        assert_eq!(id.county_fips, "00000");
        assert!(generator.is_fallback_state(&id));
        assert!(generator.is_fallback_county(&id));
    }

    #[test]
    fn test_parse_round_trip_with_hyphenated_increment() {
        let text = "FI06-059-11022025-12345-99999-A-1-7";
        let id: TrackingId = text.parse().unwrap();
        assert_eq!(id.segment_code, "FI");
        assert_eq!(id.inc_a, "A-1");
        assert_eq!(id.inc_b, "7");
        assert_eq!(id.to_string(), text);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "C06-059-11022025-12345-99999-0000",
            "c06-059-11022025-12345-99999-0-1",
            "C06-59-11022025-12345-99999-0-1",
            "C06-059-13022025-12345-99999-0-1",
            "C06-059-11022025-02345-99999-0-1",
            "C06-059-11022025-12345-99999--1",
        ] {
            assert!(bad.parse::<TrackingId>().is_err(), "accepted {}", bad);
        }
    }
}
