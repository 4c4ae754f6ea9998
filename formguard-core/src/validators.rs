// File: formguard-core/src/validators.rs
//! Structural checks for the segments of a tracking identifier.
//!
//! These are used when a tracking identifier is parsed back from its string
//! form, and by callers that want to validate a segment before embedding it.
//!
//! License: MIT OR APACHE 2.0

use chrono::NaiveDate;

/// Lowest and highest value of a random tracking segment.
pub const RANDOM_SEGMENT_MIN: u32 = 10_000;
pub const RANDOM_SEGMENT_MAX: u32 = 99_999;

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// A category code is empty (permissive mode) or one or two uppercase ASCII letters.
pub fn is_valid_segment_code(code: &str) -> bool {
    code.len() <= 2 && code.bytes().all(|b| b.is_ascii_uppercase())
}

/// Exactly two digits.
pub fn is_valid_state_fips(fips: &str) -> bool {
    fips.len() == 2 && all_digits(fips)
}

/// Three digits for a county, five for the combined state+county fallback.
pub fn is_valid_county_fips(fips: &str) -> bool {
    (3..=5).contains(&fips.len()) && all_digits(fips)
}

/// `MMDDYYYY` naming a real calendar date.
pub fn is_valid_date_stamp(stamp: &str) -> bool {
    stamp.len() == 8 && all_digits(stamp) && NaiveDate::parse_from_str(stamp, "%m%d%Y").is_ok()
}

/// Five digits within the random-segment range.
///
/// Returns the parsed value so callers need not parse twice.
pub fn parse_random_segment(segment: &str) -> Option<u32> {
    if segment.len() != 5 || !all_digits(segment) {
        return None;
    }
    let value: u32 = segment.parse().ok()?;
    (RANDOM_SEGMENT_MIN..=RANDOM_SEGMENT_MAX).contains(&value).then_some(value)
}
