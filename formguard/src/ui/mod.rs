//! Terminal presentation: color theme and themed stderr messages.

pub mod output_format;
pub mod theme;
