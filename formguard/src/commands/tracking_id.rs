//! `formguard tracking-id`: generates and optionally explains a tracking identifier.

use std::io::{self, Write};

use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use is_terminal::IsTerminal;
use owo_colors::AnsiColors;
use serde_json::json;

use formguard_core::config::FormguardConfig;
use formguard_core::tracking::{TrackingId, TrackingIdGenerator, TrackingRequest};

use crate::cli::TrackingIdCommand;
use crate::commands::warn_msg;
use crate::ui::theme::{ThemeEntry, ThemeMap, color_for};

pub fn run_tracking_id(cmd: &TrackingIdCommand, config: &FormguardConfig, theme: &ThemeMap, quiet: bool) -> Result<()> {
    let mut generator = TrackingIdGenerator::from_config(&config.tracking)?;
    if cmd.lenient {
        generator = generator.with_strict_categories(false);
    }

    let request = TrackingRequest {
        category: &cmd.category,
        state: &cmd.state,
        county: &cmd.county,
        inc_a: &cmd.inc_a,
        inc_b: &cmd.inc_b,
        full_address: cmd.address.as_deref(),
    };
    let id = generator.generate(&request)?;
    let fallback_state = generator.is_fallback_state(&id);
    let fallback_county = generator.is_fallback_county(&id);

    if !quiet {
        if fallback_state {
            warn_msg(format!("State '{}' was not recognized; fallback code used.", cmd.state), theme);
        }
        if fallback_county {
            warn_msg("County could not be resolved; fallback code used.", theme);
        }
    }

    let mut out = io::stdout().lock();
    if cmd.json {
        let value = json!({
            "id": id.to_string(),
            "segments": &id,
            "fallback_state": fallback_state,
            "fallback_county": fallback_county,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
    } else {
        writeln!(out, "{}", id)?;
        if cmd.explain {
            let table = explain_table(&id, fallback_state, fallback_county, theme, io::stdout().is_terminal());
            writeln!(out, "{}", table)?;
        }
    }
    Ok(())
}

fn table_color(color: AnsiColors) -> Color {
    match color {
        AnsiColors::Black => Color::Black,
        AnsiColors::Red => Color::DarkRed,
        AnsiColors::Green => Color::DarkGreen,
        AnsiColors::Yellow => Color::DarkYellow,
        AnsiColors::Blue => Color::DarkBlue,
        AnsiColors::Magenta => Color::DarkMagenta,
        AnsiColors::Cyan => Color::DarkCyan,
        AnsiColors::BrightBlack => Color::DarkGrey,
        AnsiColors::BrightRed => Color::Red,
        AnsiColors::BrightGreen => Color::Green,
        AnsiColors::BrightYellow => Color::Yellow,
        AnsiColors::BrightBlue => Color::Blue,
        AnsiColors::BrightMagenta => Color::Magenta,
        AnsiColors::BrightCyan => Color::Cyan,
        _ => Color::White,
    }
}

/// One row per identifier segment.
pub fn explain_table(
    id: &TrackingId,
    fallback_state: bool,
    fallback_county: bool,
    theme: &ThemeMap,
    colored: bool,
) -> Table {
    let rows: [(&str, String, &str, bool); 8] = [
        ("Category", id.segment_code.clone(), "sector code (empty when unknown)", false),
        ("State", id.state_fips.clone(), "state FIPS", fallback_state),
        ("County", id.county_fips.clone(), "county FIPS", fallback_county),
        ("Date", id.date_stamp.clone(), "MMDDYYYY", false),
        ("Random 1", id.rand1.to_string(), "10000-99999", false),
        ("Random 2", id.rand2.to_string(), "10000-99999", false),
        ("Inc A", id.inc_a.clone(), "caller counter", false),
        ("Inc B", id.inc_b.clone(), "caller counter", false),
    ];

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Segment", "Value", "Meaning"]);
    if !colored {
        table.force_no_tty();
    }

    let name_color = table_color(color_for(ThemeEntry::SegmentName, theme));
    let fallback_color = table_color(color_for(ThemeEntry::FallbackValue, theme));
    for (name, value, meaning, is_fallback) in rows {
        let meaning = if is_fallback { format!("{} (fallback)", meaning) } else { meaning.to_string() };
        let mut value_cell = Cell::new(value);
        if is_fallback {
            value_cell = value_cell.fg(fallback_color);
        }
        table.add_row(vec![Cell::new(name).fg(name_color), value_cell, Cell::new(meaning)]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;

    #[test]
    fn explain_table_marks_fallbacks() {
        let id: TrackingId = "C78-78030-01022025-12345-54321-7-8".parse().unwrap();
        let table = explain_table(&id, true, true, &ThemeStyle::default_theme_map(), false).to_string();
        assert!(table.contains("78030"));
        assert!(table.contains("county FIPS (fallback)"));
        assert!(table.contains("caller counter"));
    }
}
