//! `formguard strip-sql`: removes the configured SQL keywords only.

use std::io::{self, Write};

use anyhow::Result;

use formguard_core::config::FormguardConfig;
use formguard_core::sanitizers::sql::SqlKeywordStripper;

use crate::cli::StripSqlCommand;
use crate::commands::{map_lines, read_input};

pub fn run_strip_sql(cmd: &StripSqlCommand, config: &FormguardConfig) -> Result<()> {
    let stripper = SqlKeywordStripper::new(&config.filter.sql_keywords)?;
    let input = read_input(cmd.input_file.as_deref())?;
    let stripped = map_lines(&input, |line| stripper.strip(line));

    let mut out = io::stdout().lock();
    write!(out, "{}", stripped)?;
    out.flush()?;
    Ok(())
}
