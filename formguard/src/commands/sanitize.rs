//! `formguard sanitize`: removes blocked terms from text, line by line.

use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};
use log::{debug, info};

use formguard_core::config::{FormguardConfig, validate_config};
use formguard_core::headless::build_sanitizer;
use formguard_core::sanitizers::input::Sanitizer;

use crate::cli::SanitizeCommand;
use crate::commands::{info_msg, map_lines, open_input, read_input};
use crate::ui::theme::ThemeMap;

/// Sanitizes one line and adds the number of removed terms to `removed`.
pub fn sanitize_line(sanitizer: &Sanitizer, line: &str, removed: &mut usize) -> String {
    *removed += sanitizer.find_blocked(line).len();
    sanitizer.sanitize(line)
}

pub async fn run_sanitize(cmd: &SanitizeCommand, mut config: FormguardConfig, theme: &ThemeMap, quiet: bool) -> Result<()> {
    info!("Starting sanitize operation.");
    if let Some(engine) = cmd.engine {
        config.filter.engine = Some(engine.into());
    }
    cmd.terms.apply(&mut config.terms);
    validate_config(&config)?;

    let sanitizer = build_sanitizer(&config, None).await?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut removed = 0usize;

    if cmd.line_buffered {
        let reader = open_input(cmd.input_file.as_deref())?;
        for line in BufRead::lines(reader) {
            let line = line?;
            writeln!(out, "{}", sanitize_line(&sanitizer, &line, &mut removed))?;
            out.flush()?;
        }
    } else {
        let input = read_input(cmd.input_file.as_deref())?;
        let sanitized = map_lines(&input, |line| sanitize_line(&sanitizer, line, &mut removed));
        debug!("Sanitized {} byte(s) into {} byte(s).", input.len(), sanitized.len());
        write!(out, "{}", sanitized)?;
        out.flush()?;
    }

    if removed > 0 && !quiet {
        info_msg(format!("Removed {} blocked term(s).", removed), theme);
    }
    if cmd.fail_on_match && removed > 0 {
        bail!("{} blocked term(s) found in input", removed);
    }
    info!("Sanitize operation completed.");
    Ok(())
}
