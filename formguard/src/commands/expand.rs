//! `formguard expand`: previews the obfuscated spellings of a word.

use std::io::{self, Write};

use anyhow::Result;

use formguard_core::config::FormguardConfig;
use formguard_core::obfuscation::{ObfuscationMap, expand_obfuscated_variants};
use formguard_core::terms::normalize_term;

use crate::cli::ExpandCommand;

pub fn run_expand(cmd: &ExpandCommand, config: &FormguardConfig) -> Result<()> {
    let map = ObfuscationMap::from_config(&config.filter.obfuscation_map)?;
    let depth = cmd.depth.unwrap_or_else(|| config.filter.obfuscation_depth());
    let variants = expand_obfuscated_variants(&normalize_term(&cmd.word), depth, &map);

    let mut out = io::stdout().lock();
    if cmd.count {
        writeln!(out, "{}", variants.len())?;
    } else {
        for variant in &variants {
            writeln!(out, "{}", variant)?;
        }
    }
    Ok(())
}
