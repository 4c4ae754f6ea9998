//! `formguard terms`: prints the compiled blocked-term list.

use std::collections::BTreeSet;
use std::io::{self, Write};

use anyhow::Result;

use formguard_core::config::{FormguardConfig, validate_config};
use formguard_core::headless::load_dictionary;
use formguard_core::sanitizers::compiler::{FilterOptions, TermSet};
use formguard_core::terms::load_external_terms;
use formguard_core::terms::source::term_source_from_config;

use crate::cli::TermsCommand;
use crate::commands::warn_msg;
use crate::ui::theme::ThemeMap;

pub async fn run_terms(cmd: &TermsCommand, mut config: FormguardConfig, theme: &ThemeMap, quiet: bool) -> Result<()> {
    cmd.terms.apply(&mut config.terms);
    validate_config(&config)?;

    let options = FilterOptions::from_config(&config.filter)?;
    let dictionary = load_dictionary(&config)?;
    let external = match term_source_from_config(&config.terms) {
        Some(source) => load_external_terms(source.as_ref()).await,
        None => BTreeSet::new(),
    };
    let set = TermSet::build(&external, &dictionary, &options);

    if set.is_empty() && !quiet {
        warn_msg("The term set is empty; sanitize would only normalize input.", theme);
    }

    let mut out = io::stdout().lock();
    if cmd.count {
        writeln!(out, "{} {}", set.len(), set.fingerprint())?;
    } else {
        for term in set.terms() {
            writeln!(out, "{}", term)?;
        }
    }
    Ok(())
}
