// File: formguard-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for using the filter without any UI.
//!
//! [`build_sanitizer`] wires a configuration into a ready [`Sanitizer`]:
//! it loads the profanity dictionary, fetches the external term list,
//! and compiles (or reuses from cache) the merged matcher.

use std::collections::BTreeSet;

use anyhow::Result;
use log::{debug, info};

use crate::config::FormguardConfig;
use crate::sanitizers::compiler::{get_or_compile, FilterOptions};
use crate::sanitizers::input::Sanitizer;
use crate::terms::dictionary::ProfanityDictionary;
use crate::terms::load_external_terms;
use crate::terms::source::{term_source_from_config, TermSource};

/// The dictionary named by `filter.profanity_path`, or the bundled one.
pub fn load_dictionary(config: &FormguardConfig) -> Result<ProfanityDictionary> {
    match &config.filter.profanity_path {
        Some(path) => ProfanityDictionary::load_from_file(path),
        None => Ok(ProfanityDictionary::builtin()?.clone()),
    }
}

/// Builds a sanitizer from `config`.
///
/// `source` overrides the term source named in the configuration. A failing
/// term source contributes no terms; the dictionary and SQL keywords are
/// still compiled.
pub async fn build_sanitizer(config: &FormguardConfig, source: Option<&dyn TermSource>) -> Result<Sanitizer> {
    let options = FilterOptions::from_config(&config.filter)?;
    let dictionary = load_dictionary(config)?;

    let configured = term_source_from_config(&config.terms);
    let external: BTreeSet<String> = match source.or(configured.as_deref()) {
        Some(source) => load_external_terms(source).await,
        None => {
            debug!("No external term source configured.");
            BTreeSet::new()
        }
    };

    let matcher = get_or_compile(&external, &dictionary, &options)?;
    match &matcher {
        Some(m) => info!("Sanitizer ready: {} blocked term(s), {:?} engine.", m.terms().len(), m.kind()),
        None => info!("Sanitizer ready with no blocked terms; input will only be normalized."),
    }
    Ok(Sanitizer::new(matcher, &config.filter.exceptions))
}

/// One-shot sanitization of `input` under `config`.
pub async fn headless_sanitize_string(config: &FormguardConfig, input: &str) -> Result<String> {
    let sanitizer = build_sanitizer(config, None).await?;
    Ok(sanitizer.sanitize(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::source::StaticTermSource;

    #[tokio::test]
    async fn test_headless_sanitize_string_defaults() -> Result<()> {
        let config = FormguardConfig::load_default()?;
        let sanitized = headless_sanitize_string(&config, "please DROP the table ").await?;
        assert_eq!(sanitized, "please the table ");
        Ok(())
    }

    #[tokio::test]
    async fn test_explicit_source_adds_terms() -> Result<()> {
        let config = FormguardConfig::load_default()?;
        let source = StaticTermSource::new("widget, gizmo");
        let sanitizer = build_sanitizer(&config, Some(&source)).await?;
        assert_eq!(sanitizer.sanitize("a widget and a gizmo"), "a and a");
        assert_eq!(sanitizer.sanitize("https://bigassfans.com/"), "https://bigassfans.com/");
        Ok(())
    }
}
