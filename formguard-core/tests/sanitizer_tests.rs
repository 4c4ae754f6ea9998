// formguard-core/tests/sanitizer_tests.rs
use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::Result;
use test_log::test;

use formguard_core::config::{EngineKind, FormguardConfig};
use formguard_core::obfuscation::{expand_obfuscated_variants, ObfuscationMap};
use formguard_core::sanitizers::compiler::{clear_cache, compile, get_or_compile, FilterOptions, TermSet};
use formguard_core::sanitizers::input::{sanitize, Sanitizer};
use formguard_core::sanitizers::sql::strip_sql_keywords;
use formguard_core::terms::dictionary::ProfanityDictionary;

fn terms(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn builtin_options(engine: EngineKind) -> Result<FilterOptions> {
    let mut options = FilterOptions::builtin()?;
    options.engine = engine;
    Ok(options)
}

const SAMPLES: [&str; 8] = [
    "You absolute b1tch, get out ",
    "Please DROP TABLE users; --",
    "this is bullshit and a sh!t show",
    "nothing wrong with this sentence",
    "ＦＵＣＫ this   noise",
    "classic assessment of the class",
    "a$$hole and @sshole are caught",
    "merde, c'est la vie",
];

#[test]
fn test_sanitize_is_idempotent_with_builtin_terms() -> Result<()> {
    let options = builtin_options(EngineKind::Regex)?;
    let matcher = compile(&terms(&["widget"]), ProfanityDictionary::builtin()?, &options)?.unwrap();
    for input in SAMPLES {
        let once = sanitize(input, Some(&matcher));
        assert_eq!(sanitize(&once, Some(&matcher)), once, "not idempotent for {:?}", input);
    }
    Ok(())
}

#[test]
fn test_length_floor_excludes_short_terms() -> Result<()> {
    let options = builtin_options(EngineKind::Regex)?;
    let set = TermSet::build(&terms(&["ok", "no", "hmm"]), &ProfanityDictionary::default(), &options);
    assert!(set.terms().iter().all(|t| t.chars().count() >= 3));
    assert!(set.contains("hmm"));
    assert!(!set.contains("ok"));
    Ok(())
}

#[test]
fn test_obfuscation_closure_depth_one() -> Result<()> {
    let config = FormguardConfig::load_default()?;
    let map = ObfuscationMap::from_config(&config.filter.obfuscation_map)?;
    let variants = expand_obfuscated_variants("ace", 1, &map);
    let expected: BTreeSet<String> = ["ace", "@ce", "4ce", "a(e", "ac3"].iter().map(|s| s.to_string()).collect();
    assert_eq!(variants, expected);
    Ok(())
}

#[test]
fn test_trailing_space_survives_full_removal() -> Result<()> {
    let options = builtin_options(EngineKind::Regex)?;
    let matcher = compile(&terms(&["bad", "word"]), &ProfanityDictionary::default(), &options)?.unwrap();
    assert_eq!(sanitize("bad word ", Some(&matcher)), " ");
    Ok(())
}

#[test]
fn test_exception_url_is_never_sanitized() -> Result<()> {
    let config = FormguardConfig::load_default()?;
    let options = FilterOptions::from_config(&config.filter)?;
    let matcher = get_or_compile(&BTreeSet::new(), ProfanityDictionary::builtin()?, &options)?;
    let sanitizer = Sanitizer::new(matcher, &config.filter.exceptions);
    assert_eq!(sanitizer.sanitize("https://bigassfans.com/"), "https://bigassfans.com/");
    assert!(!sanitizer.contains_blocked("https://bigassfans.com/"));
    // Only the exact allow-listed input is exempt.
    assert_ne!(sanitizer.sanitize("bigass fans"), "bigass fans");
    Ok(())
}

#[test]
fn test_no_matcher_is_passthrough() {
    assert_eq!(sanitize("hello world", None), "hello world");
    assert_eq!(Sanitizer::passthrough().sanitize("hello world"), "hello world");
}

#[test]
fn test_regex_and_aho_corasick_agree() -> Result<()> {
    let external = terms(&["widget", "union select", "spam"]);
    let dictionary = ProfanityDictionary::builtin()?;
    let regex = compile(&external, dictionary, &builtin_options(EngineKind::Regex)?)?.unwrap();
    let automaton = compile(&external, dictionary, &builtin_options(EngineKind::AhoCorasick)?)?.unwrap();
    assert_eq!(regex.fingerprint(), automaton.fingerprint());

    for input in SAMPLES.iter().copied().chain(["spam widget UNION SELECT *", "spammy widgets"]) {
        assert_eq!(
            sanitize(input, Some(&regex)),
            sanitize(input, Some(&automaton)),
            "engines disagree on {:?}",
            input
        );
        assert_eq!(regex.find_spans(input), automaton.find_spans(input), "spans differ on {:?}", input);
    }
    Ok(())
}

#[test]
fn test_engines_agree_on_unicode_word_characters() -> Result<()> {
    let external = terms(&["spam", "café"]);
    let dictionary = ProfanityDictionary::default();
    let regex = compile(&external, &dictionary, &builtin_options(EngineKind::Regex)?)?.unwrap();
    let automaton = compile(&external, &dictionary, &builtin_options(EngineKind::AhoCorasick)?)?.unwrap();

    let inputs = [
        "spam\u{0308} x",
        "spam\u{203F}x and spam",
        "spam\u{200D} tail",
        "x\u{0301}spam y",
        "cafés and café",
        "CAFÉ-spam",
    ];
    for input in inputs {
        assert_eq!(
            sanitize(input, Some(&regex)),
            sanitize(input, Some(&automaton)),
            "engines disagree on {:?}",
            input
        );
        assert_eq!(regex.find_spans(input), automaton.find_spans(input), "spans differ on {:?}", input);
    }
    // A combining mark continues the word, so the term is not bounded.
    assert_eq!(sanitize("spam\u{0308} x", Some(&automaton)), "spam\u{0308} x");
    Ok(())
}

#[test]
fn test_cache_reuses_and_invalidates() -> Result<()> {
    let options = builtin_options(EngineKind::AhoCorasick)?;
    let dictionary = ProfanityDictionary::default();

    let first = get_or_compile(&terms(&["cachetest-alpha"]), &dictionary, &options)?.unwrap();
    let again = get_or_compile(&terms(&["cachetest-alpha"]), &dictionary, &options)?.unwrap();
    assert!(Arc::ptr_eq(&first, &again));

    let changed = get_or_compile(&terms(&["cachetest-alpha", "cachetest-beta"]), &dictionary, &options)?.unwrap();
    assert!(!Arc::ptr_eq(&first, &changed));
    assert_ne!(first.fingerprint(), changed.fingerprint());

    clear_cache()?;
    let rebuilt = get_or_compile(&terms(&["cachetest-alpha"]), &dictionary, &options)?.unwrap();
    assert!(!Arc::ptr_eq(&first, &rebuilt));
    assert_eq!(first.fingerprint(), rebuilt.fingerprint());
    Ok(())
}

#[test]
fn test_strip_sql_keywords_is_standalone() {
    assert_eq!(strip_sql_keywords("name'; drop table x"), "name';  table x");
    assert_eq!(strip_sql_keywords("Selected updates"), "Selected updates");
}
