// formguard/src/cli.rs
//! This file defines the command-line interface for the formguard
//! application, including all available commands and their arguments.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use formguard_core::config::{EngineKind, TermsConfig};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "formguard",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Sanitize form input and mint tracking identifiers",
    long_about = "Formguard removes profanity, obfuscated profanity, caller-supplied blocked terms and SQL-injection keywords from free-text input, and generates tracking identifiers that encode a submission's category, state, county and date.",
    arg_required_else_help = true,
)]
pub struct Cli {
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    #[arg(
        long = "config",
        value_name = "FILE",
        env = "FORMGUARD_CONFIG",
        global = true,
        help = "Path to a YAML configuration file merged over the built-in defaults."
    )]
    pub config: Option<PathBuf>,

    #[arg(long = "theme", value_name = "FILE", global = true, help = "Path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Removes blocked terms from an input file or stdin.")]
    Sanitize(SanitizeCommand),

    #[command(about = "Strips SQL keywords from an input file or stdin.")]
    StripSql(StripSqlCommand),

    #[command(about = "Prints the obfuscated spellings of a word.")]
    Expand(ExpandCommand),

    #[command(about = "Generates a tracking identifier.")]
    TrackingId(TrackingIdCommand),

    #[command(about = "Prints the compiled blocked-term list.")]
    Terms(TermsCommand),
}

/// Where the external blocked-term list comes from, overriding the config.
#[derive(Args, Debug, Default, Clone)]
pub struct TermSourceArgs {
    #[arg(
        long = "terms-url",
        value_name = "URL",
        env = "FORMGUARD_TERMS_URL",
        conflicts_with = "terms_file",
        help = "Fetch the external term list from this URL."
    )]
    pub terms_url: Option<String>,

    #[arg(long = "terms-file", value_name = "FILE", help = "Read the external term list from this file.")]
    pub terms_file: Option<PathBuf>,

    #[arg(long = "terms-timeout", value_name = "SECS", help = "Timeout for fetching --terms-url.")]
    pub terms_timeout: Option<u64>,
}

impl TermSourceArgs {
    /// Applies the flags to `terms`. Either flag replaces the configured source.
    pub fn apply(&self, terms: &mut TermsConfig) {
        if let Some(url) = &self.terms_url {
            terms.url = Some(url.clone());
            terms.path = None;
        } else if let Some(path) = &self.terms_file {
            terms.path = Some(path.clone());
            terms.url = None;
        }
        if self.terms_timeout.is_some() {
            terms.timeout_secs = self.terms_timeout;
        }
    }
}

#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    #[command(flatten)]
    pub terms: TermSourceArgs,

    #[arg(long = "engine", value_name = "ENGINE", help = "Override the configured matching engine.")]
    pub engine: Option<EngineChoice>,

    #[arg(long = "line-buffered", help = "Process input line by line (useful for streaming data from pipes).")]
    pub line_buffered: bool,

    #[arg(long = "fail-on-match", help = "Exit with a non-zero code if any blocked term was removed.")]
    pub fail_on_match: bool,
}

#[derive(Parser, Debug)]
pub struct StripSqlCommand {
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ExpandCommand {
    #[arg(value_name = "WORD", help = "The word to expand.")]
    pub word: String,

    #[arg(long, value_name = "N", help = "Maximum substituted positions (defaults to the configured depth).")]
    pub depth: Option<usize>,

    #[arg(long, help = "Print only the number of variants.")]
    pub count: bool,
}

#[derive(Parser, Debug)]
pub struct TrackingIdCommand {
    #[arg(long, value_name = "CATEGORY", help = "Submission category, e.g. 'Merchant' or 'Health Care'.")]
    pub category: String,

    #[arg(long, value_name = "STATE", help = "State name or two-letter abbreviation.")]
    pub state: String,

    #[arg(long, value_name = "COUNTY", default_value = "", help = "County name, with or without the 'County' suffix.")]
    pub county: String,

    #[arg(long = "inc-a", value_name = "A", help = "First caller counter.")]
    pub inc_a: String,

    #[arg(long = "inc-b", value_name = "B", help = "Second caller counter.")]
    pub inc_b: String,

    #[arg(long, value_name = "ADDRESS", help = "Comma-separated address searched when the county does not resolve.")]
    pub address: Option<String>,

    #[arg(long, help = "Embed an empty code for unknown categories instead of failing.")]
    pub lenient: bool,

    #[arg(long, conflicts_with = "json", help = "Print a segment-by-segment breakdown.")]
    pub explain: bool,

    #[arg(long, help = "Print the identifier and its segments as JSON.")]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct TermsCommand {
    #[command(flatten)]
    pub terms: TermSourceArgs,

    #[arg(long, help = "Print only the term count and fingerprint.")]
    pub count: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum EngineChoice {
    /// One word-bounded regular-expression alternation.
    Regex,
    /// Aho-Corasick automaton with word-boundary checks.
    AhoCorasick,
}

impl From<EngineChoice> for EngineKind {
    fn from(choice: EngineChoice) -> Self {
        match choice {
            EngineChoice::Regex => EngineKind::Regex,
            EngineChoice::AhoCorasick => EngineKind::AhoCorasick,
        }
    }
}
