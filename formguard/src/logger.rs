// formguard/src/logger.rs
//! Logger setup for the `formguard` binary.
//!
//! `RUST_LOG` is honored unless a level is forced from the command line.
//! Log lines go to stderr so stdout stays clean for piped output.

use log::LevelFilter;

/// Initializes `env_logger`. Calling it more than once is harmless.
pub fn init_logger(forced_level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = forced_level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).target(env_logger::Target::Stderr);
    let _ = builder.try_init();
}

/// The level forced by `--quiet` / `--debug`, if any. Quiet wins.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_overrides_debug() {
        assert_eq!(level_from_flags(true, true), Some(LevelFilter::Off));
        assert_eq!(level_from_flags(false, true), Some(LevelFilter::Debug));
        assert_eq!(level_from_flags(false, false), None);
    }
}
