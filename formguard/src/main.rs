// formguard/src/main.rs
//! Formguard entry point.
//!
//! Loads `.env`, sets up logging, resolves the effective configuration and
//! dispatches to the selected subcommand.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use formguard::cli::{Cli, Commands};
use formguard::commands::{self, expand, sanitize, strip_sql, terms, tracking_id};
use formguard::logger;
use formguard::ui::theme::{ThemeMap, ThemeStyle, build_theme_map};
use formguard_core::config::FormguardConfig;

async fn run(cli: Cli, theme: &ThemeMap) -> Result<()> {
    let config = FormguardConfig::load_effective(cli.config.as_deref()).context("Failed to load configuration")?;
    debug!("Effective configuration: {:?}", config);

    match &cli.command {
        Commands::Sanitize(cmd) => sanitize::run_sanitize(cmd, config, theme, cli.quiet).await,
        Commands::StripSql(cmd) => strip_sql::run_strip_sql(cmd, &config),
        Commands::Expand(cmd) => expand::run_expand(cmd, &config),
        Commands::TrackingId(cmd) => tracking_id::run_tracking_id(cmd, &config, theme, cli.quiet),
        Commands::Terms(cmd) => terms::run_terms(cmd, config, theme, cli.quiet).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug));

    let theme = match build_theme_map(cli.theme.as_deref()) {
        Ok(theme) => theme,
        Err(e) => {
            let fallback = ThemeStyle::default_theme_map();
            commands::warn_msg(format!("{:#}; using the default theme.", e), &fallback);
            fallback
        }
    };

    match run(cli, &theme).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            commands::error_msg(format!("{:#}", e), &theme);
            ExitCode::FAILURE
        }
    }
}
