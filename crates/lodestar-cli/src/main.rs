//! Lodestar CLI - strength and energy insights from reflections
//!
//! Usage:
//!   lodestar analyze --input responses.json    Rank insights per category
//!   lodestar themes --input responses.json     Show per-theme signals
//!   lodestar score --dimension energy "text"   Score one dimension
//!   lodestar lexicon                           List lexicon dimensions

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config_dir = cli.config.as_deref();

    match cli.command {
        Commands::Analyze {
            input,
            json,
            category,
        } => commands::cmd_analyze(config_dir, &input, json, category.as_deref()),
        Commands::Themes { input, json } => commands::cmd_themes(config_dir, &input, json),
        Commands::Score { dimension, text } => commands::cmd_score(config_dir, &dimension, &text),
        Commands::Lexicon => commands::cmd_lexicon(config_dir),
    }
}
