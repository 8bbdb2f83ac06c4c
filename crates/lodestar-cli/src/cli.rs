//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Lodestar - Find the strengths that give you energy
#[derive(Parser)]
#[command(name = "lodestar")]
#[command(about = "Strength and energy insights from self-reflections and advisor feedback", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding engine.toml / lexicon.toml overrides
    ///
    /// Defaults to ~/.local/share/lodestar/config. Missing files fall back
    /// to the built-in defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank insights for every category
    Analyze {
        /// JSON file with self_responses and advisor_responses
        #[arg(short, long)]
        input: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Only show one category (e.g. hidden_strength)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show aggregated signals per theme
    Themes {
        /// JSON file with self_responses and advisor_responses
        #[arg(short, long)]
        input: PathBuf,

        /// Print profiles as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score a piece of text on one dimension
    Score {
        /// Dimension name (energy, skill, confidence, drain, ...)
        #[arg(short, long)]
        dimension: String,

        /// Text to score
        text: String,
    },

    /// List lexicon dimensions, baselines and buckets
    Lexicon,
}
