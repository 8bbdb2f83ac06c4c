//! Shared command utilities
//!
//! This module contains:
//! - `load_engine` - Build an engine from the config directory (or defaults)
//! - `load_responses` - Read a response set from JSON

use std::path::Path;

use anyhow::{Context, Result};
use lodestar_core::{EngineConfig, InsightEngine, Lexicon, ResponseSet};
use tracing::debug;

pub const ENGINE_FILE: &str = "engine.toml";
pub const LEXICON_FILE: &str = "lexicon.toml";

/// Build an engine from `config_dir`, falling back to the data-dir overrides
/// and then the embedded defaults for any file that is missing
pub fn load_engine(config_dir: Option<&Path>) -> Result<InsightEngine> {
    let engine_path = config_dir.map(|d| d.join(ENGINE_FILE));
    let lexicon_path = config_dir.map(|d| d.join(LEXICON_FILE));

    let config = EngineConfig::load(engine_path.as_deref()).context("Failed to load engine config")?;
    let lexicon = Lexicon::load(lexicon_path.as_deref()).context("Failed to load lexicon")?;

    debug!(
        dimensions = lexicon.dimensions().count(),
        contexts = lexicon.contexts().len(),
        "Engine ready"
    );
    Ok(InsightEngine::new(lexicon, config))
}

/// Read self and advisor responses from a JSON file
pub fn load_responses(input: &Path) -> Result<ResponseSet> {
    let set = ResponseSet::from_json_file(input)
        .with_context(|| format!("Failed to read responses from {}", input.display()))?;
    debug!(
        self_responses = set.self_responses.len(),
        advisor_responses = set.advisor_responses.len(),
        "Loaded responses"
    );
    Ok(set)
}
