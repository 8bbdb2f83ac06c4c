//! Lexicon command implementations (score, lexicon)

use std::path::Path;

use anyhow::{Context, Result};
use lodestar_core::{Dimension, SignalExtractor};

use super::{load_engine, truncate};

const PHRASE_WIDTH: usize = 60;

pub fn cmd_score(config_dir: Option<&Path>, dimension: &str, text: &str) -> Result<()> {
    let dimension: Dimension = dimension.parse().context("Unknown --dimension")?;
    let engine = load_engine(config_dir)?;
    let extractor = SignalExtractor::new(engine.lexicon());

    let score = extractor.extract(text, dimension);
    let baseline = engine
        .lexicon()
        .spec(dimension)
        .map(|s| s.baseline)
        .unwrap_or_else(|| dimension.default_baseline());

    println!();
    println!("📏 {}: {:.2} (baseline {:.2})", dimension, score, baseline);

    let contexts = extractor.contexts_mentioned([text]);
    if !contexts.is_empty() {
        println!("   Contexts: {}", contexts.join(", "));
    }
    println!();
    Ok(())
}

pub fn cmd_lexicon(config_dir: Option<&Path>) -> Result<()> {
    let engine = load_engine(config_dir)?;
    let lexicon = engine.lexicon();

    println!();
    println!("📖 Lexicon");
    println!("   ─────────────────────────────────────────────────────────────");

    for (dimension, spec) in lexicon.dimensions() {
        println!();
        println!("   {} (baseline {:.1})", dimension, spec.baseline);
        if spec.buckets.is_empty() {
            println!("      (no keywords)");
        }
        for bucket in &spec.buckets {
            println!(
                "      {:<12} {:+.2}  {}",
                bucket.name,
                bucket.weight,
                truncate(&bucket.phrases.join(", "), PHRASE_WIDTH)
            );
        }
    }

    if !lexicon.contexts().is_empty() {
        println!();
        println!("   Contexts:");
        for (context, keywords) in lexicon.contexts() {
            println!(
                "      {:<14} {}",
                context,
                truncate(&keywords.join(", "), PHRASE_WIDTH)
            );
        }
    }

    println!();
    Ok(())
}
