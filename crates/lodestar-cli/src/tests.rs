//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::fs;
use std::path::PathBuf;

use lodestar_core::test_utils::{fixed_time, sample_response_set};
use lodestar_core::{InsightCategory, InsightReport};
use tempfile::TempDir;

use crate::commands::{self, render_report, truncate};

/// Write the sample response set to a temp dir, returning (dir, input path)
fn write_sample_input() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("responses.json");
    let json = serde_json::to_string_pretty(&sample_response_set()).unwrap();
    fs::write(&path, json).unwrap();
    (dir, path)
}

/// A config dir that exists but holds no overrides
fn empty_config_dir() -> TempDir {
    TempDir::new().unwrap()
}

// ========== Analyze Command Tests ==========

#[test]
fn test_cmd_analyze_text() {
    let (_dir, input) = write_sample_input();
    let config = empty_config_dir();
    let result = commands::cmd_analyze(Some(config.path()), &input, false, None);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_analyze_json_single_category() {
    let (_dir, input) = write_sample_input();
    let config = empty_config_dir();
    let result = commands::cmd_analyze(
        Some(config.path()),
        &input,
        true,
        Some("hidden_strength"),
    );
    assert!(result.is_ok());
}

#[test]
fn test_cmd_analyze_unknown_category() {
    let (_dir, input) = write_sample_input();
    let config = empty_config_dir();
    let result = commands::cmd_analyze(Some(config.path()), &input, false, Some("charm"));
    assert!(result.is_err());
}

#[test]
fn test_cmd_analyze_missing_input() {
    let config = empty_config_dir();
    let missing = config.path().join("nope.json");
    let result = commands::cmd_analyze(Some(config.path()), &missing, false, None);
    assert!(result.is_err());
}

#[test]
fn test_cmd_analyze_malformed_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.json");
    fs::write(&input, "{ not json").unwrap();
    let result = commands::cmd_analyze(Some(dir.path()), &input, false, None);
    assert!(result.is_err());
}

#[test]
fn test_cmd_analyze_with_engine_override() {
    let (_dir, input) = write_sample_input();
    let config = empty_config_dir();
    fs::write(
        config.path().join("engine.toml"),
        "[caps]\nenergising_strength = 1\n",
    )
    .unwrap();
    let result = commands::cmd_analyze(Some(config.path()), &input, true, None);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_analyze_invalid_engine_override() {
    let (_dir, input) = write_sample_input();
    let config = empty_config_dir();
    fs::write(config.path().join("engine.toml"), "[caps]\nhidden_strength = 0\n").unwrap();
    let result = commands::cmd_analyze(Some(config.path()), &input, false, None);
    assert!(result.is_err());
}

// ========== Rendering Tests ==========

#[test]
fn test_render_report_lists_every_category() {
    let engine = commands::load_engine(Some(empty_config_dir().path())).unwrap();
    let report = engine.analyze_set(&sample_response_set());
    let text = render_report(&report, None);

    for category in InsightCategory::all() {
        assert!(text.contains(category.label()), "missing {}", category);
    }
    assert!(text.contains("Negotiation is a hidden strength"));
    assert!(text.contains("💡"));
}

#[test]
fn test_render_report_single_category() {
    let engine = commands::load_engine(Some(empty_config_dir().path())).unwrap();
    let report = engine.analyze_set(&sample_response_set());
    let text = render_report(&report, Some(InsightCategory::Aspirational));

    assert!(text.contains(InsightCategory::Aspirational.label()));
    assert!(!text.contains(InsightCategory::HiddenStrength.label()));
}

#[test]
fn test_render_empty_report() {
    let report = InsightReport::empty(fixed_time());
    let text = render_report(&report, None);
    assert!(text.contains("No insights yet"));
    assert!(text.contains("(none)"));
}

// ========== Themes Command Tests ==========

#[test]
fn test_cmd_themes() {
    let (_dir, input) = write_sample_input();
    let config = empty_config_dir();
    assert!(commands::cmd_themes(Some(config.path()), &input, false).is_ok());
    assert!(commands::cmd_themes(Some(config.path()), &input, true).is_ok());
}

// ========== Lexicon Command Tests ==========

#[test]
fn test_cmd_score() {
    let config = empty_config_dir();
    let result = commands::cmd_score(
        Some(config.path()),
        "energy",
        "I love mentoring the team",
    );
    assert!(result.is_ok());
}

#[test]
fn test_cmd_score_unknown_dimension() {
    let config = empty_config_dir();
    let result = commands::cmd_score(Some(config.path()), "charisma", "text");
    assert!(result.is_err());
}

#[test]
fn test_cmd_lexicon() {
    let config = empty_config_dir();
    assert!(commands::cmd_lexicon(Some(config.path())).is_ok());
}

#[test]
fn test_cmd_lexicon_invalid_override() {
    let config = empty_config_dir();
    fs::write(config.path().join("lexicon.toml"), "dimensions = 3").unwrap();
    assert!(commands::cmd_lexicon(Some(config.path())).is_err());
}

// ========== Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("exactly ten", 11), "exactly ten");
    assert_eq!(truncate("this is a long string", 10), "this is...");
    assert_eq!(truncate("énergie débordante", 8), "énerg...");
}
