//! Lodestar Core Library
//!
//! Deterministic signal extraction and insight classification for
//! self-reflections and advisor observations:
//! - Weighted keyword lexicon per signal dimension
//! - Signal extraction with neutral baselines
//! - Per-theme aggregation (plain and credibility-weighted means)
//! - Five category detectors, insight builder and ranker
//! - Config loading with embedded defaults and data-dir overrides

pub mod config;
pub mod error;
pub mod insights;
pub mod lexicon;
pub mod models;
pub mod signals;
pub mod themes;

/// Test utilities including response and profile fixtures
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{CategoryCaps, EngineConfig, Thresholds};
pub use error::{Error, Result};
pub use insights::{InsightCategory, InsightEngine, InsightRecord, InsightReport};
pub use lexicon::{Dimension, DimensionSpec, Lexicon};
pub use models::{
    credibility_weight, AdvisorResponse, ConfidenceContext, Domain, ObservationPeriod, Response,
    ResponseSet,
};
pub use signals::{extract_dimension, SignalExtractor};
pub use themes::{normalize_theme, ThemeAggregator, ThemeProfiles, ThemeSignalProfile};
