//! Weighted keyword tables per signal dimension
//!
//! The lexicon is pure data: for each [`Dimension`] a neutral baseline and a
//! handful of phrase buckets, each carrying a signed weight per occurrence.
//! It is built once and handed to the extractor by reference.
//!
//! ## Configuration Resolution
//!
//! Tables are loaded with a layered resolution:
//! 1. An explicit path, if given and present
//! 2. Override in data dir (~/.local/share/lodestar/config/lexicon.toml)
//! 3. Fall back to embedded defaults (compiled into binary)
//!
//! Override files only need to name the dimensions they replace.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config;
use crate::error::{Error, Result};

/// Embedded default lexicon (compiled into binary)
const DEFAULT_LEXICON: &str = include_str!("../../../config/lexicon.toml");

const LEXICON_FILE: &str = "lexicon.toml";

/// A numeric signal derived from free text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Energy,
    Skill,
    Confidence,
    Drain,
    Frequency,
    Interest,
    CurrentLevel,
    Potential,
    CompetenceDespiteDrain,
    Recognition,
    Competence,
    BurnoutConcern,
    DevelopmentPotential,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Energy => "energy",
            Self::Skill => "skill",
            Self::Confidence => "confidence",
            Self::Drain => "drain",
            Self::Frequency => "frequency",
            Self::Interest => "interest",
            Self::CurrentLevel => "current_level",
            Self::Potential => "potential",
            Self::CompetenceDespiteDrain => "competence_despite_drain",
            Self::Recognition => "recognition",
            Self::Competence => "competence",
            Self::BurnoutConcern => "burnout_concern",
            Self::DevelopmentPotential => "development_potential",
        }
    }

    /// Neutral starting score when no keyword matches
    ///
    /// Advisor-facing and belief dimensions start higher since observers
    /// tend to frame things favourably.
    pub fn default_baseline(&self) -> f64 {
        match self {
            Self::Energy
            | Self::Skill
            | Self::Drain
            | Self::Frequency
            | Self::Interest
            | Self::CurrentLevel
            | Self::BurnoutConcern => 2.5,
            Self::Confidence
            | Self::Competence
            | Self::Recognition
            | Self::Potential
            | Self::CompetenceDespiteDrain
            | Self::DevelopmentPotential => 3.0,
        }
    }

    /// Dimensions extracted from first-person reflections
    pub fn self_dimensions() -> &'static [Dimension] {
        &[
            Self::Energy,
            Self::Skill,
            Self::Confidence,
            Self::Drain,
            Self::Frequency,
            Self::Interest,
            Self::CurrentLevel,
            Self::Potential,
            Self::CompetenceDespiteDrain,
        ]
    }

    /// Dimensions extracted from advisor observations
    pub fn advisor_dimensions() -> &'static [Dimension] {
        &[
            Self::Recognition,
            Self::Competence,
            Self::BurnoutConcern,
            Self::DevelopmentPotential,
        ]
    }

    pub fn all() -> impl Iterator<Item = Dimension> {
        Self::self_dimensions()
            .iter()
            .chain(Self::advisor_dimensions())
            .copied()
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Dimension::all()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| Error::UnknownDimension(s.to_string()))
    }
}

/// Phrases sharing one signed weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub name: String,
    /// Added to the score once per phrase occurrence
    pub weight: f64,
    /// Lower-cased phrases
    pub phrases: Vec<String>,
}

/// Baseline and buckets for one dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionSpec {
    pub baseline: f64,
    #[serde(default)]
    pub buckets: Vec<Bucket>,
}

impl DimensionSpec {
    /// A spec with no keywords; extraction always yields the baseline
    pub fn neutral(baseline: f64) -> Self {
        Self {
            baseline,
            buckets: Vec::new(),
        }
    }

    fn validate(&self, dimension: &str) -> Result<()> {
        if !(config::SCORE_MIN..=config::SCORE_MAX).contains(&self.baseline) {
            return Err(Error::Config(format!(
                "Baseline for {} must be within [{}, {}], got {}",
                dimension,
                config::SCORE_MIN,
                config::SCORE_MAX,
                self.baseline
            )));
        }
        if let Some(bucket) = self.buckets.iter().find(|b| !b.weight.is_finite()) {
            return Err(Error::Config(format!(
                "Bucket {}.{} has a non-finite weight",
                dimension, bucket.name
            )));
        }
        Ok(())
    }

    fn normalized(mut self) -> Self {
        for bucket in &mut self.buckets {
            bucket.phrases = bucket
                .phrases
                .iter()
                .map(|p| p.to_lowercase())
                .filter(|p| !p.is_empty())
                .collect();
        }
        self
    }
}

/// Immutable keyword tables for every dimension
#[derive(Debug, Clone, PartialEq)]
pub struct Lexicon {
    dimensions: BTreeMap<Dimension, DimensionSpec>,
    /// Application contexts (leadership, technical, ...) and their keywords
    contexts: BTreeMap<String, Vec<String>>,
}

impl Lexicon {
    /// The embedded default tables
    pub fn builtin() -> Result<Self> {
        parse_lexicon(DEFAULT_LEXICON, None)
    }

    /// Resolve the lexicon: explicit path, then data-dir override, then defaults
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        Self::load_resolved(config::resolve_override(
            override_path,
            default_lexicon_path(),
        ))
    }

    fn load_resolved(path: Option<PathBuf>) -> Result<Self> {
        let builtin = Self::builtin()?;
        let Some(path) = path else {
            return Ok(builtin);
        };
        let content = fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        parse_lexicon(&content, Some(builtin))
    }

    /// A lexicon with every dimension at its baseline and no keywords
    pub fn baselines_only() -> Self {
        Self {
            dimensions: Dimension::all()
                .map(|d| (d, DimensionSpec::neutral(d.default_baseline())))
                .collect(),
            contexts: BTreeMap::new(),
        }
    }

    /// Spec for one dimension, if the tables define it
    pub fn spec(&self, dimension: Dimension) -> Option<&DimensionSpec> {
        self.dimensions.get(&dimension)
    }

    pub fn dimensions(&self) -> impl Iterator<Item = (Dimension, &DimensionSpec)> {
        self.dimensions.iter().map(|(d, s)| (*d, s))
    }

    pub fn contexts(&self) -> &BTreeMap<String, Vec<String>> {
        &self.contexts
    }

    /// Replace one dimension's tables (for tuning and tests)
    pub fn with_dimension(mut self, dimension: Dimension, spec: DimensionSpec) -> Self {
        self.dimensions.insert(dimension, spec.normalized());
        self
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin().unwrap_or_else(|e| {
            warn!(error = %e, "Embedded lexicon failed to parse; using baselines only");
            Self::baselines_only()
        })
    }
}

/// Default lexicon override path
pub fn default_lexicon_path() -> Option<PathBuf> {
    config::default_config_dir().map(|d| d.join(LEXICON_FILE))
}

/// Raw lexicon structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawLexicon {
    #[serde(default)]
    dimensions: HashMap<String, DimensionSpec>,
    #[serde(default)]
    contexts: Option<BTreeMap<String, Vec<String>>>,
}

/// Parse lexicon TOML, layering it over `base` when given
fn parse_lexicon(content: &str, base: Option<Lexicon>) -> Result<Lexicon> {
    let raw: RawLexicon = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid lexicon TOML: {}", e)))?;

    let mut lexicon = base.unwrap_or(Lexicon {
        dimensions: BTreeMap::new(),
        contexts: BTreeMap::new(),
    });

    for (name, spec) in raw.dimensions {
        let dimension = match Dimension::from_str(&name) {
            Ok(d) => d,
            Err(_) => {
                warn!(dimension = %name, "Ignoring unknown lexicon dimension");
                continue;
            }
        };
        spec.validate(&name)?;
        lexicon.dimensions.insert(dimension, spec.normalized());
    }

    if let Some(contexts) = raw.contexts {
        lexicon.contexts = contexts
            .into_iter()
            .map(|(name, keywords)| {
                let keywords = keywords.iter().map(|k| k.to_lowercase()).collect();
                (name, keywords)
            })
            .collect();
    }

    Ok(lexicon)
}
