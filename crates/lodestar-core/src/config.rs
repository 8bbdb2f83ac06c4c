//! Engine configuration: detector thresholds and per-category caps
//!
//! Config is loaded with a layered resolution:
//! 1. An explicit path, if given and present
//! 2. Override in data dir (~/.local/share/lodestar/config/engine.toml)
//! 3. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override file keep their default values. Keys the
//! engine does not know are logged and ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::insights::InsightCategory;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/engine.toml");

const CONFIG_FILE: &str = "engine.toml";

/// Lowest score any dimension can take
pub const SCORE_MIN: f64 = 1.0;
/// Highest score any dimension can take
pub const SCORE_MAX: f64 = 5.0;

/// Directory holding config overrides
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("lodestar").join("config"))
}

/// Default engine config override path
pub fn default_config_path() -> Option<PathBuf> {
    default_config_dir().map(|d| d.join(CONFIG_FILE))
}

/// First existing file of `explicit` and `fallback`, in that order
pub(crate) fn resolve_override(
    explicit: Option<&Path>,
    fallback: Option<PathBuf>,
) -> Option<PathBuf> {
    explicit
        .filter(|p| p.exists())
        .map(Path::to_path_buf)
        .or(fallback)
        .filter(|p| p.exists())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergisingThresholds {
    pub min_self_energy: f64,
    pub min_self_skill: f64,
    pub min_advisor_recognition: f64,
    pub min_advisor_competence: f64,
}

impl Default for EnergisingThresholds {
    fn default() -> Self {
        Self {
            min_self_energy: 3.5,
            min_self_skill: 3.0,
            min_advisor_recognition: 3.0,
            min_advisor_competence: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HiddenThresholds {
    pub min_advisor_recognition: f64,
    pub min_advisor_competence: f64,
    /// Self-skill strictly below this counts as under-rating
    pub self_skill_below: f64,
    /// Self-confidence strictly below this counts as under-rating
    pub self_confidence_below: f64,
}

impl Default for HiddenThresholds {
    fn default() -> Self {
        Self {
            min_advisor_recognition: 3.5,
            min_advisor_competence: 3.5,
            self_skill_below: 3.0,
            self_confidence_below: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverusedThresholds {
    pub min_self_skill: f64,
    pub min_drain: f64,
    pub min_usage_frequency: f64,
    pub min_advisor_burnout_concern: f64,
}

impl Default for OverusedThresholds {
    fn default() -> Self {
        Self {
            min_self_skill: 3.5,
            min_drain: 3.0,
            min_usage_frequency: 3.5,
            min_advisor_burnout_concern: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AspirationalThresholds {
    pub min_interest: f64,
    pub max_current_level: f64,
    pub min_potential_belief: f64,
    pub min_advisor_development_potential: f64,
}

impl Default for AspirationalThresholds {
    fn default() -> Self {
        Self {
            min_interest: 4.0,
            max_current_level: 3.0,
            min_potential_belief: 3.0,
            min_advisor_development_potential: 2.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MisalignedThresholds {
    pub min_drain: f64,
    pub min_frequency: f64,
    pub min_competence_despite_drain: f64,
    pub min_advisor_competence: f64,
}

impl Default for MisalignedThresholds {
    fn default() -> Self {
        Self {
            min_drain: 3.5,
            min_frequency: 3.0,
            min_competence_despite_drain: 3.0,
            min_advisor_competence: 3.0,
        }
    }
}

/// Cut-offs for all five category detectors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub energising_strength: EnergisingThresholds,
    pub hidden_strength: HiddenThresholds,
    pub overused_talent: OverusedThresholds,
    pub aspirational: AspirationalThresholds,
    pub misaligned_energy: MisalignedThresholds,
}

/// Maximum number of insights kept per category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryCaps {
    pub energising_strength: usize,
    pub hidden_strength: usize,
    pub overused_talent: usize,
    pub aspirational: usize,
    pub misaligned_energy: usize,
}

impl Default for CategoryCaps {
    fn default() -> Self {
        Self {
            energising_strength: 5,
            hidden_strength: 4,
            overused_talent: 3,
            aspirational: 4,
            misaligned_energy: 3,
        }
    }
}

impl CategoryCaps {
    pub fn cap(&self, category: InsightCategory) -> usize {
        match category {
            InsightCategory::EnergisingStrength => self.energising_strength,
            InsightCategory::HiddenStrength => self.hidden_strength,
            InsightCategory::OverusedTalent => self.overused_talent,
            InsightCategory::Aspirational => self.aspirational,
            InsightCategory::MisalignedEnergy => self.misaligned_energy,
        }
    }
}

/// Everything tunable about classification and ranking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub thresholds: Thresholds,
    pub caps: CategoryCaps,
}

impl EngineConfig {
    /// The embedded default config
    pub fn builtin() -> Result<Self> {
        parse_config(DEFAULT_CONFIG)
    }

    /// Resolve config: explicit path, then data-dir override, then defaults
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        Self::load_resolved(resolve_override(override_path, default_config_path()))
    }

    fn load_resolved(path: Option<PathBuf>) -> Result<Self> {
        let Some(path) = path else {
            return Self::builtin();
        };
        let content = fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        parse_config(&content)
    }

    fn validate(&self) -> Result<()> {
        for category in InsightCategory::all() {
            if self.caps.cap(*category) == 0 {
                return Err(Error::Config(format!(
                    "Cap for {} must be at least 1",
                    category
                )));
            }
        }
        Ok(())
    }
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<EngineConfig> {
    let table: toml::Table = content
        .parse()
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;
    for key in unknown_keys(&table) {
        warn!(key = %key, "Ignoring unknown engine config key");
    }

    let config: EngineConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;
    config.validate()?;
    Ok(config)
}

/// Dotted paths in `table` that have no counterpart in [`EngineConfig`]
fn unknown_keys(table: &toml::Table) -> Vec<String> {
    match toml::Value::try_from(EngineConfig::default()) {
        Ok(toml::Value::Table(known)) => collect_unknown(table, &known, ""),
        _ => Vec::new(),
    }
}

fn collect_unknown(given: &toml::Table, known: &toml::Table, prefix: &str) -> Vec<String> {
    let mut unknown = Vec::new();
    for (key, value) in given {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match (value, known.get(key)) {
            (_, None) => unknown.push(path),
            (toml::Value::Table(inner), Some(toml::Value::Table(known_inner))) => {
                unknown.extend(collect_unknown(inner, known_inner, &path));
            }
            _ => {}
        }
    }
    unknown
}

/// Clamp a score into `[SCORE_MIN, SCORE_MAX]`
pub fn clamp_score(value: f64) -> f64 {
    value.clamp(SCORE_MIN, SCORE_MAX)
}
