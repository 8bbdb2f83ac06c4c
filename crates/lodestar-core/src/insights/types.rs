//! Core types for the Insight Engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Insight categories a theme can qualify for
///
/// Categories are not mutually exclusive; each detector runs independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    /// High energy, solid skill, and advisors see it too
    EnergisingStrength,
    /// Advisors rate it highly but the subject under-rates it
    HiddenStrength,
    /// Skilled and used a lot, but draining
    OverusedTalent,
    /// Strong interest and belief, low current level
    Aspirational,
    /// Frequent, competent, and draining
    MisalignedEnergy,
}

impl InsightCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightCategory::EnergisingStrength => "energising_strength",
            InsightCategory::HiddenStrength => "hidden_strength",
            InsightCategory::OverusedTalent => "overused_talent",
            InsightCategory::Aspirational => "aspirational",
            InsightCategory::MisalignedEnergy => "misaligned_energy",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            InsightCategory::EnergisingStrength => "Energising Strength",
            InsightCategory::HiddenStrength => "Hidden Strength",
            InsightCategory::OverusedTalent => "Overused Talent",
            InsightCategory::Aspirational => "Aspirational",
            InsightCategory::MisalignedEnergy => "Misaligned Energy",
        }
    }

    pub fn all() -> &'static [InsightCategory] {
        &[
            InsightCategory::EnergisingStrength,
            InsightCategory::HiddenStrength,
            InsightCategory::OverusedTalent,
            InsightCategory::Aspirational,
            InsightCategory::MisalignedEnergy,
        ]
    }
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "energising_strength" => Ok(InsightCategory::EnergisingStrength),
            "hidden_strength" => Ok(InsightCategory::HiddenStrength),
            "overused_talent" => Ok(InsightCategory::OverusedTalent),
            "aspirational" => Ok(InsightCategory::Aspirational),
            "misaligned_energy" => Ok(InsightCategory::MisalignedEnergy),
            _ => Err(Error::UnknownCategory(s.to_string())),
        }
    }
}

/// A positive detector decision for one theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Signals relevant to the category, before rounding
    pub scores: BTreeMap<String, f64>,
    /// Category-specific ranking metric
    pub composite: f64,
}

impl Detection {
    pub fn new(composite: f64) -> Self {
        Self {
            scores: BTreeMap::new(),
            composite,
        }
    }

    pub fn with_score(mut self, name: &str, value: f64) -> Self {
        self.scores.insert(name.to_string(), value);
        self
    }

    pub fn score(&self, name: &str) -> Option<f64> {
        self.scores.get(name).copied()
    }
}

/// Template text for an insight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    pub title: String,
    pub description: String,
    pub advice: String,
}

/// Title-case a normalized theme ("public_speaking" -> "Public Speaking")
pub fn display_theme(theme: &str) -> String {
    theme
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A ranked, evidence-backed insight about one theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightRecord {
    /// Short digest of `key` and the generation time
    pub id: String,
    /// Stable key for deduplication (e.g., "hidden_strength:facilitation")
    pub key: String,
    pub category: InsightCategory,
    pub theme_name: String,
    pub title: String,
    pub description: String,
    /// Rounded signals, each in 1..=5
    pub scores: BTreeMap<String, u8>,
    /// Up to three self-response excerpts in order of appearance
    pub evidence_from_self: Vec<String>,
    /// Up to three advisor excerpts in order of appearance
    pub evidence_from_advisors: Vec<String>,
    pub advice: String,
    /// Composite confidence in `[0, 1]`
    pub confidence: f64,
    /// Category-specific ranking metric
    pub composite_score: f64,
}

/// Ranked insights for every category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    pub generated_at: DateTime<Utc>,
    pub categories: BTreeMap<InsightCategory, Vec<InsightRecord>>,
}

impl InsightReport {
    /// A report with an empty list for every category
    pub fn empty(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            categories: InsightCategory::all()
                .iter()
                .map(|c| (*c, Vec::new()))
                .collect(),
        }
    }

    pub fn get(&self, category: InsightCategory) -> &[InsightRecord] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `theme` was ranked into `category`
    pub fn contains(&self, category: InsightCategory, theme: &str) -> bool {
        self.get(category).iter().any(|r| r.theme_name == theme)
    }

    pub fn total(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// All records in category order, then rank order
    pub fn iter(&self) -> impl Iterator<Item = &InsightRecord> {
        self.categories.values().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serialization() {
        assert_eq!(InsightCategory::HiddenStrength.as_str(), "hidden_strength");
        assert_eq!(
            InsightCategory::from_str("misaligned_energy").unwrap(),
            InsightCategory::MisalignedEnergy
        );
        assert!(InsightCategory::from_str("quiet_strength").is_err());
        assert_eq!(
            serde_json::to_string(&InsightCategory::OverusedTalent).unwrap(),
            "\"overused_talent\""
        );
    }

    #[test]
    fn test_detection_builder() {
        let detection = Detection::new(12.5)
            .with_score("energy", 4.2)
            .with_score("skill", 3.1);
        assert_eq!(detection.score("energy"), Some(4.2));
        assert_eq!(detection.score("drain"), None);
        assert_eq!(detection.composite, 12.5);
    }

    #[test]
    fn test_display_theme() {
        assert_eq!(display_theme("public_speaking"), "Public Speaking");
        assert_eq!(display_theme("facilitation"), "Facilitation");
        assert_eq!(display_theme(""), "");
    }

    #[test]
    fn test_empty_report_has_every_category() {
        let report = InsightReport::empty(Utc::now());
        assert_eq!(report.categories.len(), 5);
        assert!(report.is_empty());
        for category in InsightCategory::all() {
            assert!(report.get(*category).is_empty());
        }
    }
}
