//! Insight record assembly
//!
//! Turns a positive [`Detection`] into an [`InsightRecord`]: rounded scores,
//! first-N evidence from each side, a blended confidence and a short ID.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::config::{SCORE_MAX, SCORE_MIN};
use crate::themes::ThemeSignalProfile;

use super::engine::CategoryDetector;
use super::types::{Detection, InsightCategory, InsightRecord};

/// Evidence excerpts kept per side
pub const MAX_EVIDENCE: usize = 3;

/// Evidence items at which the evidence factor saturates
const EVIDENCE_SATURATION: usize = 6;

const SELF_CONFIDENCE_WEIGHT: f64 = 0.4;
const EVIDENCE_WEIGHT: f64 = 0.2;
const ADVISOR_CREDIBILITY_WEIGHT: f64 = 0.4;

/// Assemble the record for a detected theme
///
/// Returns `None` when the category's required profile is missing, which a
/// detector should already have ruled out.
pub fn build(
    detector: &dyn CategoryDetector,
    profile: &ThemeSignalProfile,
    detection: &Detection,
    generated_at: DateTime<Utc>,
) -> Option<InsightRecord> {
    let category = detector.category();
    if !has_required_profiles(category, profile) {
        return None;
    }

    let narrative = detector.narrate(&profile.theme, detection);
    let key = format!("{}:{}", category.as_str(), profile.theme);

    Some(InsightRecord {
        id: record_id(&key, generated_at),
        key,
        category,
        theme_name: profile.theme.clone(),
        title: narrative.title,
        description: narrative.description,
        scores: round_scores(&detection.scores),
        evidence_from_self: profile
            .self_profile
            .as_ref()
            .map(|p| first_evidence(&p.evidence))
            .unwrap_or_default(),
        evidence_from_advisors: profile
            .advisor_profile
            .as_ref()
            .map(|p| first_evidence(&p.evidence))
            .unwrap_or_default(),
        advice: narrative.advice,
        confidence: confidence(profile),
        composite_score: detection.composite,
    })
}

fn has_required_profiles(category: InsightCategory, profile: &ThemeSignalProfile) -> bool {
    match category {
        InsightCategory::EnergisingStrength => {
            profile.self_profile.is_some() && profile.advisor_profile.is_some()
        }
        InsightCategory::HiddenStrength => profile.advisor_profile.is_some(),
        InsightCategory::OverusedTalent
        | InsightCategory::Aspirational
        | InsightCategory::MisalignedEnergy => profile.self_profile.is_some(),
    }
}

/// Round to the nearest integer within 1..=5
pub fn round_score(value: f64) -> u8 {
    value.round().clamp(SCORE_MIN, SCORE_MAX) as u8
}

fn round_scores(scores: &BTreeMap<String, f64>) -> BTreeMap<String, u8> {
    scores
        .iter()
        .map(|(name, value)| (name.clone(), round_score(*value)))
        .collect()
}

fn first_evidence(evidence: &[String]) -> Vec<String> {
    evidence.iter().take(MAX_EVIDENCE).cloned().collect()
}

/// Blend of self-confidence, amount of evidence and advisor credibility
pub fn confidence(profile: &ThemeSignalProfile) -> f64 {
    let self_confidence = profile
        .self_profile
        .as_ref()
        .map(|p| p.avg_confidence / SCORE_MAX)
        .unwrap_or(0.0);

    let evidence_count = profile
        .self_profile
        .as_ref()
        .map_or(0, |p| p.evidence.len())
        + profile
            .advisor_profile
            .as_ref()
            .map_or(0, |p| p.evidence.len());
    let evidence_factor =
        evidence_count.min(EVIDENCE_SATURATION) as f64 / EVIDENCE_SATURATION as f64;

    let credibility = profile
        .advisor_profile
        .as_ref()
        .map(|p| p.mean_credibility())
        .unwrap_or(0.0);

    (SELF_CONFIDENCE_WEIGHT * self_confidence
        + EVIDENCE_WEIGHT * evidence_factor
        + ADVISOR_CREDIBILITY_WEIGHT * credibility)
        .clamp(0.0, 1.0)
}

fn record_id(key: &str, generated_at: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hasher.update(generated_at.to_rfc3339().as_bytes());
    hex::encode(&hasher.finalize()[..8])
}
