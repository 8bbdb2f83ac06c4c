//! Signal extraction from free text
//!
//! Each dimension score starts at the dimension's baseline and moves by
//! `count × weight` for every bucket, where `count` is the number of
//! case-insensitive substring occurrences of the bucket's phrases. Phrases
//! are not word-boundary safe and overlapping matches of different phrases
//! each count. The result is clamped to `[1.0, 5.0]`; extraction never fails.

use serde::{Deserialize, Serialize};

use crate::config::clamp_score;
use crate::lexicon::{Dimension, DimensionSpec, Lexicon};

/// Score one dimension of `text` against `spec`
pub fn extract_dimension(text: &str, spec: &DimensionSpec) -> f64 {
    clamp_score(spec.baseline + raw_adjustment(&text.to_lowercase(), spec))
}

/// Unclamped sum of `count × weight` over all buckets
///
/// `text` must already be lower-cased.
fn raw_adjustment(text: &str, spec: &DimensionSpec) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    spec.buckets
        .iter()
        .map(|bucket| {
            let count: usize = bucket
                .phrases
                .iter()
                .map(|phrase| count_occurrences(text, phrase))
                .sum();
            count as f64 * bucket.weight
        })
        .sum()
}

fn count_occurrences(text: &str, phrase: &str) -> usize {
    if phrase.is_empty() {
        return 0;
    }
    text.matches(phrase).count()
}

/// Per-response scores for the first-person dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelfSignals {
    pub energy: f64,
    pub skill: f64,
    pub confidence: f64,
    pub drain: f64,
    pub frequency: f64,
    pub interest: f64,
    pub current_level: f64,
    pub potential: f64,
    pub competence_despite_drain: f64,
}

/// Per-response scores for the advisor dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdvisorSignals {
    pub recognition: f64,
    pub competence: f64,
    pub burnout_concern: f64,
    pub development_potential: f64,
}

/// Scores text against a borrowed [`Lexicon`]
#[derive(Debug, Clone, Copy)]
pub struct SignalExtractor<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> SignalExtractor<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &'a Lexicon {
        self.lexicon
    }

    /// Score one dimension; dimensions absent from the lexicon yield their baseline
    pub fn extract(&self, text: &str, dimension: Dimension) -> f64 {
        self.extract_lowered(&text.to_lowercase(), dimension)
    }

    fn extract_lowered(&self, lowered: &str, dimension: Dimension) -> f64 {
        match self.lexicon.spec(dimension) {
            Some(spec) => clamp_score(spec.baseline + raw_adjustment(lowered, spec)),
            None => dimension.default_baseline(),
        }
    }

    pub fn self_signals(&self, text: &str) -> SelfSignals {
        let lowered = text.to_lowercase();
        let score = |d| self.extract_lowered(&lowered, d);
        SelfSignals {
            energy: score(Dimension::Energy),
            skill: score(Dimension::Skill),
            confidence: score(Dimension::Confidence),
            drain: score(Dimension::Drain),
            frequency: score(Dimension::Frequency),
            interest: score(Dimension::Interest),
            current_level: score(Dimension::CurrentLevel),
            potential: score(Dimension::Potential),
            competence_despite_drain: score(Dimension::CompetenceDespiteDrain),
        }
    }

    pub fn advisor_signals(&self, text: &str) -> AdvisorSignals {
        let lowered = text.to_lowercase();
        let score = |d| self.extract_lowered(&lowered, d);
        AdvisorSignals {
            recognition: score(Dimension::Recognition),
            competence: score(Dimension::Competence),
            burnout_concern: score(Dimension::BurnoutConcern),
            development_potential: score(Dimension::DevelopmentPotential),
        }
    }

    /// Application contexts (leadership, technical, ...) mentioned in any of `texts`
    pub fn contexts_mentioned<'t>(&self, texts: impl IntoIterator<Item = &'t str>) -> Vec<&'a str> {
        let lowered: Vec<String> = texts.into_iter().map(|t| t.to_lowercase()).collect();
        self.lexicon
            .contexts()
            .iter()
            .filter(|(_, keywords)| {
                keywords
                    .iter()
                    .any(|k| lowered.iter().any(|t| count_occurrences(t, k) > 0))
            })
            .map(|(name, _)| name.as_str())
            .collect()
    }
}
