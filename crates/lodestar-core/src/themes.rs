//! Theme aggregation
//!
//! Groups responses by normalized theme tag and reduces each group to a
//! [`ThemeSignalProfile`]: arithmetic means on the self side and
//! credibility-weighted means on the advisor side. Every theme is computed
//! independently from the immutable inputs, so the sequential and parallel
//! paths produce identical numbers.

use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::clamp_score;
use crate::models::{AdvisorResponse, Response};
use crate::signals::{AdvisorSignals, SelfSignals, SignalExtractor};

/// Aggregated profiles keyed by theme, iterated in theme-name order
pub type ThemeProfiles = BTreeMap<String, ThemeSignalProfile>;

/// Normalize a raw theme tag
///
/// Lower-cases, drops anything other than alphanumerics, whitespace, `_`
/// and `-`, then folds separator runs into a single `_`.
///
/// ```
/// use lodestar_core::themes::normalize_theme;
/// assert_eq!(normalize_theme("  Public Speaking! "), "public_speaking");
/// assert_eq!(normalize_theme("data-driven  decisions"), "data_driven_decisions");
/// ```
pub fn normalize_theme(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_sep = false;

    for c in raw.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(c);
        } else if c.is_whitespace() || c == '_' || c == '-' {
            pending_sep = true;
        }
    }

    out
}

/// Averaged first-person signals for one theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelfProfile {
    pub avg_energy: f64,
    pub avg_skill: f64,
    pub avg_confidence: f64,
    pub avg_drain: f64,
    pub avg_frequency: f64,
    pub avg_interest: f64,
    pub avg_current_level: f64,
    pub avg_potential: f64,
    pub avg_competence_despite_drain: f64,
    /// Number of self-responses tagged with the theme
    pub frequency: usize,
    /// Response texts in order of appearance
    pub evidence: Vec<String>,
}

/// Credibility-weighted advisor signals for one theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorProfile {
    pub weighted_recognition: f64,
    pub weighted_competence: f64,
    pub weighted_burnout_concern: f64,
    pub weighted_development_potential: f64,
    /// Number of advisor responses tagged with the theme
    pub frequency: usize,
    /// Sum of credibility weights
    pub total_credibility: f64,
    pub evidence: Vec<String>,
}

impl AdvisorProfile {
    /// Mean credibility across contributing advisors
    pub fn mean_credibility(&self) -> f64 {
        if self.frequency == 0 {
            0.0
        } else {
            self.total_credibility / self.frequency as f64
        }
    }
}

/// Both sides of the evidence for one theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeSignalProfile {
    pub theme: String,
    /// `None` when no self-response carries the theme
    pub self_profile: Option<SelfProfile>,
    /// `None` when no advisor response carries the theme
    pub advisor_profile: Option<AdvisorProfile>,
}

/// Builds per-theme profiles from raw responses
#[derive(Debug, Clone, Copy)]
pub struct ThemeAggregator<'a> {
    extractor: SignalExtractor<'a>,
}

struct ThemeGroup<'r> {
    own: Vec<(&'r Response, SelfSignals)>,
    advisors: Vec<(&'r AdvisorResponse, AdvisorSignals)>,
}

impl<'a> ThemeAggregator<'a> {
    pub fn new(extractor: SignalExtractor<'a>) -> Self {
        Self { extractor }
    }

    /// Aggregate every theme sequentially
    pub fn build_profiles(
        &self,
        self_responses: &[Response],
        advisor_responses: &[AdvisorResponse],
    ) -> ThemeProfiles {
        let groups = self.group(self_responses, advisor_responses);
        let profiles: ThemeProfiles = groups
            .into_iter()
            .map(|(theme, group)| {
                let profile = aggregate(&theme, &group);
                (theme, profile)
            })
            .collect();
        debug!(themes = profiles.len(), "Theme aggregation complete");
        profiles
    }

    /// Aggregate themes on the rayon pool; output equals [`Self::build_profiles`]
    pub fn build_profiles_parallel(
        &self,
        self_responses: &[Response],
        advisor_responses: &[AdvisorResponse],
    ) -> ThemeProfiles {
        let groups: Vec<(String, ThemeGroup<'_>)> = self
            .group(self_responses, advisor_responses)
            .into_iter()
            .collect();
        let profiles: ThemeProfiles = groups
            .par_iter()
            .map(|(theme, group)| (theme.clone(), aggregate(theme, group)))
            .collect::<Vec<_>>()
            .into_iter()
            .collect();
        debug!(themes = profiles.len(), "Parallel theme aggregation complete");
        profiles
    }

    /// Score each response once and bucket it under each of its themes
    fn group<'r>(
        &self,
        self_responses: &'r [Response],
        advisor_responses: &'r [AdvisorResponse],
    ) -> BTreeMap<String, ThemeGroup<'r>> {
        let mut groups: BTreeMap<String, ThemeGroup<'r>> = BTreeMap::new();

        for response in self_responses {
            let themes = normalized_tags(&response.theme_tags);
            if themes.is_empty() {
                continue;
            }
            let signals = self.extractor.self_signals(&response.text);
            for theme in themes {
                groups
                    .entry(theme)
                    .or_insert_with(ThemeGroup::empty)
                    .own
                    .push((response, signals));
            }
        }

        for response in advisor_responses {
            let themes = normalized_tags(&response.theme_tags);
            if themes.is_empty() {
                continue;
            }
            let signals = self.extractor.advisor_signals(&response.text);
            for theme in themes {
                groups
                    .entry(theme)
                    .or_insert_with(ThemeGroup::empty)
                    .advisors
                    .push((response, signals));
            }
        }

        groups
    }
}

impl ThemeGroup<'_> {
    fn empty() -> Self {
        Self {
            own: Vec::new(),
            advisors: Vec::new(),
        }
    }
}

/// Distinct non-empty normalized tags
fn normalized_tags(tags: &BTreeSet<String>) -> BTreeSet<String> {
    tags.iter()
        .map(|t| normalize_theme(t))
        .filter(|t| !t.is_empty())
        .collect()
}

fn aggregate(theme: &str, group: &ThemeGroup<'_>) -> ThemeSignalProfile {
    ThemeSignalProfile {
        theme: theme.to_string(),
        self_profile: aggregate_self(&group.own),
        advisor_profile: aggregate_advisors(&group.advisors),
    }
}

fn aggregate_self(entries: &[(&Response, SelfSignals)]) -> Option<SelfProfile> {
    if entries.is_empty() {
        return None;
    }

    let mean = |f: fn(&SelfSignals) -> f64| {
        let sum: f64 = entries.iter().map(|(_, s)| f(s)).sum();
        clamp_score(sum / entries.len() as f64)
    };

    Some(SelfProfile {
        avg_energy: mean(|s| s.energy),
        avg_skill: mean(|s| s.skill),
        avg_confidence: mean(|s| s.confidence),
        avg_drain: mean(|s| s.drain),
        avg_frequency: mean(|s| s.frequency),
        avg_interest: mean(|s| s.interest),
        avg_current_level: mean(|s| s.current_level),
        avg_potential: mean(|s| s.potential),
        avg_competence_despite_drain: mean(|s| s.competence_despite_drain),
        frequency: entries.len(),
        evidence: collect_evidence(entries.iter().map(|(r, _)| r.text.as_str())),
    })
}

fn aggregate_advisors(entries: &[(&AdvisorResponse, AdvisorSignals)]) -> Option<AdvisorProfile> {
    if entries.is_empty() {
        return None;
    }

    let weights: Vec<f64> = entries
        .iter()
        .map(|(r, _)| effective_weight(r.credibility_weight))
        .collect();
    let total_credibility: f64 = weights.iter().sum();

    let weighted = |f: fn(&AdvisorSignals) -> f64| {
        let values: Vec<f64> = entries.iter().map(|(_, s)| f(s)).collect();
        weighted_mean(&values, &weights)
    };

    Some(AdvisorProfile {
        weighted_recognition: weighted(|s| s.recognition),
        weighted_competence: weighted(|s| s.competence),
        weighted_burnout_concern: weighted(|s| s.burnout_concern),
        weighted_development_potential: weighted(|s| s.development_potential),
        frequency: entries.len(),
        total_credibility,
        evidence: collect_evidence(entries.iter().map(|(r, _)| r.text.as_str())),
    })
}

/// Negative or non-finite weights carry no credibility
fn effective_weight(weight: f64) -> f64 {
    if weight.is_finite() {
        weight.max(0.0)
    } else {
        0.0
    }
}

/// `Σ(value × weight) / Σ(weight)`, or `0.0` ("no signal") when weights sum to zero
pub fn weighted_mean(values: &[f64], weights: &[f64]) -> f64 {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    let sum: f64 = values.iter().zip(weights).map(|(v, w)| v * w).sum();
    clamp_score(sum / total)
}

fn collect_evidence<'t>(texts: impl Iterator<Item = &'t str>) -> Vec<String> {
    texts
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{Bucket, Dimension, DimensionSpec, Lexicon};
    use crate::models::{ConfidenceContext, Domain, ObservationPeriod};

    fn advisor(text: &str, tag: &str, weight: f64) -> AdvisorResponse {
        AdvisorResponse::new(
            text,
            ObservationPeriod::OneToThreeYears,
            ConfidenceContext::Confident,
        )
        .with_tag(tag)
        .with_credibility(weight)
    }

    #[test]
    fn test_normalize_theme() {
        assert_eq!(normalize_theme("Facilitation"), "facilitation");
        assert_eq!(normalize_theme("Public   Speaking"), "public_speaking");
        assert_eq!(normalize_theme("__systems--thinking__"), "systems_thinking");
        assert_eq!(normalize_theme("C++ & Rust!"), "c_rust");
        assert_eq!(normalize_theme("already_normal"), "already_normal");
        assert_eq!(normalize_theme("!!!"), "");
    }

    #[test]
    fn test_empty_inputs_produce_no_profiles() {
        let lexicon = Lexicon::builtin().unwrap();
        let aggregator = ThemeAggregator::new(SignalExtractor::new(&lexicon));
        assert!(aggregator.build_profiles(&[], &[]).is_empty());
    }

    #[test]
    fn test_untagged_responses_are_ignored() {
        let lexicon = Lexicon::builtin().unwrap();
        let aggregator = ThemeAggregator::new(SignalExtractor::new(&lexicon));
        let responses = vec![
            Response::new("I love this", Domain::Projects),
            Response::new("Also this", Domain::Projects).with_tag("???"),
        ];
        assert!(aggregator.build_profiles(&responses, &[]).is_empty());
    }

    #[test]
    fn test_single_response_values_verbatim() {
        let lexicon = Lexicon::builtin().unwrap();
        let extractor = SignalExtractor::new(&lexicon);
        let aggregator = ThemeAggregator::new(extractor);
        let text = "I love mentoring and I am good at it";
        let responses = vec![Response::new(text, Domain::Leadership).with_tag("Mentoring")];

        let profiles = aggregator.build_profiles(&responses, &[]);
        let profile = &profiles["mentoring"];
        let own = profile.self_profile.as_ref().unwrap();
        let expected = extractor.self_signals(text);

        assert_eq!(own.avg_energy, expected.energy);
        assert_eq!(own.avg_skill, expected.skill);
        assert_eq!(own.avg_confidence, expected.confidence);
        assert_eq!(own.frequency, 1);
        assert_eq!(own.evidence, vec![text.to_string()]);
        assert!(profile.advisor_profile.is_none());
    }

    #[test]
    fn test_self_mean_across_responses() {
        let lexicon = Lexicon::baselines_only().with_dimension(
            Dimension::Energy,
            DimensionSpec {
                baseline: 2.5,
                buckets: vec![Bucket {
                    name: "high".into(),
                    weight: 1.0,
                    phrases: vec!["yay".into()],
                }],
            },
        );
        let aggregator = ThemeAggregator::new(SignalExtractor::new(&lexicon));
        let responses = vec![
            Response::new("yay yay", Domain::Projects).with_tag("writing"),
            Response::new("meh", Domain::Projects).with_tag("writing"),
        ];

        let profiles = aggregator.build_profiles(&responses, &[]);
        let own = profiles["writing"].self_profile.as_ref().unwrap();
        assert_eq!(own.avg_energy, (4.5 + 2.5) / 2.0);
        assert_eq!(own.frequency, 2);
    }

    #[test]
    fn test_zero_weight_advisor_is_fully_discounted() {
        let lexicon = Lexicon::baselines_only().with_dimension(
            Dimension::Competence,
            DimensionSpec {
                baseline: 3.0,
                buckets: vec![
                    Bucket {
                        name: "high".into(),
                        weight: 1.0,
                        phrases: vec!["expert".into()],
                    },
                    Bucket {
                        name: "low".into(),
                        weight: -1.0,
                        phrases: vec!["weak".into()],
                    },
                ],
            },
        );
        let aggregator = ThemeAggregator::new(SignalExtractor::new(&lexicon));
        let advisors = vec![
            advisor("expert", "negotiation", 1.0),
            advisor("weak weak weak", "negotiation", 0.0),
        ];

        let profiles = aggregator.build_profiles(&[], &advisors);
        let observed = profiles["negotiation"].advisor_profile.as_ref().unwrap();
        assert_eq!(observed.weighted_competence, 4.0);
        assert_eq!(observed.total_credibility, 1.0);
        assert_eq!(observed.frequency, 2);
        assert!(profiles["negotiation"].self_profile.is_none());
    }

    #[test]
    fn test_all_zero_weights_mean_no_signal() {
        let lexicon = Lexicon::builtin().unwrap();
        let aggregator = ThemeAggregator::new(SignalExtractor::new(&lexicon));
        let advisors = vec![advisor("Always excellent", "planning", 0.0)];

        let profiles = aggregator.build_profiles(&[], &advisors);
        let observed = profiles["planning"].advisor_profile.as_ref().unwrap();
        assert_eq!(observed.weighted_recognition, 0.0);
        assert_eq!(observed.weighted_competence, 0.0);
        assert_eq!(observed.total_credibility, 0.0);
    }

    #[test]
    fn test_weighted_mean() {
        assert_eq!(weighted_mean(&[4.0, 1.0], &[1.0, 0.0]), 4.0);
        assert_eq!(weighted_mean(&[4.0, 2.0], &[1.0, 1.0]), 3.0);
        assert_eq!(weighted_mean(&[4.0], &[0.0]), 0.0);
        assert_eq!(weighted_mean(&[], &[]), 0.0);
    }

    #[test]
    fn test_response_counted_once_per_normalized_theme() {
        let lexicon = Lexicon::builtin().unwrap();
        let aggregator = ThemeAggregator::new(SignalExtractor::new(&lexicon));
        let responses = vec![Response::new("I love it", Domain::Values)
            .with_tag("Team Building")
            .with_tag("team_building")
            .with_tag("coaching")];

        let profiles = aggregator.build_profiles(&responses, &[]);
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles["team_building"].self_profile.as_ref().unwrap().frequency, 1);
        assert!(profiles.contains_key("coaching"));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let lexicon = Lexicon::builtin().unwrap();
        let aggregator = ThemeAggregator::new(SignalExtractor::new(&lexicon));
        let set = crate::test_utils::sample_response_set();

        let sequential = aggregator.build_profiles(&set.self_responses, &set.advisor_responses);
        let parallel =
            aggregator.build_profiles_parallel(&set.self_responses, &set.advisor_responses);

        assert_eq!(sequential, parallel);
        for (theme, profile) in &sequential {
            let other = &parallel[theme];
            if let (Some(a), Some(b)) = (&profile.advisor_profile, &other.advisor_profile) {
                assert_eq!(
                    a.weighted_competence.to_bits(),
                    b.weighted_competence.to_bits()
                );
            }
        }
    }

    #[test]
    fn test_evidence_keeps_order_and_skips_blank() {
        let lexicon = Lexicon::builtin().unwrap();
        let aggregator = ThemeAggregator::new(SignalExtractor::new(&lexicon));
        let responses: Vec<Response> = ["first", "   ", "second", "third", "fourth"]
            .iter()
            .map(|t| Response::new(*t, Domain::Projects).with_tag("ops"))
            .collect();

        let profiles = aggregator.build_profiles(&responses, &[]);
        let own = profiles["ops"].self_profile.as_ref().unwrap();
        assert_eq!(own.evidence, vec!["first", "second", "third", "fourth"]);
        assert_eq!(own.frequency, 5);
    }
}
