//! Insight Engine - orchestrates aggregation, detection, building and ranking

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::lexicon::Lexicon;
use crate::models::{AdvisorResponse, Response, ResponseSet};
use crate::signals::SignalExtractor;
use crate::themes::{ThemeAggregator, ThemeProfiles, ThemeSignalProfile};

use super::builder;
use super::types::{Detection, InsightCategory, InsightRecord, InsightReport, Narrative};
use super::{
    AspirationalDetector, EnergisingStrengthDetector, HiddenStrengthDetector,
    MisalignedEnergyDetector, OverusedTalentDetector,
};

/// Context provided to category detectors
pub struct AnalysisContext<'a> {
    /// Thresholds and caps
    pub config: &'a EngineConfig,
    /// Extractor for detectors that scan evidence text
    pub extractor: SignalExtractor<'a>,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(config: &'a EngineConfig, lexicon: &'a Lexicon) -> Self {
        Self {
            config,
            extractor: SignalExtractor::new(lexicon),
        }
    }
}

/// Trait for category detectors
///
/// A detector is a pure predicate over one theme's profile. It must return
/// `None` when a profile it requires is absent.
pub trait CategoryDetector: Send + Sync {
    /// Category this detector decides membership for
    fn category(&self) -> InsightCategory;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Decide membership and compute the scores needed for ranking
    fn detect(&self, profile: &ThemeSignalProfile, ctx: &AnalysisContext<'_>)
        -> Option<Detection>;

    /// Template title, description and advice for a detected theme
    fn narrate(&self, theme: &str, detection: &Detection) -> Narrative;
}

/// The main insight engine
pub struct InsightEngine {
    lexicon: Lexicon,
    config: EngineConfig,
    detectors: Vec<Box<dyn CategoryDetector>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new(Lexicon::default(), EngineConfig::default())
    }
}

impl InsightEngine {
    /// Create a new insight engine with the built-in detectors
    pub fn new(lexicon: Lexicon, config: EngineConfig) -> Self {
        let mut engine = Self {
            lexicon,
            config,
            detectors: vec![],
        };

        engine.register(Box::new(EnergisingStrengthDetector::new()));
        engine.register(Box::new(HiddenStrengthDetector::new()));
        engine.register(Box::new(OverusedTalentDetector::new()));
        engine.register(Box::new(AspirationalDetector::new()));
        engine.register(Box::new(MisalignedEnergyDetector::new()));

        engine
    }

    /// Register a detector
    pub fn register(&mut self, detector: Box<dyn CategoryDetector>) {
        self.detectors.push(detector);
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Categories covered by registered detectors
    pub fn categories(&self) -> Vec<InsightCategory> {
        self.detectors.iter().map(|d| d.category()).collect()
    }

    fn context(&self) -> AnalysisContext<'_> {
        AnalysisContext::new(&self.config, &self.lexicon)
    }

    /// Aggregate responses into per-theme profiles
    pub fn profiles(
        &self,
        self_responses: &[Response],
        advisor_responses: &[AdvisorResponse],
    ) -> ThemeProfiles {
        ThemeAggregator::new(SignalExtractor::new(&self.lexicon))
            .build_profiles(self_responses, advisor_responses)
    }

    /// Run the full pipeline over a response set
    pub fn analyze(
        &self,
        self_responses: &[Response],
        advisor_responses: &[AdvisorResponse],
    ) -> InsightReport {
        let profiles = self.profiles(self_responses, advisor_responses);
        self.analyze_profiles(&profiles, Utc::now())
    }

    pub fn analyze_set(&self, set: &ResponseSet) -> InsightReport {
        self.analyze(&set.self_responses, &set.advisor_responses)
    }

    /// Detect, build and rank insights from already-aggregated profiles
    pub fn analyze_profiles(
        &self,
        profiles: &ThemeProfiles,
        generated_at: DateTime<Utc>,
    ) -> InsightReport {
        let ctx = self.context();
        let mut report = InsightReport::empty(generated_at);

        for detector in &self.detectors {
            let category = detector.category();
            let candidates: Vec<InsightRecord> = profiles
                .values()
                .filter_map(|profile| {
                    let detection = detector.detect(profile, &ctx)?;
                    builder::build(detector.as_ref(), profile, &detection, generated_at)
                })
                .collect();

            debug!(
                detector = detector.name(),
                category = category.as_str(),
                candidates = candidates.len(),
                "Category detection complete"
            );

            report
                .categories
                .entry(category)
                .or_default()
                .extend(candidates);
        }

        for (category, records) in report.categories.iter_mut() {
            let cap = self.config.caps.cap(*category);
            *records = rank(std::mem::take(records), cap);
        }

        info!(
            themes = profiles.len(),
            insights = report.total(),
            "Insight analysis complete"
        );
        report
    }

    /// Build one theme/category insight, or `None` if the theme does not qualify
    pub fn build(
        &self,
        theme: &str,
        category: InsightCategory,
        profiles: &ThemeProfiles,
    ) -> Option<InsightRecord> {
        let profile = profiles.get(theme)?;
        let detector = self.detectors.iter().find(|d| d.category() == category)?;
        let ctx = self.context();
        let detection = detector.detect(profile, &ctx)?;
        builder::build(detector.as_ref(), profile, &detection, Utc::now())
    }
}

/// Sort by composite score (highest first) and keep the top `cap`
///
/// The sort is stable: equal scores keep their theme-iteration order.
pub fn rank(mut records: Vec<InsightRecord>, cap: usize) -> Vec<InsightRecord> {
    records.sort_by(|a, b| b.composite_score.total_cmp(&a.composite_score));
    records.truncate(cap);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConfidenceContext, Domain, ObservationPeriod};
    use crate::test_utils;

    fn record(theme: &str, composite: f64) -> InsightRecord {
        InsightRecord {
            id: theme.to_string(),
            key: format!("aspirational:{}", theme),
            category: InsightCategory::Aspirational,
            theme_name: theme.to_string(),
            title: String::new(),
            description: String::new(),
            scores: Default::default(),
            evidence_from_self: vec![],
            evidence_from_advisors: vec![],
            advice: String::new(),
            confidence: 0.5,
            composite_score: composite,
        }
    }

    #[test]
    fn test_engine_creation() {
        let engine = InsightEngine::default();
        let categories = engine.categories();
        for category in InsightCategory::all() {
            assert!(categories.contains(category));
        }
    }

    #[test]
    fn test_rank_sorts_descending_and_truncates() {
        let records = vec![record("a", 3.0), record("b", 9.0), record("c", 6.0)];
        let ranked = rank(records, 2);
        let themes: Vec<&str> = ranked.iter().map(|r| r.theme_name.as_str()).collect();
        assert_eq!(themes, vec!["b", "c"]);
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let records = vec![
            record("alpha", 5.0),
            record("beta", 7.0),
            record("gamma", 5.0),
            record("delta", 5.0),
        ];
        let ranked = rank(records, 10);
        let themes: Vec<&str> = ranked.iter().map(|r| r.theme_name.as_str()).collect();
        assert_eq!(themes, vec!["beta", "alpha", "gamma", "delta"]);
    }

    #[test]
    fn test_empty_input_yields_empty_categories() {
        let engine = InsightEngine::default();
        let report = engine.analyze(&[], &[]);
        assert!(report.is_empty());
        for category in InsightCategory::all() {
            assert!(report.get(*category).is_empty());
        }
    }

    #[test]
    fn test_untagged_input_yields_no_insights() {
        let engine = InsightEngine::default();
        let responses = vec![Response::new(
            "I love facilitation and I am excellent at it",
            Domain::Leadership,
        )];
        assert!(engine.analyze(&responses, &[]).is_empty());
    }

    #[test]
    fn test_energising_strength_end_to_end() {
        let engine = InsightEngine::default();
        let responses = vec![test_utils::self_response(
            "I love facilitation. I love the room. I love it. \
             I am excellent with groups, excellent at prep, excellent at follow-up. \
             I feel confident, confident and confident.",
            &["facilitation"],
        )];
        let advisors = vec![test_utils::advisor_response(
            "They are always excellent in workshops",
            &["facilitation"],
            1.0,
        )];

        let report = engine.analyze(&responses, &advisors);
        assert!(report.contains(InsightCategory::EnergisingStrength, "facilitation"));

        let insight = &report.get(InsightCategory::EnergisingStrength)[0];
        assert_eq!(insight.key, "energising_strength:facilitation");
        assert!(insight.scores.values().all(|s| (1..=5).contains(s)));
        assert!((0.0..=1.0).contains(&insight.confidence));
    }

    #[test]
    fn test_advisor_only_theme_is_hidden_not_energising() {
        let engine = InsightEngine::default();
        let advisors = vec![test_utils::advisor_response(
            "An expert negotiator, always",
            &["negotiation"],
            1.0,
        )];

        let report = engine.analyze(&[], &advisors);
        assert!(report.contains(InsightCategory::HiddenStrength, "negotiation"));
        assert!(!report.contains(InsightCategory::EnergisingStrength, "negotiation"));
    }

    #[test]
    fn test_caps_truncate_every_category() {
        let engine = InsightEngine::default();
        let mut responses = Vec::new();
        let mut advisors = Vec::new();
        // Every theme qualifies for all five categories
        for i in 0..12 {
            let theme = format!("theme{:02}", i);
            responses.push(test_utils::self_response(
                "I love it, I enjoy it, I love it. I am excellent, skilled and good at it. \
                 I always do it, every day, and it is draining and exhausting. \
                 I want to grow, I dream of it and I am curious. \
                 I am unsure, but I am a quick learner.",
                &[&theme],
            ));
            advisors.push(test_utils::advisor_response(
                "Always excellent, an expert, consistently outstanding, \
                 but stretched and overloaded. Promising, with real potential.",
                &[&theme],
                1.0,
            ));
        }

        let profiles = engine.profiles(&responses, &advisors);
        let ctx = engine.context();
        for detector in &engine.detectors {
            let hits = profiles
                .values()
                .filter(|p| detector.detect(p, &ctx).is_some())
                .count();
            assert_eq!(hits, 12, "{}", detector.name());
        }

        let report = engine.analyze(&responses, &advisors);
        for category in InsightCategory::all() {
            assert_eq!(
                report.get(*category).len(),
                engine.config().caps.cap(*category),
                "{}",
                category
            );
        }

        // Equal composites keep theme-name order
        let hidden: Vec<&str> = report
            .get(InsightCategory::HiddenStrength)
            .iter()
            .map(|r| r.theme_name.as_str())
            .collect();
        assert_eq!(hidden, vec!["theme00", "theme01", "theme02", "theme03"]);
    }

    #[test]
    fn test_repeated_runs_produce_identical_order() {
        let engine = InsightEngine::default();
        let set = test_utils::sample_response_set();
        let profiles = engine.profiles(&set.self_responses, &set.advisor_responses);
        let at = test_utils::fixed_time();

        let first = engine.analyze_profiles(&profiles, at);
        let second = engine.analyze_profiles(&profiles, at);
        assert_eq!(first, second);

        let a = engine.analyze_set(&set);
        let b = engine.analyze_set(&set);
        let keys = |r: &InsightReport| r.iter().map(|i| i.key.clone()).collect::<Vec<_>>();
        assert_eq!(keys(&a), keys(&b));
    }

    #[test]
    fn test_build_single_theme() {
        let engine = InsightEngine::default();
        let advisors = vec![AdvisorResponse::new(
            "The expert everyone asks, always",
            ObservationPeriod::MoreThanThreeYears,
            ConfidenceContext::VeryConfident,
        )
        .with_tag("debugging")];
        let profiles = engine.profiles(&[], &advisors);

        let record = engine
            .build("debugging", InsightCategory::HiddenStrength, &profiles)
            .unwrap();
        assert_eq!(record.category, InsightCategory::HiddenStrength);
        assert!(engine
            .build("debugging", InsightCategory::EnergisingStrength, &profiles)
            .is_none());
        assert!(engine
            .build("missing", InsightCategory::HiddenStrength, &profiles)
            .is_none());
    }
}
