//! Hidden Strength Insight
//!
//! Advisors consistently rate the theme highly while the subject either
//! never mentions it or rates their own skill or confidence low.
//! Ranked by potential impact plus the gap between how others and the
//! subject see it.

use crate::config::{SCORE_MAX, SCORE_MIN};
use crate::themes::ThemeSignalProfile;

use super::engine::{AnalysisContext, CategoryDetector};
use super::types::{display_theme, Detection, InsightCategory, Narrative};

/// Detector for strengths others see more clearly than the subject
pub struct HiddenStrengthDetector;

impl HiddenStrengthDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HiddenStrengthDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryDetector for HiddenStrengthDetector {
    fn category(&self) -> InsightCategory {
        InsightCategory::HiddenStrength
    }

    fn name(&self) -> &'static str {
        "Hidden Strength"
    }

    fn detect(
        &self,
        profile: &ThemeSignalProfile,
        ctx: &AnalysisContext<'_>,
    ) -> Option<Detection> {
        let observed = profile.advisor_profile.as_ref()?;
        let t = &ctx.config.thresholds.hidden_strength;

        if observed.weighted_recognition < t.min_advisor_recognition
            || observed.weighted_competence < t.min_advisor_competence
        {
            return None;
        }

        let under_rated = match &profile.self_profile {
            None => true,
            Some(own) => {
                own.avg_skill < t.self_skill_below || own.avg_confidence < t.self_confidence_below
            }
        };
        if !under_rated {
            return None;
        }

        let potential_impact = (observed.weighted_recognition + observed.weighted_competence) / 2.0;
        // A subject who never mentions the theme sits at the bottom of the scale
        let self_view = profile
            .self_profile
            .as_ref()
            .map(|own| (own.avg_skill + own.avg_confidence) / 2.0)
            .unwrap_or(SCORE_MIN);
        let recognition_gap = (potential_impact - self_view).clamp(0.0, SCORE_MAX - SCORE_MIN);

        let mut detection = Detection::new(potential_impact + recognition_gap)
            .with_score("recognition", observed.weighted_recognition)
            .with_score("competence", observed.weighted_competence)
            .with_score("potential_impact", potential_impact);
        if let Some(own) = &profile.self_profile {
            detection = detection
                .with_score("self_skill", own.avg_skill)
                .with_score("self_confidence", own.avg_confidence);
        }

        Some(detection)
    }

    fn narrate(&self, theme: &str, detection: &Detection) -> Narrative {
        let name = display_theme(theme);
        let self_rated = detection.score("self_skill").is_some();
        let impact = detection.score("potential_impact").unwrap_or(SCORE_MIN);

        let description = if self_rated {
            format!(
                "Advisors rate your {} highly, higher than you rate it yourself.",
                name.to_lowercase()
            )
        } else {
            format!(
                "Advisors point to {} as a strength, but it never came up in your own reflections.",
                name.to_lowercase()
            )
        };

        let advice = if impact >= 4.5 {
            format!(
                "Ask two advisors for concrete examples of your {} and add them to how you describe yourself.",
                name.to_lowercase()
            )
        } else if self_rated {
            format!(
                "Test the gap: volunteer for one task that leans on {} and compare notes afterwards.",
                name.to_lowercase()
            )
        } else {
            format!(
                "Write down where you last used {} and what the result was.",
                name.to_lowercase()
            )
        };

        Narrative {
            title: format!("{} is a hidden strength", name),
            description,
            advice,
        }
    }
}
