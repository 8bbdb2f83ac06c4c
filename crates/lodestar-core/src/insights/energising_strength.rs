//! Energising Strength Insight
//!
//! A theme the subject enjoys, is good at, and that advisors recognise.
//! Ranked by skill + energy + recognition + leverageability, where
//! leverageability grows with the number of application contexts
//! (leadership, technical, ...) mentioned across the evidence.

use crate::config::{SCORE_MAX, SCORE_MIN};
use crate::themes::ThemeSignalProfile;

use super::engine::{AnalysisContext, CategoryDetector};
use super::types::{display_theme, Detection, InsightCategory, Narrative};

/// Detector for energising strengths
pub struct EnergisingStrengthDetector;

impl EnergisingStrengthDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnergisingStrengthDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryDetector for EnergisingStrengthDetector {
    fn category(&self) -> InsightCategory {
        InsightCategory::EnergisingStrength
    }

    fn name(&self) -> &'static str {
        "Energising Strength"
    }

    fn detect(
        &self,
        profile: &ThemeSignalProfile,
        ctx: &AnalysisContext<'_>,
    ) -> Option<Detection> {
        let own = profile.self_profile.as_ref()?;
        let observed = profile.advisor_profile.as_ref()?;
        let t = &ctx.config.thresholds.energising_strength;

        let qualifies = own.avg_energy >= t.min_self_energy
            && own.avg_skill >= t.min_self_skill
            && observed.weighted_recognition >= t.min_advisor_recognition
            && observed.weighted_competence >= t.min_advisor_competence;
        if !qualifies {
            return None;
        }

        let texts = own
            .evidence
            .iter()
            .chain(&observed.evidence)
            .map(String::as_str);
        let contexts = ctx.extractor.contexts_mentioned(texts).len();
        let leverageability = (SCORE_MIN + contexts as f64).min(SCORE_MAX);

        let composite =
            own.avg_skill + own.avg_energy + observed.weighted_recognition + leverageability;

        Some(
            Detection::new(composite)
                .with_score("energy", own.avg_energy)
                .with_score("skill", own.avg_skill)
                .with_score("recognition", observed.weighted_recognition)
                .with_score("competence", observed.weighted_competence)
                .with_score("leverageability", leverageability),
        )
    }

    fn narrate(&self, theme: &str, detection: &Detection) -> Narrative {
        let name = display_theme(theme);
        let leverage = detection.score("leverageability").unwrap_or(SCORE_MIN);
        let recognition = detection.score("recognition").unwrap_or(SCORE_MIN);

        let advice = if leverage >= 4.0 {
            format!(
                "{} already carries across several kinds of work. Shape your role so it sits at the centre.",
                name
            )
        } else if recognition >= 4.0 {
            format!(
                "Others clearly see your {}. Ask for projects where it is the main contribution.",
                name.to_lowercase()
            )
        } else {
            format!(
                "Find one more setting this quarter where you can put {} to work.",
                name.to_lowercase()
            )
        };

        Narrative {
            title: format!("{} energises you", name),
            description: format!(
                "You get energy from {} and do it well, and the people around you notice.",
                name.to_lowercase()
            ),
            advice,
        }
    }
}
