//! Misaligned Energy Insight
//!
//! Work the subject does often and competently but finds heavily draining.
//! Ranked by impact priority, weighted towards drain.

use crate::config::SCORE_MIN;
use crate::themes::ThemeSignalProfile;

use super::engine::{AnalysisContext, CategoryDetector};
use super::types::{display_theme, Detection, InsightCategory, Narrative};

const DRAIN_WEIGHT: f64 = 0.6;
const FREQUENCY_WEIGHT: f64 = 0.4;

/// Detector for competent-but-draining work
pub struct MisalignedEnergyDetector;

impl MisalignedEnergyDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MisalignedEnergyDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryDetector for MisalignedEnergyDetector {
    fn category(&self) -> InsightCategory {
        InsightCategory::MisalignedEnergy
    }

    fn name(&self) -> &'static str {
        "Misaligned Energy"
    }

    fn detect(
        &self,
        profile: &ThemeSignalProfile,
        ctx: &AnalysisContext<'_>,
    ) -> Option<Detection> {
        let own = profile.self_profile.as_ref()?;
        let t = &ctx.config.thresholds.misaligned_energy;

        if own.avg_drain < t.min_drain
            || own.avg_frequency < t.min_frequency
            || own.avg_competence_despite_drain < t.min_competence_despite_drain
        {
            return None;
        }

        if let Some(observed) = &profile.advisor_profile {
            if observed.weighted_competence < t.min_advisor_competence {
                return None;
            }
        }

        let impact_priority = DRAIN_WEIGHT * own.avg_drain + FREQUENCY_WEIGHT * own.avg_frequency;

        let mut detection = Detection::new(impact_priority)
            .with_score("drain", own.avg_drain)
            .with_score("frequency", own.avg_frequency)
            .with_score("competence", own.avg_competence_despite_drain)
            .with_score("impact_priority", impact_priority);
        if let Some(observed) = &profile.advisor_profile {
            detection = detection.with_score("advisor_competence", observed.weighted_competence);
        }

        Some(detection)
    }

    fn narrate(&self, theme: &str, detection: &Detection) -> Narrative {
        let name = display_theme(theme);
        let drain = detection.score("drain").unwrap_or(SCORE_MIN);
        let frequency = detection.score("frequency").unwrap_or(SCORE_MIN);

        let advice = if drain >= 4.5 {
            format!(
                "Treat {} as a cost: talk to your manager about redistributing it.",
                name.to_lowercase()
            )
        } else if frequency >= 4.0 {
            format!(
                "Batch your {} work into fewer, fixed blocks so it stops fragmenting your week.",
                name.to_lowercase()
            )
        } else {
            format!(
                "Pair {} with something that energises you, or schedule recovery after it.",
                name.to_lowercase()
            )
        };

        Narrative {
            title: format!("{} costs you energy", name),
            description: format!(
                "You handle {} competently and often, but it drains you.",
                name.to_lowercase()
            ),
            advice,
        }
    }
}
