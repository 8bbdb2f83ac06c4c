//! Aspirational Insight
//!
//! Strong interest and belief in one's potential, with a current level
//! that is still modest. Ranked by development priority, which weighs
//! interest above potential.

use crate::config::SCORE_MIN;
use crate::themes::ThemeSignalProfile;

use super::engine::{AnalysisContext, CategoryDetector};
use super::types::{display_theme, Detection, InsightCategory, Narrative};

const INTEREST_WEIGHT: f64 = 0.6;
const POTENTIAL_WEIGHT: f64 = 0.4;

/// Detector for growth areas the subject wants to develop
pub struct AspirationalDetector;

impl AspirationalDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AspirationalDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryDetector for AspirationalDetector {
    fn category(&self) -> InsightCategory {
        InsightCategory::Aspirational
    }

    fn name(&self) -> &'static str {
        "Aspirational"
    }

    fn detect(
        &self,
        profile: &ThemeSignalProfile,
        ctx: &AnalysisContext<'_>,
    ) -> Option<Detection> {
        let own = profile.self_profile.as_ref()?;
        let t = &ctx.config.thresholds.aspirational;

        if own.avg_interest < t.min_interest
            || own.avg_current_level > t.max_current_level
            || own.avg_potential < t.min_potential_belief
        {
            return None;
        }

        let advisor_potential = profile
            .advisor_profile
            .as_ref()
            .map(|a| a.weighted_development_potential);
        if let Some(potential) = advisor_potential {
            if potential < t.min_advisor_development_potential {
                return None;
            }
        }

        let belief = match advisor_potential {
            Some(potential) => (own.avg_potential + potential) / 2.0,
            None => own.avg_potential,
        };
        let development_priority = INTEREST_WEIGHT * own.avg_interest + POTENTIAL_WEIGHT * belief;

        let mut detection = Detection::new(development_priority)
            .with_score("interest", own.avg_interest)
            .with_score("current_level", own.avg_current_level)
            .with_score("potential", own.avg_potential)
            .with_score("development_priority", development_priority);
        if let Some(potential) = advisor_potential {
            detection = detection.with_score("advisor_development_potential", potential);
        }

        Some(detection)
    }

    fn narrate(&self, theme: &str, detection: &Detection) -> Narrative {
        let name = display_theme(theme);
        let current = detection.score("current_level").unwrap_or(SCORE_MIN);
        let backed = detection
            .score("advisor_development_potential")
            .is_some_and(|p| p >= 3.5);

        let advice = if current <= 2.0 {
            format!(
                "Start small: pick one course, book or shadowing session on {} in the next month.",
                name.to_lowercase()
            )
        } else if backed {
            format!(
                "Your advisors see potential here too. Ask one of them to sponsor a stretch project in {}.",
                name.to_lowercase()
            )
        } else {
            format!(
                "Find a low-stakes project where you can practise {} and get feedback.",
                name.to_lowercase()
            )
        };

        Narrative {
            title: format!("{} is a growth area you care about", name),
            description: format!(
                "You are drawn to {} and believe you can grow into it, though you are early on.",
                name.to_lowercase()
            ),
            advice,
        }
    }
}
