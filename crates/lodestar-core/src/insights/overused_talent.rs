//! Overused Talent Insight
//!
//! Something the subject is skilled at and leans on constantly, but which
//! wears them down. When advisors also commented on the theme they must
//! show at least some burnout concern. Ranked by burnout risk plus usage
//! frequency.

use crate::config::SCORE_MIN;
use crate::themes::ThemeSignalProfile;

use super::engine::{AnalysisContext, CategoryDetector};
use super::types::{display_theme, Detection, InsightCategory, Narrative};

/// Detector for talents used to the point of drain
pub struct OverusedTalentDetector;

impl OverusedTalentDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OverusedTalentDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryDetector for OverusedTalentDetector {
    fn category(&self) -> InsightCategory {
        InsightCategory::OverusedTalent
    }

    fn name(&self) -> &'static str {
        "Overused Talent"
    }

    fn detect(
        &self,
        profile: &ThemeSignalProfile,
        ctx: &AnalysisContext<'_>,
    ) -> Option<Detection> {
        let own = profile.self_profile.as_ref()?;
        let t = &ctx.config.thresholds.overused_talent;

        if own.avg_skill < t.min_self_skill
            || own.avg_drain < t.min_drain
            || own.avg_frequency < t.min_usage_frequency
        {
            return None;
        }

        let advisor_concern = profile
            .advisor_profile
            .as_ref()
            .map(|a| a.weighted_burnout_concern);
        if let Some(concern) = advisor_concern {
            if concern < t.min_advisor_burnout_concern {
                return None;
            }
        }

        let burnout_risk = match advisor_concern {
            Some(concern) => (own.avg_drain + concern) / 2.0,
            None => own.avg_drain,
        };

        let mut detection = Detection::new(burnout_risk + own.avg_frequency)
            .with_score("skill", own.avg_skill)
            .with_score("drain", own.avg_drain)
            .with_score("usage_frequency", own.avg_frequency)
            .with_score("burnout_risk", burnout_risk);
        if let Some(concern) = advisor_concern {
            detection = detection.with_score("advisor_burnout_concern", concern);
        }

        Some(detection)
    }

    fn narrate(&self, theme: &str, detection: &Detection) -> Narrative {
        let name = display_theme(theme);
        let risk = detection.score("burnout_risk").unwrap_or(SCORE_MIN);

        let advice = if risk >= 4.0 {
            format!(
                "Hand off or share part of the {} load now, before it costs you the parts you enjoy.",
                name.to_lowercase()
            )
        } else if detection.score("advisor_burnout_concern").is_some() {
            format!(
                "Your advisors have noticed the strain. Agree with them which {} requests you will decline.",
                name.to_lowercase()
            )
        } else {
            format!(
                "Set a limit on how often you reach for {} and track how you feel afterwards.",
                name.to_lowercase()
            )
        };

        Narrative {
            title: format!("{} may be overused", name),
            description: format!(
                "You are good at {} and use it constantly, but it is draining you.",
                name.to_lowercase()
            ),
            advice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::lexicon::Lexicon;
    use crate::test_utils::{advisor_profile, self_profile};
    use crate::themes::SelfProfile;

    fn detect(profile: &ThemeSignalProfile) -> Option<Detection> {
        let config = EngineConfig::default();
        let lexicon = Lexicon::builtin().unwrap();
        let ctx = AnalysisContext::new(&config, &lexicon);
        OverusedTalentDetector::new().detect(profile, &ctx)
    }

    fn overused_self() -> SelfProfile {
        let mut own = self_profile();
        own.avg_skill = 4.0;
        own.avg_drain = 3.5;
        own.avg_frequency = 4.0;
        own
    }

    #[test]
    fn test_self_only_qualifies() {
        let profile = ThemeSignalProfile {
            theme: "firefighting".into(),
            self_profile: Some(overused_self()),
            advisor_profile: None,
        };
        let detection = detect(&profile).unwrap();
        assert_eq!(detection.score("burnout_risk"), Some(3.5));
        assert_eq!(detection.composite, 7.5);
    }

    #[test]
    fn test_advisor_concern_blends_into_risk() {
        let mut observed = advisor_profile();
        observed.weighted_burnout_concern = 4.5;
        let profile = ThemeSignalProfile {
            theme: "firefighting".into(),
            self_profile: Some(overused_self()),
            advisor_profile: Some(observed),
        };
        let detection = detect(&profile).unwrap();
        assert_eq!(detection.score("burnout_risk"), Some(4.0));
        assert_eq!(detection.composite, 8.0);
    }

    #[test]
    fn test_low_advisor_concern_blocks() {
        let mut observed = advisor_profile();
        observed.weighted_burnout_concern = 1.5;
        let profile = ThemeSignalProfile {
            theme: "firefighting".into(),
            self_profile: Some(overused_self()),
            advisor_profile: Some(observed),
        };
        assert!(detect(&profile).is_none());
    }

    #[test]
    fn test_infrequent_use_does_not_qualify() {
        let mut own = overused_self();
        own.avg_frequency = 3.0;
        let profile = ThemeSignalProfile {
            theme: "firefighting".into(),
            self_profile: Some(own),
            advisor_profile: None,
        };
        assert!(detect(&profile).is_none());
    }

    #[test]
    fn test_requires_self_profile() {
        let profile = ThemeSignalProfile {
            theme: "firefighting".into(),
            self_profile: None,
            advisor_profile: Some(advisor_profile()),
        };
        assert!(detect(&profile).is_none());
    }
}
