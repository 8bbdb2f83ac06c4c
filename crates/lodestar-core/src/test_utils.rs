//! Test utilities for lodestar-core
//!
//! Response and profile fixtures shared by unit tests here and by the CLI
//! tests (via the `test-utils` feature).

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{
    AdvisorResponse, ConfidenceContext, Domain, ObservationPeriod, Response, ResponseSet,
};
use crate::themes::{AdvisorProfile, SelfProfile};

/// A fixed instant so record IDs are reproducible in tests
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// A self-response in the projects domain carrying `tags`
pub fn self_response(text: &str, tags: &[&str]) -> Response {
    tags.iter().fold(
        Response::new(text, Domain::Projects).with_timestamp(fixed_time()),
        |r, t| r.with_tag(*t),
    )
}

/// An advisor response carrying `tags` with an explicit credibility weight
pub fn advisor_response(text: &str, tags: &[&str], weight: f64) -> AdvisorResponse {
    tags.iter().fold(
        AdvisorResponse::new(
            text,
            ObservationPeriod::OneToThreeYears,
            ConfidenceContext::Confident,
        )
        .with_credibility(weight),
        |r, t| r.with_tag(*t),
    )
}

/// A self profile sitting at every dimension's baseline, with no evidence
pub fn self_profile() -> SelfProfile {
    SelfProfile {
        avg_energy: 2.5,
        avg_skill: 2.5,
        avg_confidence: 3.0,
        avg_drain: 2.5,
        avg_frequency: 2.5,
        avg_interest: 2.5,
        avg_current_level: 2.5,
        avg_potential: 3.0,
        avg_competence_despite_drain: 3.0,
        frequency: 1,
        evidence: Vec::new(),
    }
}

/// An advisor profile at baseline from one fully credible advisor
pub fn advisor_profile() -> AdvisorProfile {
    AdvisorProfile {
        weighted_recognition: 3.0,
        weighted_competence: 3.0,
        weighted_burnout_concern: 2.5,
        weighted_development_potential: 3.0,
        frequency: 1,
        total_credibility: 1.0,
        evidence: Vec::new(),
    }
}

/// A realistic response set touching every category
pub fn sample_response_set() -> ResponseSet {
    let self_responses = vec![
        Response::new(
            "I love facilitating workshops; I am in my element. I am excellent at it \
             and skilled at keeping the room focused. \
             I feel confident leading the team through hard conversations.",
            Domain::Leadership,
        )
        .with_tag("Facilitation")
        .with_timestamp(fixed_time()),
        Response::new(
            "Running the retro is something I love and enjoy, and I am good at it; people leave energised.",
            Domain::Relationships,
        )
        .with_tag("facilitation")
        .with_timestamp(fixed_time()),
        Response::new(
            "I am an expert at firefighting incidents, excellent under pressure and good at it. \
             I always get pulled in, every day, and I deliver, but it is draining and exhausting.",
            Domain::WorkHistory,
        )
        .with_tag("firefighting")
        .with_tag("incident response")
        .with_timestamp(fixed_time()),
        Response::new(
            "I want to move into product strategy one day. I dream of owning a roadmap and I am curious about pricing. \
             I am a beginner but a quick learner and I believe I can grow.",
            Domain::Aspirations,
        )
        .with_tag("Product Strategy")
        .with_timestamp(fixed_time()),
        Response::new("Untagged thoughts about my week.", Domain::Values)
            .with_timestamp(fixed_time()),
    ];

    let advisor_responses = vec![
        AdvisorResponse::new(
            "Always excellent with people; everyone relies on their facilitation.",
            ObservationPeriod::MoreThanThreeYears,
            ConfidenceContext::VeryConfident,
        )
        .with_tag("facilitation"),
        AdvisorResponse::new(
            "An expert negotiator, consistently outstanding with vendors.",
            ObservationPeriod::OneToThreeYears,
            ConfidenceContext::Confident,
        )
        .with_tag("negotiation"),
        AdvisorResponse::new(
            "They are stretched thin and overloaded with incidents, though brilliant at them.",
            ObservationPeriod::SixMonthsToOneYear,
            ConfidenceContext::Somewhat,
        )
        .with_tag("firefighting"),
        AdvisorResponse::new(
            "Promising strategic thinker with real potential.",
            ObservationPeriod::OneToSixMonths,
            ConfidenceContext::Confident,
        )
        .with_tag("product_strategy"),
    ];

    ResponseSet::new(self_responses, advisor_responses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::{InsightCategory, InsightEngine};

    #[test]
    fn test_sample_set_covers_categories() {
        let engine = InsightEngine::default();
        let report = engine.analyze_set(&sample_response_set());

        assert!(report.contains(InsightCategory::EnergisingStrength, "facilitation"));
        assert!(report.contains(InsightCategory::HiddenStrength, "negotiation"));
        assert!(report.contains(InsightCategory::OverusedTalent, "firefighting"));
        assert!(report.contains(InsightCategory::MisalignedEnergy, "firefighting"));
        assert!(report.contains(InsightCategory::Aspirational, "product_strategy"));
    }
}
