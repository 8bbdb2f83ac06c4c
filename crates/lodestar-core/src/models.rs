//! Input models: self-reflections and advisor observations
//!
//! These are produced by the collection layer and handed to the engine
//! already validated and tagged. The engine never mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::Result;

/// Reflection domain a self-response was written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    WorkHistory,
    Projects,
    Leadership,
    Learning,
    Relationships,
    Creativity,
    Values,
    Aspirations,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::WorkHistory => "work_history",
            Domain::Projects => "projects",
            Domain::Leadership => "leadership",
            Domain::Learning => "learning",
            Domain::Relationships => "relationships",
            Domain::Creativity => "creativity",
            Domain::Values => "values",
            Domain::Aspirations => "aspirations",
        }
    }

    pub fn all() -> &'static [Domain] {
        &[
            Domain::WorkHistory,
            Domain::Projects,
            Domain::Leadership,
            Domain::Learning,
            Domain::Relationships,
            Domain::Creativity,
            Domain::Values,
            Domain::Aspirations,
        ]
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Domain::all()
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("Unknown domain: {}", s))
    }
}

/// How long an advisor has observed the subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationPeriod {
    #[serde(rename = "less_than_1_month")]
    LessThanOneMonth,
    #[serde(rename = "1_6_months")]
    OneToSixMonths,
    #[serde(rename = "6_months_1_year")]
    SixMonthsToOneYear,
    #[serde(rename = "1_3_years")]
    OneToThreeYears,
    #[serde(rename = "more_than_3_years")]
    MoreThanThreeYears,
}

impl ObservationPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObservationPeriod::LessThanOneMonth => "less_than_1_month",
            ObservationPeriod::OneToSixMonths => "1_6_months",
            ObservationPeriod::SixMonthsToOneYear => "6_months_1_year",
            ObservationPeriod::OneToThreeYears => "1_3_years",
            ObservationPeriod::MoreThanThreeYears => "more_than_3_years",
        }
    }

    /// Trust factor for how long the advisor has known the subject
    pub fn factor(&self) -> f64 {
        match self {
            ObservationPeriod::LessThanOneMonth => 0.4,
            ObservationPeriod::OneToSixMonths => 0.6,
            ObservationPeriod::SixMonthsToOneYear => 0.8,
            ObservationPeriod::OneToThreeYears => 0.9,
            ObservationPeriod::MoreThanThreeYears => 1.0,
        }
    }
}

impl fmt::Display for ObservationPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ObservationPeriod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "less_than_1_month" => Ok(ObservationPeriod::LessThanOneMonth),
            "1_6_months" => Ok(ObservationPeriod::OneToSixMonths),
            "6_months_1_year" => Ok(ObservationPeriod::SixMonthsToOneYear),
            "1_3_years" => Ok(ObservationPeriod::OneToThreeYears),
            "more_than_3_years" => Ok(ObservationPeriod::MoreThanThreeYears),
            _ => Err(format!("Unknown observation period: {}", s)),
        }
    }
}

/// How sure the advisor said they were about their observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceContext {
    Uncertain,
    Somewhat,
    Confident,
    VeryConfident,
}

impl ConfidenceContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceContext::Uncertain => "uncertain",
            ConfidenceContext::Somewhat => "somewhat",
            ConfidenceContext::Confident => "confident",
            ConfidenceContext::VeryConfident => "very_confident",
        }
    }

    pub fn factor(&self) -> f64 {
        match self {
            ConfidenceContext::Uncertain => 0.5,
            ConfidenceContext::Somewhat => 0.75,
            ConfidenceContext::Confident => 0.9,
            ConfidenceContext::VeryConfident => 1.0,
        }
    }
}

impl fmt::Display for ConfidenceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConfidenceContext {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "uncertain" => Ok(ConfidenceContext::Uncertain),
            "somewhat" => Ok(ConfidenceContext::Somewhat),
            "confident" => Ok(ConfidenceContext::Confident),
            "very_confident" => Ok(ConfidenceContext::VeryConfident),
            _ => Err(format!("Unknown confidence context: {}", s)),
        }
    }
}

/// Default credibility weight for an advisor observation, in `[0, 1]`
///
/// Callers that already carry a weight from elsewhere should keep it; the
/// engine treats `AdvisorResponse::credibility_weight` as opaque.
pub fn credibility_weight(period: ObservationPeriod, context: ConfidenceContext) -> f64 {
    (period.factor() * context.factor()).clamp(0.0, 1.0)
}

/// A first-person reflection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub text: String,
    pub domain: Domain,
    #[serde(default)]
    pub theme_tags: BTreeSet<String>,
    pub timestamp: DateTime<Utc>,
}

impl Response {
    pub fn new(text: impl Into<String>, domain: Domain) -> Self {
        Self {
            text: text.into(),
            domain,
            theme_tags: BTreeSet::new(),
            timestamp: Utc::now(),
        }
    }

    /// Attach a theme tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.theme_tags.insert(tag.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// A third-party observation about the subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorResponse {
    pub text: String,
    #[serde(default)]
    pub theme_tags: BTreeSet<String>,
    /// Pre-computed trust multiplier in `[0, 1]`
    pub credibility_weight: f64,
    pub observation_period: ObservationPeriod,
    pub confidence_context: ConfidenceContext,
}

impl AdvisorResponse {
    /// Create an observation weighted by [`credibility_weight`]
    pub fn new(
        text: impl Into<String>,
        observation_period: ObservationPeriod,
        confidence_context: ConfidenceContext,
    ) -> Self {
        Self {
            text: text.into(),
            theme_tags: BTreeSet::new(),
            credibility_weight: credibility_weight(observation_period, confidence_context),
            observation_period,
            confidence_context,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.theme_tags.insert(tag.into());
        self
    }

    /// Override the derived weight with an externally supplied one
    pub fn with_credibility(mut self, weight: f64) -> Self {
        self.credibility_weight = weight;
        self
    }
}

/// The complete input to one analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseSet {
    #[serde(default)]
    pub self_responses: Vec<Response>,
    #[serde(default)]
    pub advisor_responses: Vec<AdvisorResponse>,
}

impl ResponseSet {
    pub fn new(self_responses: Vec<Response>, advisor_responses: Vec<AdvisorResponse>) -> Self {
        Self {
            self_responses,
            advisor_responses,
        }
    }

    /// Load a response set from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn is_empty(&self) -> bool {
        self.self_responses.is_empty() && self.advisor_responses.is_empty()
    }
}
