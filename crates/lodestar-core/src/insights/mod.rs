//! Insight Engine - Strength and Energy Insights
//!
//! Turns aggregated theme profiles into ranked, evidence-backed insights.
//! Each category has its own detector; detectors run independently, so a
//! theme can land in more than one category.
//!
//! ## Insight Categories
//!
//! - **Energising Strength** - Enjoyed, skilled, and recognised by advisors
//! - **Hidden Strength** - Advisors see it, the subject under-rates it
//! - **Overused Talent** - Skilled and constant, but draining
//! - **Aspirational** - High interest and belief, early stage
//! - **Misaligned Energy** - Competent and frequent, but draining
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lodestar_core::insights::{InsightCategory, InsightEngine};
//!
//! let engine = InsightEngine::default();
//! let report = engine.analyze(&self_responses, &advisor_responses);
//! for insight in report.get(InsightCategory::HiddenStrength) {
//!     println!("{}", insight.title);
//! }
//! ```

pub mod aspirational;
pub mod builder;
pub mod energising_strength;
pub mod engine;
pub mod hidden_strength;
pub mod misaligned_energy;
pub mod overused_talent;
pub mod types;

pub use aspirational::AspirationalDetector;
pub use energising_strength::EnergisingStrengthDetector;
pub use engine::{rank, AnalysisContext, CategoryDetector, InsightEngine};
pub use hidden_strength::HiddenStrengthDetector;
pub use misaligned_energy::MisalignedEnergyDetector;
pub use overused_talent::OverusedTalentDetector;
pub use types::{
    display_theme, Detection, InsightCategory, InsightRecord, InsightReport, Narrative,
};
