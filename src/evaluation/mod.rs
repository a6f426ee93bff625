//! Narrative evaluation of a scenario summary
//!
//! Decisions are taken once into [`EvaluationFacts`]; [`render`] only turns
//! those facts into text.

mod facts;
mod render;

pub use facts::{CashflowOutlook, Concern, EvaluationFacts, InvestorProfile, Strength, Viability};
pub use render::render;

use crate::assumptions::ScenarioType;
use crate::projection::ScenarioSummary;

/// Deterministic prose evaluation of one scenario
pub fn generate(scenario_type: ScenarioType, summary: &ScenarioSummary, project_duration_years: u32) -> String {
    let facts = EvaluationFacts::from_summary(scenario_type, summary, project_duration_years);
    render(&facts)
}
