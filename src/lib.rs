//! Property Evaluator - Multi-scenario projection engine for rental property investments
//!
//! This library provides:
//! - Year-by-year projections (appreciation, rent, fees, loan amortization)
//! - Conservative / moderate / optimistic scenario variants
//! - Summary KPIs, break-even detection and recommendations
//! - Deterministic narrative evaluations
//! - Batch portfolio runs and persistence-ready records

pub mod assumptions;
pub mod evaluation;
pub mod export;
pub mod projection;
pub mod property;
pub mod scenario;

// Re-export commonly used types
pub use assumptions::{Recommendation, ScenarioAssumption, ScenarioType};
pub use projection::{ProjectionConfig, ProjectionEngine, ScenarioResult, ScenarioSummary, YearRecord};
pub use property::{InputError, PaymentType, ProjectInput};
pub use scenario::ScenarioRunner;

/// Run all three scenarios with the default engine configuration
pub fn run_all_scenarios(input: &ProjectInput) -> [ScenarioResult; 3] {
    ProjectionEngine::default().run_all_scenarios(input)
}
