//! Scenario assumptions and decision thresholds

mod scenario;
pub mod thresholds;

pub use scenario::{Multipliers, ScenarioAssumption, ScenarioType, SCENARIO_MULTIPLIERS};
pub use thresholds::Recommendation;
