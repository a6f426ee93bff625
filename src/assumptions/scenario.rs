//! Fixed market adjustments for the three projection scenarios

use crate::property::ProjectInput;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three scenario variants, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioType {
    Conservative,
    Moderate,
    Optimistic,
}

impl ScenarioType {
    /// Every scenario in the order results are produced
    pub const ALL: [ScenarioType; 3] = [
        ScenarioType::Conservative,
        ScenarioType::Moderate,
        ScenarioType::Optimistic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioType::Conservative => "conservative",
            ScenarioType::Moderate => "moderate",
            ScenarioType::Optimistic => "optimistic",
        }
    }

    /// Multipliers applied to the market-sensitive inputs
    pub fn multipliers(&self) -> Multipliers {
        SCENARIO_MULTIPLIERS[*self as usize].1
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "conservative" => Some(ScenarioType::Conservative),
            "moderate" => Some(ScenarioType::Moderate),
            "optimistic" => Some(ScenarioType::Optimistic),
            _ => None,
        }
    }
}

impl fmt::Display for ScenarioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// (appreciation, occupancy, rent)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Multipliers {
    pub appreciation: f64,
    pub occupancy: f64,
    pub rent: f64,
}

/// Lookup table indexed by `ScenarioType as usize`
pub const SCENARIO_MULTIPLIERS: [(ScenarioType, Multipliers); 3] = [
    (
        ScenarioType::Conservative,
        Multipliers { appreciation: 0.8, occupancy: 0.85, rent: 0.9 },
    ),
    (
        ScenarioType::Moderate,
        Multipliers { appreciation: 1.0, occupancy: 1.0, rent: 1.0 },
    ),
    (
        ScenarioType::Optimistic,
        Multipliers { appreciation: 1.2, occupancy: 1.1, rent: 1.15 },
    ),
];

/// Market assumptions for one scenario, derived from the caller's input.
///
/// Management fees and financing terms are shared by all scenarios and are
/// read directly from `ProjectInput`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAssumption {
    pub scenario_type: ScenarioType,
    pub appreciation_multiplier: f64,
    pub occupancy_multiplier: f64,
    pub rent_multiplier: f64,

    /// Adjusted yearly appreciation (%)
    pub annual_appreciation: f64,
    /// Adjusted occupancy (%)
    pub occupancy_rate: f64,
    /// Adjusted monthly rent
    pub monthly_rent: f64,
}

impl ScenarioAssumption {
    pub fn derive(scenario_type: ScenarioType, input: &ProjectInput) -> Self {
        let m = scenario_type.multipliers();
        Self {
            scenario_type,
            appreciation_multiplier: m.appreciation,
            occupancy_multiplier: m.occupancy,
            rent_multiplier: m.rent,
            annual_appreciation: input.annual_appreciation * m.appreciation,
            occupancy_rate: input.occupancy_rate * m.occupancy,
            monthly_rent: input.monthly_rent * m.rent,
        }
    }

    /// Gross yearly rent after vacancy
    pub fn annual_rental_income(&self) -> f64 {
        self.monthly_rent * 12.0 * (self.occupancy_rate / 100.0)
    }
}
