//! Row shape of the `scenario_results` table

use super::ExportError;
use crate::assumptions::{Recommendation, ScenarioType};
use crate::projection::{ScenarioResult, YearRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary object stored with each row; field names are shared with
/// existing readers of the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSummary {
    pub avg_annual_return: f64,
    pub total_return: f64,
    pub break_even_year: u32,
    pub recommendation: Recommendation,
    #[serde(default)]
    pub total_net_income: f64,
    #[serde(default)]
    pub final_property_value: f64,
}

/// One persisted scenario result, keyed by `scenario_id` and `scenario_type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResultRecord {
    pub scenario_id: String,
    pub scenario_type: ScenarioType,
    pub summary: PersistedSummary,
    #[serde(default)]
    pub yearly_data: Vec<YearRecord>,
    #[serde(default)]
    pub evaluation_text: String,
    pub created_at: DateTime<Utc>,
}

impl ScenarioResultRecord {
    /// Snapshot a result, stamped with the current time
    pub fn from_result(scenario_id: impl Into<String>, result: &ScenarioResult) -> Self {
        Self::at(scenario_id, result, Utc::now())
    }

    pub fn at(scenario_id: impl Into<String>, result: &ScenarioResult, created_at: DateTime<Utc>) -> Self {
        let summary = &result.summary;
        Self {
            scenario_id: scenario_id.into(),
            scenario_type: result.scenario_type,
            summary: PersistedSummary {
                avg_annual_return: summary.avg_annual_return_percent,
                total_return: summary.total_return_percent,
                break_even_year: summary.break_even_year,
                recommendation: summary.recommendation,
                total_net_income: summary.total_net_income,
                final_property_value: summary.final_property_value,
            },
            yearly_data: result.yearly_data.clone(),
            evaluation_text: result.evaluation_text.clone(),
            created_at,
        }
    }

    /// Rows for all three scenarios of one run
    pub fn from_results(scenario_id: &str, results: &[ScenarioResult]) -> Vec<Self> {
        let now = Utc::now();
        results.iter().map(|r| Self::at(scenario_id, r, now)).collect()
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(json)?)
    }
}
