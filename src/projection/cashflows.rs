//! Output structures for scenario projections

use super::irr::equity_irr;
use crate::assumptions::{Recommendation, ScenarioType};
use serde::{Deserialize, Serialize};

/// One simulated year of a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    /// 1-based projection year
    pub year: u32,

    pub property_value: f64,
    pub rental_income: f64,
    pub management_fees: f64,

    /// Rent after fees and debt service
    pub net_income: f64,
    pub cumulative_cashflow: f64,

    /// Gain in net liquidity over the initial outlay (%)
    pub roi_percent: f64,

    /// Property value minus remaining debt
    pub net_liquidity: f64,
    pub remaining_debt: f64,
}

/// Acquisition figures shared by every year of a scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialPosition {
    pub total_investment: f64,
    pub loan_amount: f64,
    pub initial_cash_outlay: f64,
    pub monthly_payment: f64,
}

/// Aggregate KPIs and verdict for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub total_return_percent: f64,
    pub avg_annual_return_percent: f64,
    pub total_net_income: f64,
    pub final_property_value: f64,

    /// First year with positive cumulative cashflow, or `duration + 1`
    pub break_even_year: u32,
    pub recommendation: Recommendation,
}

impl ScenarioSummary {
    /// Reduce a year series to its summary
    pub fn from_yearly(yearly_data: &[YearRecord], initial_cash_outlay: f64) -> Self {
        let duration = yearly_data.len() as u32;
        let total_net_income: f64 = yearly_data.iter().map(|r| r.net_income).sum();

        let final_liquidity = yearly_data.last().map(|r| r.net_liquidity).unwrap_or(0.0);
        let final_property_value = yearly_data.last().map(|r| r.property_value).unwrap_or(0.0);

        let total_return_percent = return_on_outlay(final_liquidity, initial_cash_outlay);
        let avg_annual_return_percent = if duration > 0 {
            total_return_percent / duration as f64
        } else {
            0.0
        };

        let break_even_year = yearly_data
            .iter()
            .find(|r| r.cumulative_cashflow > 0.0)
            .map(|r| r.year)
            .unwrap_or(duration + 1);

        Self {
            total_return_percent,
            avg_annual_return_percent,
            total_net_income,
            final_property_value,
            break_even_year,
            recommendation: Recommendation::from_metrics(avg_annual_return_percent, break_even_year),
        }
    }

    /// Whether break-even happens inside a horizon of `duration` years
    pub fn reaches_break_even(&self, duration: u32) -> bool {
        self.break_even_year <= duration
    }
}

/// Percentage gain of `value` over the outlay; 0 when nothing was put in
pub(crate) fn return_on_outlay(value: f64, initial_cash_outlay: f64) -> f64 {
    if initial_cash_outlay > 0.0 {
        (value - initial_cash_outlay) / initial_cash_outlay * 100.0
    } else {
        0.0
    }
}

/// Complete projection of one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_type: ScenarioType,
    pub position: InitialPosition,
    pub yearly_data: Vec<YearRecord>,
    pub summary: ScenarioSummary,
    pub evaluation_text: String,
}

impl ScenarioResult {
    pub fn duration_years(&self) -> u32 {
        self.yearly_data.len() as u32
    }

    pub fn final_year(&self) -> Option<&YearRecord> {
        self.yearly_data.last()
    }

    /// Annual IRR of the equity cashflows, liquidating at the horizon.
    ///
    /// The outlay goes out at year 0, each year's net income comes in, and
    /// the final year also receives the net liquidity.
    pub fn equity_irr(&self) -> Option<f64> {
        let final_liquidity = self.final_year()?.net_liquidity;
        let incomes: Vec<f64> = self.yearly_data.iter().map(|r| r.net_income).collect();
        equity_irr(self.position.initial_cash_outlay, &incomes, final_liquidity)
    }
}
