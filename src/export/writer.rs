//! CSV writers for yearly tables and portfolio summaries

use super::ExportError;
use crate::projection::ScenarioResult;
use crate::scenario::PropertyProjection;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct YearlyCsvRow {
    scenario: &'static str,
    year: u32,
    property_value: f64,
    rental_income: f64,
    management_fees: f64,
    net_income: f64,
    cumulative_cashflow: f64,
    roi_percent: f64,
    net_liquidity: f64,
    remaining_debt: f64,
}

#[derive(Serialize)]
struct SummaryCsvRow {
    property_id: u32,
    scenario: &'static str,
    total_return_percent: f64,
    avg_annual_return_percent: f64,
    total_net_income: f64,
    final_property_value: f64,
    break_even_year: u32,
    recommendation: &'static str,
    equity_irr_percent: Option<f64>,
}

/// Year-by-year table for each scenario, one row per scenario and year
pub fn write_yearly_csv<W: Write>(writer: W, results: &[ScenarioResult]) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for result in results {
        for r in &result.yearly_data {
            csv.serialize(YearlyCsvRow {
                scenario: result.scenario_type.as_str(),
                year: r.year,
                property_value: r.property_value,
                rental_income: r.rental_income,
                management_fees: r.management_fees,
                net_income: r.net_income,
                cumulative_cashflow: r.cumulative_cashflow,
                roi_percent: r.roi_percent,
                net_liquidity: r.net_liquidity,
                remaining_debt: r.remaining_debt,
            })?;
        }
    }
    csv.flush()?;
    Ok(())
}

/// One summary row per property and scenario
pub fn write_portfolio_summary_csv<W: Write>(
    writer: W,
    projections: &[PropertyProjection],
) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for projection in projections {
        for result in &projection.scenarios {
            let summary = &result.summary;
            csv.serialize(SummaryCsvRow {
                property_id: projection.property_id,
                scenario: result.scenario_type.as_str(),
                total_return_percent: summary.total_return_percent,
                avg_annual_return_percent: summary.avg_annual_return_percent,
                total_net_income: summary.total_net_income,
                final_property_value: summary.final_property_value,
                break_even_year: summary.break_even_year,
                recommendation: summary.recommendation.as_str(),
                equity_irr_percent: result.equity_irr().map(|r| r * 100.0),
            })?;
        }
    }
    csv.flush()?;
    Ok(())
}
