//! Core projection engine for yearly scenario simulations

use super::amortization::{remaining_debt_through, DebtServiceRule, LoanTerms};
use super::cashflows::{return_on_outlay, InitialPosition, ScenarioResult, ScenarioSummary, YearRecord};
use super::state::ProjectionState;
use crate::assumptions::{ScenarioAssumption, ScenarioType};
use crate::evaluation;
use crate::property::ProjectInput;
use serde::{Deserialize, Serialize};

/// Configuration for a projection run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// How the remaining debt of each year is obtained
    pub amortization: AmortizationMethod,

    /// Whether loan payments continue past the loan term
    #[serde(default)]
    pub debt_service: DebtServiceRule,
}

/// Strategy for the remaining loan balance; both produce the same series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmortizationMethod {
    /// Carry the balance across years, twelve months per step
    #[default]
    Incremental,
    /// Re-simulate the schedule from month 0 for every year
    Recomputed,
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Project every scenario, in the order conservative, moderate, optimistic.
    ///
    /// The engine does no validation; callers reject bad input beforehand
    /// (see `ProjectInput::validate`).
    pub fn run_all_scenarios(&self, input: &ProjectInput) -> [ScenarioResult; 3] {
        ScenarioType::ALL.map(|scenario_type| self.run_scenario(input, scenario_type))
    }

    /// Project a single scenario
    pub fn run_scenario(&self, input: &ProjectInput, scenario_type: ScenarioType) -> ScenarioResult {
        let assumption = ScenarioAssumption::derive(scenario_type, input);
        let terms = LoanTerms::from_input(input);
        let mut state = ProjectionState::from_input(input, self.config.debt_service);

        let duration = input.project_duration_years;
        let mut yearly_data = Vec::with_capacity(duration as usize);
        for _year in 1..=duration {
            state.advance_year();
            let row = self.calculate_year(input, &assumption, &terms, &mut state);
            yearly_data.push(row);
        }

        let summary = ScenarioSummary::from_yearly(&yearly_data, state.initial_cash_outlay);
        let evaluation_text = evaluation::generate(scenario_type, &summary, duration);

        log::debug!(
            "{} scenario: total return {:.2}%, break-even year {}, {}",
            scenario_type,
            summary.total_return_percent,
            summary.break_even_year,
            summary.recommendation
        );

        ScenarioResult {
            scenario_type,
            position: InitialPosition {
                total_investment: state.total_investment,
                loan_amount: terms.principal,
                initial_cash_outlay: state.initial_cash_outlay,
                monthly_payment: state.schedule.monthly_payment(),
            },
            yearly_data,
            summary,
            evaluation_text,
        }
    }

    /// Figures for the year `state` has just advanced to
    fn calculate_year(
        &self,
        input: &ProjectInput,
        assumption: &ScenarioAssumption,
        terms: &LoanTerms,
        state: &mut ProjectionState,
    ) -> YearRecord {
        let year = state.year;

        // Compounded from the acquisition basis, not chained from last year
        let growth = 1.0 + assumption.annual_appreciation / 100.0;
        let property_value = state.total_investment * growth.powi(year as i32);

        let rental_income = assumption.annual_rental_income();
        let management_fees = rental_income * (input.annual_management_fees_percent / 100.0);
        let debt_service = state.schedule.debt_service(year);
        let net_income = rental_income - management_fees - debt_service;
        let cumulative_cashflow = state.record_net_income(net_income);

        let remaining_debt = match self.config.amortization {
            AmortizationMethod::Incremental => state.schedule.remaining_debt(),
            AmortizationMethod::Recomputed => remaining_debt_through(
                terms,
                state.schedule.monthly_payment(),
                year,
                self.config.debt_service,
            ),
        };

        let net_liquidity = property_value - remaining_debt;
        let roi_percent = return_on_outlay(net_liquidity, state.initial_cash_outlay);

        YearRecord {
            year,
            property_value,
            rental_income,
            management_fees,
            net_income,
            cumulative_cashflow,
            roi_percent,
            net_liquidity,
            remaining_debt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::Recommendation;
    use crate::run_all_scenarios;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn cash_example() -> ProjectInput {
        ProjectInput::cash(250_000.0, 15_000.0, 5.0, 80.0, 1_500.0, 10, 10.0)
    }

    fn financed_example() -> ProjectInput {
        ProjectInput::cash(300_000.0, 20_000.0, 3.0, 95.0, 2_400.0, 20, 8.0).financed(20.0, 3.5, 15)
    }

    #[test]
    fn test_moderate_year_one_cash() {
        let results = run_all_scenarios(&cash_example());
        let moderate = &results[1];
        assert_eq!(moderate.scenario_type, ScenarioType::Moderate);

        let y1 = &moderate.yearly_data[0];
        assert_eq!(y1.year, 1);
        assert_relative_eq!(y1.property_value, 278_250.0, max_relative = 1e-12);
        assert_relative_eq!(y1.rental_income, 14_400.0, max_relative = 1e-12);
        assert_relative_eq!(y1.management_fees, 1_440.0, max_relative = 1e-12);
        assert_relative_eq!(y1.net_income, 12_960.0, max_relative = 1e-12);
        assert_relative_eq!(y1.cumulative_cashflow, -252_040.0, max_relative = 1e-12);
        assert_eq!(y1.remaining_debt, 0.0);
        assert_relative_eq!(y1.net_liquidity, 278_250.0, max_relative = 1e-12);
        assert_relative_eq!(y1.roi_percent, 5.0, max_relative = 1e-9);
    }

    #[test]
    fn test_cash_example_never_breaks_even() {
        let results = run_all_scenarios(&cash_example());
        for result in &results {
            assert_eq!(result.summary.break_even_year, 11, "{}", result.scenario_type);
            assert!(result.yearly_data.iter().all(|r| r.cumulative_cashflow < 0.0));
        }
        let moderate = &results[1].summary;
        assert_relative_eq!(moderate.total_net_income, 129_600.0, max_relative = 1e-12);
        // 1.05^10 growth on 265k, less the 265k outlay
        assert_relative_eq!(moderate.total_return_percent, 62.889_462_677_744, epsilon = 1e-6);
        assert_eq!(moderate.recommendation, Recommendation::NotRecommended);
    }

    #[test]
    fn test_scenarios_in_fixed_order() {
        let results = run_all_scenarios(&financed_example());
        let order: Vec<_> = results.iter().map(|r| r.scenario_type).collect();
        assert_eq!(order, ScenarioType::ALL.to_vec());
    }

    #[test]
    fn test_cash_path_has_no_debt() {
        let mut input = cash_example();
        input.interest_rate_percent = 6.0;
        input.loan_duration_years = 25;
        input.down_payment_percent = 10.0;
        for result in run_all_scenarios(&input) {
            assert_eq!(result.position.initial_cash_outlay, input.total_investment());
            assert_eq!(result.position.loan_amount, 0.0);
            assert!(result.yearly_data.iter().all(|r| r.remaining_debt == 0.0));
        }
    }

    #[test]
    fn test_financed_debt_declines_and_clears() {
        let input = financed_example();
        let results = run_all_scenarios(&input);
        let moderate = &results[1];

        assert_relative_eq!(moderate.position.loan_amount, 256_000.0, max_relative = 1e-12);
        assert_relative_eq!(moderate.position.initial_cash_outlay, 64_000.0, max_relative = 1e-12);

        let debts: Vec<f64> = moderate.yearly_data.iter().map(|r| r.remaining_debt).collect();
        for pair in debts[..15].windows(2) {
            assert!(pair[1] < pair[0]);
        }
        assert_abs_diff_eq!(debts[14], 0.0, epsilon = 1e-6);
        assert!(debts.iter().all(|&d| d >= 0.0));
        assert!(debts[15..].iter().all(|&d| d == 0.0));
    }

    #[test]
    fn test_payments_continue_past_loan_term_by_default() {
        // 15-year loan over a 20-year horizon
        let input = financed_example();
        let moderate = ProjectionEngine::default().run_scenario(&input, ScenarioType::Moderate);
        let annual_payments = moderate.position.monthly_payment * 12.0;

        for row in &moderate.yearly_data {
            assert_relative_eq!(
                row.net_income,
                row.rental_income - row.management_fees - annual_payments,
                max_relative = 1e-12
            );
        }
        let total: f64 = moderate.yearly_data.iter().map(|r| r.net_income).sum();
        assert_relative_eq!(moderate.summary.total_net_income, total);
    }

    #[test]
    fn test_stop_at_term_is_opt_in() {
        let input = financed_example();
        let engine = ProjectionEngine::new(ProjectionConfig {
            debt_service: DebtServiceRule::StopAtTerm,
            ..ProjectionConfig::default()
        });
        let capped = engine.run_scenario(&input, ScenarioType::Moderate);
        let default = ProjectionEngine::default().run_scenario(&input, ScenarioType::Moderate);

        let y16 = &capped.yearly_data[15];
        assert_eq!(y16.net_income, y16.rental_income - y16.management_fees);
        assert!(y16.net_income > default.yearly_data[15].net_income);
        // Same payments while the loan is running
        for (a, b) in capped.yearly_data[..15].iter().zip(&default.yearly_data[..15]) {
            assert_eq!(a.net_income, b.net_income);
            assert_abs_diff_eq!(a.remaining_debt, b.remaining_debt, epsilon = 1e-6);
        }
        assert!(capped.summary.total_net_income > default.summary.total_net_income);
    }

    #[test]
    fn test_financed_net_income_subtracts_annual_payments() {
        let input = financed_example();
        let result = ProjectionEngine::default().run_scenario(&input, ScenarioType::Moderate);
        let payment = result.position.monthly_payment;
        let y1 = &result.yearly_data[0];
        assert_relative_eq!(
            y1.net_income,
            y1.rental_income - y1.management_fees - payment * 12.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(y1.net_liquidity, y1.property_value - y1.remaining_debt);
    }

    #[test]
    fn test_zero_down_payment_guards_roi() {
        let input = cash_example().financed(0.0, 4.0, 20);
        for result in run_all_scenarios(&input) {
            assert_eq!(result.position.initial_cash_outlay, 0.0);
            assert!(result.yearly_data.iter().all(|r| r.roi_percent == 0.0));
            assert_eq!(result.summary.total_return_percent, 0.0);
            assert!(result.summary.avg_annual_return_percent.is_finite());
        }
    }

    #[test]
    fn test_zero_interest_rate_is_finite() {
        let input = cash_example().financed(20.0, 0.0, 10);
        let result = ProjectionEngine::default().run_scenario(&input, ScenarioType::Moderate);
        assert_relative_eq!(result.position.monthly_payment, 212_000.0 / 120.0, max_relative = 1e-12);
        for row in &result.yearly_data {
            assert!(row.remaining_debt.is_finite());
            assert!(row.net_income.is_finite());
        }
        assert_abs_diff_eq!(result.yearly_data[9].remaining_debt, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_strong_property_is_recommended() {
        // Cheap unit with high rent: pays back quickly
        let input = ProjectInput::cash(60_000.0, 0.0, 8.0, 100.0, 1_500.0, 10, 5.0);
        let results = run_all_scenarios(&input);
        let moderate = &results[1].summary;
        assert_eq!(moderate.break_even_year, 4);
        assert!(moderate.avg_annual_return_percent > 8.0);
        assert_eq!(moderate.recommendation, Recommendation::Recommended);
    }

    #[test]
    fn test_optimistic_beats_conservative() {
        let results = run_all_scenarios(&financed_example());
        let conservative = &results[0].summary;
        let optimistic = &results[2].summary;
        assert!(optimistic.final_property_value > conservative.final_property_value);
        assert!(optimistic.total_net_income > conservative.total_net_income);
    }

    #[test]
    fn test_equity_irr_is_available() {
        let results = run_all_scenarios(&cash_example());
        let irr = results[1].equity_irr().unwrap();
        // Rent yield of ~4.9% on top of 5% appreciation
        assert!(irr > 0.05 && irr < 0.15, "irr {}", irr);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_projection_is_deterministic_and_sized(
            price in 10_000u32..2_000_000,
            fees_pct in 0u32..15,
            appreciation_bp in -500i32..1500,
            occupancy in 0u32..101,
            rent in 0u32..10_000,
            duration in 1u32..41,
            financed in proptest::bool::ANY,
            down in 0u32..101,
            rate_bp in 0u32..1200,
            loan_years in 1u32..31
        ) {
            let mut input = ProjectInput::cash(
                price as f64,
                price as f64 * fees_pct as f64 / 100.0,
                appreciation_bp as f64 / 100.0,
                occupancy as f64,
                rent as f64,
                duration,
                8.0,
            );
            if financed {
                input = input.financed(down as f64, rate_bp as f64 / 100.0, loan_years);
            }

            let first = run_all_scenarios(&input);
            let second = run_all_scenarios(&input);
            prop_assert_eq!(&first, &second);

            for (result, expected) in first.iter().zip(ScenarioType::ALL) {
                prop_assert_eq!(result.scenario_type, expected);
                prop_assert_eq!(result.yearly_data.len(), duration as usize);
                prop_assert!(result.summary.break_even_year >= 1);
                prop_assert!(result.summary.break_even_year <= duration + 1);
                prop_assert!(result.summary.total_return_percent.is_finite());
                for (idx, row) in result.yearly_data.iter().enumerate() {
                    prop_assert_eq!(row.year, idx as u32 + 1);
                    prop_assert_eq!(row.net_liquidity, row.property_value - row.remaining_debt);
                    prop_assert!(row.roi_percent.is_finite());
                }
            }
        }

        #[test]
        fn prop_positive_appreciation_is_monotonic(
            price in 10_000u32..2_000_000,
            appreciation_bp in 1i32..2000,
            duration in 2u32..41
        ) {
            let input = ProjectInput::cash(price as f64, 0.0, appreciation_bp as f64 / 100.0, 90.0, 900.0, duration, 6.0);
            for result in run_all_scenarios(&input) {
                for pair in result.yearly_data.windows(2) {
                    prop_assert!(pair[1].property_value > pair[0].property_value);
                }
            }
        }

        #[test]
        fn prop_break_even_sentinel_when_never_positive(
            price in 100_000u32..2_000_000,
            rent in 0u32..200,
            duration in 1u32..31
        ) {
            // Rent too low to recover the outlay within the horizon
            let input = ProjectInput::cash(price as f64, 0.0, 2.0, 100.0, rent as f64, duration, 0.0);
            for result in run_all_scenarios(&input) {
                prop_assert!(result.yearly_data.iter().all(|r| r.cumulative_cashflow <= 0.0));
                prop_assert_eq!(result.summary.break_even_year, duration + 1);
            }
        }

        #[test]
        fn prop_amortization_methods_agree(
            price in 50_000u32..1_500_000,
            down in 0u32..100,
            rate_bp in 0u32..1500,
            loan_years in 1u32..31,
            duration in 1u32..41
        ) {
            let input = ProjectInput::cash(price as f64, 0.0, 3.0, 90.0, 1_200.0, duration, 7.0)
                .financed(down as f64, rate_bp as f64 / 100.0, loan_years);

            for debt_service in [DebtServiceRule::EveryYear, DebtServiceRule::StopAtTerm] {
                let incremental = ProjectionEngine::new(ProjectionConfig {
                    amortization: AmortizationMethod::Incremental,
                    debt_service,
                });
                let recomputed = ProjectionEngine::new(ProjectionConfig {
                    amortization: AmortizationMethod::Recomputed,
                    debt_service,
                });

                for scenario in ScenarioType::ALL {
                    let a = incremental.run_scenario(&input, scenario);
                    let b = recomputed.run_scenario(&input, scenario);
                    let debts_a: Vec<f64> = a.yearly_data.iter().map(|r| r.remaining_debt).collect();
                    let debts_b: Vec<f64> = b.yearly_data.iter().map(|r| r.remaining_debt).collect();
                    prop_assert!(debts_a.iter().all(|&d| d >= 0.0));
                    prop_assert_eq!(debts_a, debts_b);
                }
            }
        }
    }
}
