//! Running state carried across the year loop of one scenario

use super::amortization::{AmortizationSchedule, DebtServiceRule, LoanTerms};
use crate::property::ProjectInput;

/// State of an investment at the end of a simulated year
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current projection year (0 before the first step)
    pub year: u32,

    /// Purchase price plus fees, the basis for appreciation
    pub total_investment: f64,

    /// Equity put in at acquisition
    pub initial_cash_outlay: f64,

    /// Net cashflow since acquisition, seeded at minus the outlay
    pub cumulative_cashflow: f64,

    /// Loan balance advanced alongside the years
    pub schedule: AmortizationSchedule,
}

impl ProjectionState {
    /// Year-0 position for a property
    pub fn from_input(input: &ProjectInput, rule: DebtServiceRule) -> Self {
        let initial_cash_outlay = input.initial_cash_outlay();
        Self {
            year: 0,
            total_investment: input.total_investment(),
            initial_cash_outlay,
            cumulative_cashflow: -initial_cash_outlay,
            schedule: AmortizationSchedule::new(LoanTerms::from_input(input), rule),
        }
    }

    /// Move to the next year and amortize its twelve payments
    pub fn advance_year(&mut self) {
        self.year += 1;
        self.schedule.advance_year();
    }

    /// Add the year's net income to the running cashflow
    pub fn record_net_income(&mut self, net_income: f64) -> f64 {
        self.cumulative_cashflow += net_income;
        self.cumulative_cashflow
    }
}
