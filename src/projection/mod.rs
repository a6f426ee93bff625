//! Year-by-year projection of a property investment

mod amortization;
mod cashflows;
mod engine;
mod irr;
mod state;

pub use amortization::{
    amortized_payment, principal_paid_through, remaining_debt_through, AmortizationSchedule,
    DebtServiceRule, LoanTerms,
};
pub use cashflows::{InitialPosition, ScenarioResult, ScenarioSummary, YearRecord};
pub use engine::{AmortizationMethod, ProjectionConfig, ProjectionEngine};
pub use irr::{calculate_irr, equity_irr};
pub use state::ProjectionState;
