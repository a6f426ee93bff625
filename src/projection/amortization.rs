//! Fixed-rate loan amortization

use crate::property::ProjectInput;
use serde::{Deserialize, Serialize};

/// Principal, rate and term of the acquisition loan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanTerms {
    pub principal: f64,
    /// Annual nominal rate (%)
    pub annual_rate_percent: f64,
    pub term_months: u32,
}

impl LoanTerms {
    /// Cash purchases carry an empty loan whatever the financing fields hold
    pub fn from_input(input: &ProjectInput) -> Self {
        if !input.is_financed() {
            return Self::none();
        }
        Self {
            principal: input.loan_amount(),
            annual_rate_percent: input.interest_rate_percent,
            term_months: input.loan_duration_years.saturating_mul(12),
        }
    }

    pub fn none() -> Self {
        Self { principal: 0.0, annual_rate_percent: 0.0, term_months: 0 }
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / 12.0
    }

    pub fn monthly_payment(&self) -> f64 {
        payment_for(self.principal, self.monthly_rate(), self.term_months)
    }
}

/// Level monthly payment repaying `principal` over `loan_duration_years`.
///
/// `M = P * r(1+r)^n / ((1+r)^n - 1)` with `r` the monthly rate. A zero rate
/// falls back to straight-line `P / n`; an empty loan or term pays nothing.
pub fn amortized_payment(principal: f64, annual_rate_percent: f64, loan_duration_years: u32) -> f64 {
    payment_for(
        principal,
        annual_rate_percent / 100.0 / 12.0,
        loan_duration_years.saturating_mul(12),
    )
}

fn payment_for(principal: f64, monthly_rate: f64, months: u32) -> f64 {
    if principal == 0.0 || months == 0 {
        return 0.0;
    }
    if monthly_rate == 0.0 {
        return principal / months as f64;
    }
    let growth = (1.0 + monthly_rate).powi(months as i32);
    principal * (monthly_rate * growth) / (growth - 1.0)
}

/// How payments behave once the loan term is over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtServiceRule {
    /// Twelve payments are charged every projection year and the schedule
    /// keeps running for `year * 12` months
    #[default]
    EveryYear,
    /// Payments stop at the end of the term and no more than the
    /// outstanding balance is repaid
    StopAtTerm,
}

impl DebtServiceRule {
    fn scheduled_months(&self, terms: &LoanTerms, years: u32) -> u32 {
        let months = years.saturating_mul(12);
        match self {
            DebtServiceRule::EveryYear => months,
            DebtServiceRule::StopAtTerm => months.min(terms.term_months),
        }
    }

    /// Principal portion of one scheduled payment
    fn principal_portion(&self, balance: f64, payment: f64, monthly_rate: f64) -> f64 {
        let principal = payment - balance * monthly_rate;
        match self {
            DebtServiceRule::EveryYear => principal,
            DebtServiceRule::StopAtTerm => principal.min(balance),
        }
    }
}

/// Principal repaid after `years` full years, re-simulated from month 0
pub fn principal_paid_through(terms: &LoanTerms, payment: f64, years: u32, rule: DebtServiceRule) -> f64 {
    let months = rule.scheduled_months(terms, years);
    let rate = terms.monthly_rate();

    let mut balance = terms.principal;
    let mut paid = 0.0;
    for _ in 0..months {
        let principal = rule.principal_portion(balance, payment, rate);
        paid += principal;
        balance -= principal;
    }
    paid
}

/// Outstanding debt after `years` full years, never below zero
pub fn remaining_debt_through(terms: &LoanTerms, payment: f64, years: u32, rule: DebtServiceRule) -> f64 {
    outstanding(terms.principal, principal_paid_through(terms, payment, years, rule))
}

fn outstanding(principal: f64, paid: f64) -> f64 {
    (principal - paid).max(0.0)
}

/// Running amortization schedule advanced one year at a time
#[derive(Debug, Clone)]
pub struct AmortizationSchedule {
    terms: LoanTerms,
    rule: DebtServiceRule,
    payment: f64,
    years_elapsed: u32,
    months_elapsed: u32,
    balance: f64,
    principal_paid: f64,
}

impl AmortizationSchedule {
    pub fn new(terms: LoanTerms, rule: DebtServiceRule) -> Self {
        Self {
            terms,
            rule,
            payment: terms.monthly_payment(),
            years_elapsed: 0,
            months_elapsed: 0,
            balance: terms.principal,
            principal_paid: 0.0,
        }
    }

    pub fn monthly_payment(&self) -> f64 {
        self.payment
    }

    /// Outstanding principal, as the loan amount minus principal repaid,
    /// floored at zero
    pub fn remaining_debt(&self) -> f64 {
        outstanding(self.terms.principal, self.principal_paid)
    }

    /// Number of payments charged in year `year` (1-based)
    pub fn payments_in_year(&self, year: u32) -> u32 {
        let before = self.rule.scheduled_months(&self.terms, year.saturating_sub(1));
        self.rule.scheduled_months(&self.terms, year) - before
    }

    /// Total payments charged in year `year`
    pub fn debt_service(&self, year: u32) -> f64 {
        self.payment * self.payments_in_year(year) as f64
    }

    /// Amortize the next twelve scheduled months
    pub fn advance_year(&mut self) {
        let rate = self.terms.monthly_rate();
        self.years_elapsed += 1;
        let target = self.rule.scheduled_months(&self.terms, self.years_elapsed);
        while self.months_elapsed < target {
            let principal = self.rule.principal_portion(self.balance, self.payment, rate);
            self.principal_paid += principal;
            self.balance -= principal;
            self.months_elapsed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn loan(principal: f64, rate: f64, years: u32) -> LoanTerms {
        LoanTerms { principal, annual_rate_percent: rate, term_months: years * 12 }
    }

    #[test]
    fn test_standard_payment() {
        // 200k at 6% over 30 years
        let payment = amortized_payment(200_000.0, 6.0, 30);
        assert_relative_eq!(payment, 1_199.10, epsilon = 0.01);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let payment = amortized_payment(120_000.0, 0.0, 10);
        assert_relative_eq!(payment, 1_000.0);
        assert!(payment.is_finite());
    }

    #[test]
    fn test_empty_loan_pays_nothing() {
        assert_eq!(amortized_payment(0.0, 4.0, 20), 0.0);
        assert_eq!(amortized_payment(100_000.0, 4.0, 0), 0.0);
    }

    #[test]
    fn test_loan_is_repaid_at_term() {
        let terms = loan(150_000.0, 4.5, 15);
        let payment = terms.monthly_payment();
        for rule in [DebtServiceRule::EveryYear, DebtServiceRule::StopAtTerm] {
            let paid = principal_paid_through(&terms, payment, 15, rule);
            assert_abs_diff_eq!(paid, 150_000.0, epsilon = 1e-6);
            assert_abs_diff_eq!(remaining_debt_through(&terms, payment, 15, rule), 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_every_year_rule_keeps_paying_after_term() {
        let terms = loan(150_000.0, 4.5, 15);
        let payment = terms.monthly_payment();
        let at_term = principal_paid_through(&terms, payment, 15, DebtServiceRule::EveryYear);
        let later = principal_paid_through(&terms, payment, 20, DebtServiceRule::EveryYear);
        assert!(later > at_term + 12.0 * payment * 4.0);

        // Overpayment never shows up as negative debt
        assert_eq!(remaining_debt_through(&terms, payment, 20, DebtServiceRule::EveryYear), 0.0);

        let schedule = AmortizationSchedule::new(terms, DebtServiceRule::EveryYear);
        assert_eq!(schedule.payments_in_year(16), 12);
        assert_relative_eq!(schedule.debt_service(16), payment * 12.0);
    }

    #[test]
    fn test_stop_at_term_rule_freezes_after_term() {
        let terms = loan(150_000.0, 4.5, 15);
        let payment = terms.monthly_payment();
        let at_term = principal_paid_through(&terms, payment, 15, DebtServiceRule::StopAtTerm);
        let later = principal_paid_through(&terms, payment, 20, DebtServiceRule::StopAtTerm);
        assert_eq!(at_term, later);
    }

    #[test]
    fn test_first_year_principal() {
        let terms = loan(100_000.0, 0.0, 10);
        let paid = principal_paid_through(&terms, terms.monthly_payment(), 1, DebtServiceRule::EveryYear);
        assert_relative_eq!(paid, 10_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_schedule_matches_recomputation() {
        let terms = loan(212_000.0, 3.9, 20);
        for rule in [DebtServiceRule::EveryYear, DebtServiceRule::StopAtTerm] {
            let mut schedule = AmortizationSchedule::new(terms, rule);
            for year in 1..=25 {
                schedule.advance_year();
                let recomputed = remaining_debt_through(&terms, schedule.monthly_payment(), year, rule);
                assert_eq!(schedule.remaining_debt(), recomputed, "{:?} year {}", rule, year);
                assert!(schedule.remaining_debt() >= 0.0);
            }
        }
    }

    #[test]
    fn test_debt_service_stops_after_term() {
        let terms = LoanTerms { principal: 50_000.0, annual_rate_percent: 3.0, term_months: 18 };
        let schedule = AmortizationSchedule::new(terms, DebtServiceRule::StopAtTerm);
        assert_eq!(schedule.payments_in_year(1), 12);
        assert_eq!(schedule.payments_in_year(2), 6);
        assert_eq!(schedule.payments_in_year(3), 0);
        assert_eq!(schedule.debt_service(3), 0.0);
    }

    #[test]
    fn test_cash_input_has_no_loan() {
        let mut input = ProjectInput::cash(300_000.0, 20_000.0, 2.0, 90.0, 1_400.0, 12, 7.0);
        input.interest_rate_percent = 5.0;
        input.loan_duration_years = 20;
        let terms = LoanTerms::from_input(&input);
        assert_eq!(terms, LoanTerms::none());
        assert_eq!(terms.monthly_payment(), 0.0);
    }
}
