//! Decision logic behind the evaluation text

use crate::assumptions::thresholds::{
    self, DISTANT_BREAK_EVEN, EXCELLENT_TOTAL_RETURN, NOT_RECOMMENDED_MAX_AVG_RETURN,
    RECOMMENDED_MAX_BREAK_EVEN, RECOMMENDED_MIN_AVG_RETURN,
};
use crate::assumptions::{Recommendation, ScenarioType};
use crate::projection::ScenarioSummary;
use serde::{Deserialize, Serialize};

/// Overall viability tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Viability {
    #[serde(rename = "bon")]
    Good,
    #[serde(rename = "moyen")]
    Average,
    #[serde(rename = "risqué")]
    Risky,
}

impl Viability {
    pub fn classify(avg_annual_return_percent: f64, break_even_year: u32) -> Self {
        if thresholds::is_strong(avg_annual_return_percent, break_even_year) {
            Viability::Good
        } else if thresholds::is_weak(avg_annual_return_percent, break_even_year) {
            Viability::Risky
        } else {
            Viability::Average
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Viability::Good => "bon",
            Viability::Average => "moyen",
            Viability::Risky => "risqué",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    AttractiveAverageReturn,
    QuickBreakEven,
    ExcellentTotalReturn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Concern {
    LowAverageReturn,
    DistantBreakEven,
}

/// Investor temperament the scenario speaks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestorProfile {
    Conservative,
    Balanced,
    Aggressive,
}

impl From<ScenarioType> for InvestorProfile {
    fn from(scenario_type: ScenarioType) -> Self {
        match scenario_type {
            ScenarioType::Conservative => InvestorProfile::Conservative,
            ScenarioType::Moderate => InvestorProfile::Balanced,
            ScenarioType::Optimistic => InvestorProfile::Aggressive,
        }
    }
}

/// Sign of the rental cashflow accumulated over the horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashflowOutlook {
    Positive,
    Neutral,
    Negative,
}

/// Everything the evaluation text states, free of wording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationFacts {
    pub scenario_type: ScenarioType,
    pub horizon_years: u32,
    pub viability: Viability,
    pub recommendation: Recommendation,
    pub strengths: Vec<Strength>,
    pub concerns: Vec<Concern>,
    pub cashflow: CashflowOutlook,
    pub total_net_income: f64,
    /// `None` when break-even is not reached within the horizon
    pub break_even_year: Option<u32>,
    pub total_return_percent: f64,
    pub avg_annual_return_percent: f64,
    pub profile: InvestorProfile,
}

impl EvaluationFacts {
    pub fn from_summary(scenario_type: ScenarioType, summary: &ScenarioSummary, horizon_years: u32) -> Self {
        let avg = summary.avg_annual_return_percent;
        let break_even = summary.break_even_year;

        let mut strengths = Vec::new();
        if avg > RECOMMENDED_MIN_AVG_RETURN {
            strengths.push(Strength::AttractiveAverageReturn);
        }
        if break_even <= RECOMMENDED_MAX_BREAK_EVEN {
            strengths.push(Strength::QuickBreakEven);
        }
        if summary.total_return_percent > EXCELLENT_TOTAL_RETURN {
            strengths.push(Strength::ExcellentTotalReturn);
        }

        let mut concerns = Vec::new();
        if avg < NOT_RECOMMENDED_MAX_AVG_RETURN {
            concerns.push(Concern::LowAverageReturn);
        }
        if break_even > DISTANT_BREAK_EVEN {
            concerns.push(Concern::DistantBreakEven);
        }

        let cashflow = if summary.total_net_income > 0.0 {
            CashflowOutlook::Positive
        } else if summary.total_net_income < 0.0 {
            CashflowOutlook::Negative
        } else {
            CashflowOutlook::Neutral
        };

        Self {
            scenario_type,
            horizon_years,
            viability: Viability::classify(avg, break_even),
            recommendation: summary.recommendation,
            strengths,
            concerns,
            cashflow,
            total_net_income: summary.total_net_income,
            break_even_year: (break_even <= horizon_years).then_some(break_even),
            total_return_percent: summary.total_return_percent,
            avg_annual_return_percent: avg,
            profile: scenario_type.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(avg: f64, total: f64, break_even: u32, net: f64) -> ScenarioSummary {
        ScenarioSummary {
            total_return_percent: total,
            avg_annual_return_percent: avg,
            total_net_income: net,
            final_property_value: 0.0,
            break_even_year: break_even,
            recommendation: Recommendation::from_metrics(avg, break_even),
        }
    }

    #[test]
    fn test_viability_tiers() {
        assert_eq!(Viability::classify(8.5, 5), Viability::Good);
        assert_eq!(Viability::classify(9.0, 9), Viability::Risky);
        assert_eq!(Viability::classify(2.0, 1), Viability::Risky);
        assert_eq!(Viability::classify(5.0, 6), Viability::Average);
        assert_eq!(Viability::classify(8.0, 5), Viability::Average);
    }

    #[test]
    fn test_all_strengths() {
        let facts = EvaluationFacts::from_summary(ScenarioType::Optimistic, &summary(12.0, 120.0, 3, 5_000.0), 10);
        assert_eq!(
            facts.strengths,
            vec![
                Strength::AttractiveAverageReturn,
                Strength::QuickBreakEven,
                Strength::ExcellentTotalReturn
            ]
        );
        assert!(facts.concerns.is_empty());
        assert_eq!(facts.profile, InvestorProfile::Aggressive);
        assert_eq!(facts.break_even_year, Some(3));
        assert_eq!(facts.cashflow, CashflowOutlook::Positive);
    }

    #[test]
    fn test_concerns_and_unreached_break_even() {
        let facts = EvaluationFacts::from_summary(ScenarioType::Conservative, &summary(1.5, 15.0, 11, -2_000.0), 10);
        assert!(facts.strengths.is_empty());
        assert_eq!(facts.concerns, vec![Concern::LowAverageReturn, Concern::DistantBreakEven]);
        assert_eq!(facts.break_even_year, None);
        assert_eq!(facts.viability, Viability::Risky);
        assert_eq!(facts.profile, InvestorProfile::Conservative);
        assert_eq!(facts.cashflow, CashflowOutlook::Negative);
    }

    #[test]
    fn test_distant_break_even_starts_after_year_seven() {
        let facts = EvaluationFacts::from_summary(ScenarioType::Moderate, &summary(5.0, 60.0, 8, 0.0), 12);
        assert_eq!(facts.concerns, vec![Concern::DistantBreakEven]);
        assert_eq!(facts.strengths, vec![Strength::ExcellentTotalReturn]);
        assert_eq!(facts.viability, Viability::Average);
        assert_eq!(facts.cashflow, CashflowOutlook::Neutral);
        assert_eq!(facts.profile, InvestorProfile::Balanced);
    }
}
