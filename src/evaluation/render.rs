//! Text template for evaluation facts

use super::facts::{CashflowOutlook, Concern, EvaluationFacts, InvestorProfile, Strength};
use crate::assumptions::{Recommendation, ScenarioType};

/// Render facts into the multi-paragraph evaluation.
///
/// Output is a pure function of `facts`, so identical inputs give
/// byte-identical text.
pub fn render(facts: &EvaluationFacts) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "{} scenario over {} years",
        scenario_title(facts.scenario_type),
        facts.horizon_years
    ));
    lines.push(String::new());

    lines.push(format!("Viability: {}", facts.viability.label()));
    lines.push(format!("Recommendation: {}", recommendation_label(facts.recommendation)));
    lines.push(String::new());

    lines.push("Strengths:".to_string());
    if facts.strengths.is_empty() {
        lines.push("- No notable strength".to_string());
    }
    for strength in &facts.strengths {
        lines.push(format!("- {}", strength_line(*strength, facts)));
    }
    lines.push(String::new());

    lines.push("Concerns:".to_string());
    if facts.concerns.is_empty() {
        lines.push("- No major concern".to_string());
    }
    for concern in &facts.concerns {
        lines.push(format!("- {}", concern_line(*concern, facts)));
    }
    lines.push(String::new());

    lines.push(cashflow_line(facts));
    lines.push(match facts.break_even_year {
        Some(year) => format!("Break-even: reached in year {} of {}.", year, facts.horizon_years),
        None => format!("Break-even: not reached within the {}-year horizon.", facts.horizon_years),
    });
    lines.push(format!(
        "Total return: {:.1}% ({:.1}% per year on average).",
        facts.total_return_percent, facts.avg_annual_return_percent
    ));
    lines.push(String::new());

    lines.push(format!("Investor profile: {}.", profile_label(facts.profile)));

    lines.join("\n")
}

fn scenario_title(scenario_type: ScenarioType) -> &'static str {
    match scenario_type {
        ScenarioType::Conservative => "Conservative",
        ScenarioType::Moderate => "Moderate",
        ScenarioType::Optimistic => "Optimistic",
    }
}

fn recommendation_label(recommendation: Recommendation) -> &'static str {
    match recommendation {
        Recommendation::Recommended => "Recommended",
        Recommendation::Consider => "To consider",
        Recommendation::NotRecommended => "Not recommended",
    }
}

fn strength_line(strength: Strength, facts: &EvaluationFacts) -> String {
    match strength {
        Strength::AttractiveAverageReturn => format!(
            "Attractive average return ({:.1}% per year)",
            facts.avg_annual_return_percent
        ),
        Strength::QuickBreakEven => "Break-even reached quickly".to_string(),
        Strength::ExcellentTotalReturn => {
            format!("Excellent total return ({:.1}%)", facts.total_return_percent)
        }
    }
}

fn concern_line(concern: Concern, facts: &EvaluationFacts) -> String {
    match concern {
        Concern::LowAverageReturn => format!(
            "Low average return ({:.1}% per year)",
            facts.avg_annual_return_percent
        ),
        Concern::DistantBreakEven => "Break-even far away".to_string(),
    }
}

fn cashflow_line(facts: &EvaluationFacts) -> String {
    match facts.cashflow {
        CashflowOutlook::Positive => format!(
            "Cashflow: rent covers fees and debt service, {:.2} of net income over the horizon.",
            facts.total_net_income
        ),
        CashflowOutlook::Neutral => {
            "Cashflow: rent exactly offsets fees and debt service.".to_string()
        }
        CashflowOutlook::Negative => format!(
            "Cashflow: rent does not cover fees and debt service, {:.2} of net income over the horizon.",
            facts.total_net_income
        ),
    }
}

fn profile_label(profile: InvestorProfile) -> &'static str {
    match profile {
        InvestorProfile::Conservative => "conservative profile",
        InvestorProfile::Balanced => "balanced profile",
        InvestorProfile::Aggressive => "aggressive profile",
    }
}
