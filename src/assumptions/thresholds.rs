//! Calibration constants for the recommendation and viability verdicts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Average annual return (%) a scenario must exceed to be recommended
pub const RECOMMENDED_MIN_AVG_RETURN: f64 = 8.0;

/// Latest break-even year for a recommended scenario
pub const RECOMMENDED_MAX_BREAK_EVEN: u32 = 5;

/// Average annual return (%) below which a scenario is not recommended
pub const NOT_RECOMMENDED_MAX_AVG_RETURN: f64 = 3.0;

/// Break-even years beyond this make a scenario not recommended
pub const NOT_RECOMMENDED_MIN_BREAK_EVEN: u32 = 8;

/// Total return (%) flagged as excellent
pub const EXCELLENT_TOTAL_RETURN: f64 = 50.0;

/// Break-even years beyond this are flagged as distant
pub const DISTANT_BREAK_EVEN: u32 = 7;

/// Verdict attached to each scenario summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Recommended,
    Consider,
    NotRecommended,
}

impl Recommendation {
    /// `Recommended` is checked first; the two outer rules overlap
    /// (e.g. 9% with break-even in year 9) and the order decides.
    pub fn from_metrics(avg_annual_return_percent: f64, break_even_year: u32) -> Self {
        if is_strong(avg_annual_return_percent, break_even_year) {
            Recommendation::Recommended
        } else if is_weak(avg_annual_return_percent, break_even_year) {
            Recommendation::NotRecommended
        } else {
            Recommendation::Consider
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Recommended => "recommended",
            Recommendation::Consider => "consider",
            Recommendation::NotRecommended => "not_recommended",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn is_strong(avg_annual_return_percent: f64, break_even_year: u32) -> bool {
    avg_annual_return_percent > RECOMMENDED_MIN_AVG_RETURN
        && break_even_year <= RECOMMENDED_MAX_BREAK_EVEN
}

pub(crate) fn is_weak(avg_annual_return_percent: f64, break_even_year: u32) -> bool {
    avg_annual_return_percent < NOT_RECOMMENDED_MAX_AVG_RETURN
        || break_even_year > NOT_RECOMMENDED_MIN_BREAK_EVEN
}
