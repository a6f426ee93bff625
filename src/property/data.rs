//! Property acquisition economics supplied by the caller

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the acquisition is paid for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    /// Paid in full, no loan
    #[default]
    Cash,
    /// Down payment plus an amortizing loan
    Financed,
}

/// Acquisition and market assumptions for one property
///
/// Percentages are plain numbers: `5.0` means 5%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    /// Purchase price of the property
    pub purchase_price: f64,

    /// Notary, agency and other acquisition fees
    #[serde(default)]
    pub initial_fees: f64,

    /// Expected yearly value growth (%)
    pub annual_appreciation: f64,

    /// Expected share of the year the unit is rented (%)
    pub occupancy_rate: f64,

    /// Monthly rent at full occupancy
    pub monthly_rent: f64,

    /// Simulation horizon in years
    pub project_duration_years: u32,

    /// Share of gross rental income retained by the manager (%)
    #[serde(default)]
    pub annual_management_fees_percent: f64,

    #[serde(default)]
    pub payment_type: PaymentType,

    /// Only meaningful when financed (%)
    #[serde(default)]
    pub down_payment_percent: f64,

    /// Annual nominal rate, only meaningful when financed (%)
    #[serde(default)]
    pub interest_rate_percent: f64,

    /// Only meaningful when financed
    #[serde(default)]
    pub loan_duration_years: u32,
}

/// Rejections raised at the input boundary, before the engine runs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("purchase price must be positive, got {0}")]
    NonPositivePurchasePrice(f64),

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("project duration must be at least one year")]
    ZeroDuration,

    #[error("down payment must be between 0 and 100%, got {0}")]
    DownPaymentOutOfRange(f64),

    #[error("financed purchase requires a loan duration of at least one year")]
    ZeroLoanDuration,
}

impl ProjectInput {
    /// Cash purchase with no financing terms
    pub fn cash(
        purchase_price: f64,
        initial_fees: f64,
        annual_appreciation: f64,
        occupancy_rate: f64,
        monthly_rent: f64,
        project_duration_years: u32,
        annual_management_fees_percent: f64,
    ) -> Self {
        Self {
            purchase_price,
            initial_fees,
            annual_appreciation,
            occupancy_rate,
            monthly_rent,
            project_duration_years,
            annual_management_fees_percent,
            payment_type: PaymentType::Cash,
            down_payment_percent: 0.0,
            interest_rate_percent: 0.0,
            loan_duration_years: 0,
        }
    }

    /// Switch to a financed purchase with the given loan terms
    pub fn financed(
        mut self,
        down_payment_percent: f64,
        interest_rate_percent: f64,
        loan_duration_years: u32,
    ) -> Self {
        self.payment_type = PaymentType::Financed;
        self.down_payment_percent = down_payment_percent;
        self.interest_rate_percent = interest_rate_percent;
        self.loan_duration_years = loan_duration_years;
        self
    }

    /// Purchase price plus acquisition fees
    pub fn total_investment(&self) -> f64 {
        self.purchase_price + self.initial_fees
    }

    pub fn is_financed(&self) -> bool {
        self.payment_type == PaymentType::Financed
    }

    /// Loan principal; zero for cash purchases whatever the financing fields hold
    pub fn loan_amount(&self) -> f64 {
        match self.payment_type {
            PaymentType::Cash => 0.0,
            PaymentType::Financed => {
                self.total_investment() * (1.0 - self.down_payment_percent / 100.0)
            }
        }
    }

    /// Equity the investor puts in at acquisition
    pub fn initial_cash_outlay(&self) -> f64 {
        match self.payment_type {
            PaymentType::Cash => self.total_investment(),
            PaymentType::Financed => self.total_investment() * self.down_payment_percent / 100.0,
        }
    }

    /// Boundary checks the engine itself does not perform.
    ///
    /// Business plausibility (occupancy above 100%, negative appreciation)
    /// is left to the caller.
    pub fn validate(&self) -> Result<(), InputError> {
        let numeric = [
            ("purchase price", self.purchase_price),
            ("initial fees", self.initial_fees),
            ("annual appreciation", self.annual_appreciation),
            ("occupancy rate", self.occupancy_rate),
            ("monthly rent", self.monthly_rent),
            ("management fees", self.annual_management_fees_percent),
            ("down payment", self.down_payment_percent),
            ("interest rate", self.interest_rate_percent),
        ];
        for (field, value) in numeric {
            if !value.is_finite() {
                return Err(InputError::NotFinite { field });
            }
        }

        if self.purchase_price <= 0.0 {
            return Err(InputError::NonPositivePurchasePrice(self.purchase_price));
        }
        if self.initial_fees < 0.0 {
            return Err(InputError::Negative { field: "initial fees", value: self.initial_fees });
        }
        if self.monthly_rent < 0.0 {
            return Err(InputError::Negative { field: "monthly rent", value: self.monthly_rent });
        }
        if self.project_duration_years == 0 {
            return Err(InputError::ZeroDuration);
        }

        if self.is_financed() {
            if !(0.0..=100.0).contains(&self.down_payment_percent) {
                return Err(InputError::DownPaymentOutOfRange(self.down_payment_percent));
            }
            if self.loan_duration_years == 0 {
                return Err(InputError::ZeroLoanDuration);
            }
        }

        Ok(())
    }
}
