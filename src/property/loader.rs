//! Load property portfolios from CSV

use super::{PaymentType, ProjectInput};
use csv::Reader;
use std::path::Path;
use thiserror::Error;

/// Errors raised while reading a portfolio file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("property {property_id}: unknown payment type '{value}'")]
    UnknownPaymentType { property_id: u32, value: String },
}

/// A property identifier paired with its projection inputs
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyProject {
    pub property_id: u32,
    pub input: ProjectInput,
}

/// Raw CSV row matching the portfolio export columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "PropertyID")]
    property_id: u32,
    #[serde(rename = "PurchasePrice")]
    purchase_price: f64,
    #[serde(rename = "InitialFees")]
    initial_fees: f64,
    #[serde(rename = "AnnualAppreciation")]
    annual_appreciation: f64,
    #[serde(rename = "OccupancyRate")]
    occupancy_rate: f64,
    #[serde(rename = "MonthlyRent")]
    monthly_rent: f64,
    #[serde(rename = "DurationYears")]
    project_duration_years: u32,
    #[serde(rename = "ManagementFees")]
    management_fees_percent: f64,
    #[serde(rename = "PaymentType")]
    payment_type: String,
    // Financing columns are blank for cash purchases
    #[serde(rename = "DownPayment", default)]
    down_payment_percent: Option<f64>,
    #[serde(rename = "InterestRate", default)]
    interest_rate_percent: Option<f64>,
    #[serde(rename = "LoanDuration", default)]
    loan_duration_years: Option<u32>,
}

impl CsvRow {
    fn into_project(self) -> Result<PropertyProject, LoadError> {
        let payment_type = match self.payment_type.trim().to_ascii_lowercase().as_str() {
            "cash" => PaymentType::Cash,
            "financed" | "loan" => PaymentType::Financed,
            _ => {
                return Err(LoadError::UnknownPaymentType {
                    property_id: self.property_id,
                    value: self.payment_type,
                })
            }
        };

        Ok(PropertyProject {
            property_id: self.property_id,
            input: ProjectInput {
                purchase_price: self.purchase_price,
                initial_fees: self.initial_fees,
                annual_appreciation: self.annual_appreciation,
                occupancy_rate: self.occupancy_rate,
                monthly_rent: self.monthly_rent,
                project_duration_years: self.project_duration_years,
                annual_management_fees_percent: self.management_fees_percent,
                payment_type,
                down_payment_percent: self.down_payment_percent.unwrap_or(0.0),
                interest_rate_percent: self.interest_rate_percent.unwrap_or(0.0),
                loan_duration_years: self.loan_duration_years.unwrap_or(0),
            },
        })
    }
}

/// Load all properties from a CSV file
pub fn load_projects<P: AsRef<Path>>(path: P) -> Result<Vec<PropertyProject>, LoadError> {
    let reader = Reader::from_path(path)?;
    collect_rows(reader)
}

/// Load properties from any reader (e.g., string buffer, request body)
pub fn load_projects_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<PropertyProject>, LoadError> {
    collect_rows(Reader::from_reader(reader))
}

fn collect_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<PropertyProject>, LoadError> {
    let mut projects = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        projects.push(row.into_project()?);
    }
    log::debug!("loaded {} properties", projects.len());
    Ok(projects)
}
