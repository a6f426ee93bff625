//! Persistence records and CSV output for projection results

mod record;
mod writer;

pub use record::{PersistedSummary, ScenarioResultRecord};
pub use writer::{write_portfolio_summary_csv, write_yearly_csv};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
