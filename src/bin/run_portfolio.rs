//! Run projections for a whole portfolio of properties
//!
//! Reads properties from CSV, projects every scenario in parallel and writes
//! one summary row per property and scenario.
//! Accepts config via environment variables:
//!   PORTFOLIO_INPUT (default: portfolio.csv)
//!   PORTFOLIO_OUTPUT (default: portfolio_summary.csv)
//!   PORTFOLIO_AMORTIZATION (incremental | recomputed)
//!   PORTFOLIO_DEBT_SERVICE (every_year | stop_at_term)

use anyhow::{bail, Context, Result};
use property_evaluator::export::write_portfolio_summary_csv;
use property_evaluator::projection::{AmortizationMethod, DebtServiceRule};
use property_evaluator::property::load_projects;
use property_evaluator::{ProjectionConfig, Recommendation, ScenarioRunner, ScenarioType};
use std::env;
use std::fs::File;
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::init();

    let input_path = env::var("PORTFOLIO_INPUT").unwrap_or_else(|_| "portfolio.csv".to_string());
    let output_path = env::var("PORTFOLIO_OUTPUT").unwrap_or_else(|_| "portfolio_summary.csv".to_string());
    let amortization = match env::var("PORTFOLIO_AMORTIZATION").ok().as_deref() {
        None | Some("incremental") => AmortizationMethod::Incremental,
        Some("recomputed") => AmortizationMethod::Recomputed,
        Some(other) => bail!("unknown PORTFOLIO_AMORTIZATION '{}'", other),
    };
    let debt_service = match env::var("PORTFOLIO_DEBT_SERVICE").ok().as_deref() {
        None | Some("every_year") => DebtServiceRule::EveryYear,
        Some("stop_at_term") => DebtServiceRule::StopAtTerm,
        Some(other) => bail!("unknown PORTFOLIO_DEBT_SERVICE '{}'", other),
    };

    let start = Instant::now();
    println!("Loading properties from {}...", input_path);
    let projects = load_projects(&input_path).with_context(|| format!("loading {}", input_path))?;
    println!("Loaded {} properties in {:?}", projects.len(), start.elapsed());

    let runner = ScenarioRunner::with_config(ProjectionConfig {
        amortization,
        debt_service,
    });
    let proj_start = Instant::now();
    let batch = runner.run_portfolio(&projects);
    println!("Projections complete in {:?}", proj_start.elapsed());

    for (property_id, err) in &batch.rejected {
        println!("  Skipped property {}: {}", property_id, err);
    }

    let file = File::create(&output_path).with_context(|| format!("creating {}", output_path))?;
    write_portfolio_summary_csv(file, &batch.projections)?;
    println!("Output written to {}", output_path);

    println!("\nPortfolio Summary (moderate scenario):");
    let moderate: Vec<_> = batch
        .projections
        .iter()
        .map(|p| &p.scenarios[ScenarioType::Moderate as usize].summary)
        .collect();
    let count = |rec: Recommendation| moderate.iter().filter(|s| s.recommendation == rec).count();
    println!("  Recommended:     {}", count(Recommendation::Recommended));
    println!("  To consider:     {}", count(Recommendation::Consider));
    println!("  Not recommended: {}", count(Recommendation::NotRecommended));
    if !moderate.is_empty() {
        let mean = moderate.iter().map(|s| s.avg_annual_return_percent).sum::<f64>() / moderate.len() as f64;
        println!("  Mean avg annual return: {:.2}%", mean);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
