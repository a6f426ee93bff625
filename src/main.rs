//! Property Evaluator CLI
//!
//! Runs the three scenario projections for one property and prints the
//! results, optionally writing the yearly table to CSV.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use property_evaluator::export::write_yearly_csv;
use property_evaluator::projection::{AmortizationMethod, DebtServiceRule};
use property_evaluator::{PaymentType, ProjectInput, ProjectionConfig, ScenarioRunner, ScenarioType};
use std::fs::File;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PaymentArg {
    Cash,
    Financed,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AmortizationArg {
    Incremental,
    Recomputed,
}

#[derive(Debug, Parser)]
#[command(name = "property_evaluator", version, about = "Project a rental property across three market scenarios")]
struct Cli {
    /// JSON file holding a full property input (overrides the field flags)
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long, default_value_t = 250_000.0)]
    purchase_price: f64,

    #[arg(long, default_value_t = 15_000.0)]
    initial_fees: f64,

    /// Yearly appreciation (%)
    #[arg(long, default_value_t = 5.0)]
    appreciation: f64,

    /// Occupancy (%)
    #[arg(long, default_value_t = 80.0)]
    occupancy: f64,

    #[arg(long, default_value_t = 1_500.0)]
    monthly_rent: f64,

    #[arg(long, default_value_t = 10)]
    years: u32,

    /// Management fees (% of rental income)
    #[arg(long, default_value_t = 10.0)]
    management_fees: f64,

    #[arg(long, value_enum, default_value_t = PaymentArg::Cash)]
    payment: PaymentArg,

    /// Down payment (%), financed only
    #[arg(long, default_value_t = 20.0)]
    down_payment: f64,

    /// Annual interest rate (%), financed only
    #[arg(long, default_value_t = 3.5)]
    interest_rate: f64,

    /// Loan duration in years, financed only
    #[arg(long, default_value_t = 20)]
    loan_years: u32,

    /// Only print this scenario (conservative, moderate, optimistic)
    #[arg(long)]
    scenario: Option<String>,

    #[arg(long, value_enum, default_value_t = AmortizationArg::Incremental)]
    amortization: AmortizationArg,

    /// Stop loan payments once the loan term has elapsed
    #[arg(long)]
    stop_payments_at_term: bool,

    /// Write the yearly table of every scenario to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print results as JSON instead of tables
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn project_input(&self) -> Result<ProjectInput> {
        if let Some(path) = &self.input {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            return serde_json::from_reader(file).with_context(|| format!("parsing {}", path.display()));
        }

        Ok(ProjectInput {
            purchase_price: self.purchase_price,
            initial_fees: self.initial_fees,
            annual_appreciation: self.appreciation,
            occupancy_rate: self.occupancy,
            monthly_rent: self.monthly_rent,
            project_duration_years: self.years,
            annual_management_fees_percent: self.management_fees,
            payment_type: match self.payment {
                PaymentArg::Cash => PaymentType::Cash,
                PaymentArg::Financed => PaymentType::Financed,
            },
            down_payment_percent: self.down_payment,
            interest_rate_percent: self.interest_rate,
            loan_duration_years: self.loan_years,
        })
    }

    fn config(&self) -> ProjectionConfig {
        ProjectionConfig {
            amortization: match self.amortization {
                AmortizationArg::Incremental => AmortizationMethod::Incremental,
                AmortizationArg::Recomputed => AmortizationMethod::Recomputed,
            },
            debt_service: if self.stop_payments_at_term {
                DebtServiceRule::StopAtTerm
            } else {
                DebtServiceRule::EveryYear
            },
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let scenario_filter = match cli.scenario.as_deref() {
        Some(name) => match ScenarioType::parse(name) {
            Some(scenario) => Some(scenario),
            None => bail!("unknown scenario '{}'", name),
        },
        None => None,
    };

    let input = cli.project_input()?;
    let runner = ScenarioRunner::with_config(cli.config());
    let results = runner.run_validated(&input).context("invalid property input")?;

    let selected: Vec<_> = results
        .iter()
        .filter(|r| scenario_filter.map_or(true, |s| s == r.scenario_type))
        .cloned()
        .collect();

    if let Some(path) = &cli.csv {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        write_yearly_csv(file, &selected)?;
        log::info!("yearly table written to {}", path.display());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    let position = &results[0].position;
    println!("Property Evaluator v{}", env!("CARGO_PKG_VERSION"));
    println!("==========================\n");
    println!("  Total investment:   {:>14.2}", position.total_investment);
    println!("  Initial cash outlay:{:>14.2}", position.initial_cash_outlay);
    println!("  Loan amount:        {:>14.2}", position.loan_amount);
    println!("  Monthly payment:    {:>14.2}", position.monthly_payment);

    for result in &selected {
        println!("\n--- {} ---", result.scenario_type);
        println!(
            "{:>4} {:>14} {:>12} {:>10} {:>12} {:>14} {:>8} {:>14} {:>14}",
            "Year", "Value", "Rent", "Fees", "Net", "Cumulative", "ROI%", "Liquidity", "Debt"
        );
        println!("{}", "-".repeat(112));
        for row in &result.yearly_data {
            println!(
                "{:>4} {:>14.2} {:>12.2} {:>10.2} {:>12.2} {:>14.2} {:>8.2} {:>14.2} {:>14.2}",
                row.year,
                row.property_value,
                row.rental_income,
                row.management_fees,
                row.net_income,
                row.cumulative_cashflow,
                row.roi_percent,
                row.net_liquidity,
                row.remaining_debt,
            );
        }

        let summary = &result.summary;
        println!("\nSummary:");
        println!("  Total return:       {:.2}%", summary.total_return_percent);
        println!("  Avg annual return:  {:.2}%", summary.avg_annual_return_percent);
        println!("  Total net income:   {:.2}", summary.total_net_income);
        println!("  Final value:        {:.2}", summary.final_property_value);
        if summary.reaches_break_even(result.duration_years()) {
            println!("  Break-even year:    {}", summary.break_even_year);
        } else {
            println!("  Break-even year:    not reached");
        }
        if let Some(irr) = result.equity_irr() {
            println!("  Equity IRR:         {:.2}%", irr * 100.0);
        }
        println!("  Recommendation:     {}", summary.recommendation);
        println!("\n{}", result.evaluation_text);
    }

    Ok(())
}
