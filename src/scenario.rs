//! Scenario runner for batch projections
//!
//! Holds one engine configuration and runs it over single properties or
//! whole portfolios.

use crate::property::{InputError, ProjectInput, PropertyProject};
use crate::projection::{ProjectionConfig, ProjectionEngine, ScenarioResult};
use rayon::prelude::*;

/// Results of the three scenarios for one property
#[derive(Debug, Clone)]
pub struct PropertyProjection {
    pub property_id: u32,
    pub scenarios: [ScenarioResult; 3],
}

/// Batch outcome: projections plus the properties rejected at validation
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub projections: Vec<PropertyProjection>,
    pub rejected: Vec<(u32, InputError)>,
}

/// Pre-configured runner for batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let results = runner.run_validated(&input)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Runner with the default projection configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
        }
    }

    /// Run all scenarios without validating the input
    pub fn run(&self, input: &ProjectInput) -> [ScenarioResult; 3] {
        self.engine.run_all_scenarios(input)
    }

    /// Validate the input, then run all scenarios
    pub fn run_validated(&self, input: &ProjectInput) -> Result<[ScenarioResult; 3], InputError> {
        input.validate()?;
        Ok(self.run(input))
    }

    /// Run many properties in parallel; results keep the input order
    pub fn run_batch(&self, inputs: &[ProjectInput]) -> Vec<[ScenarioResult; 3]> {
        inputs.par_iter().map(|input| self.run(input)).collect()
    }

    /// Validate and project a portfolio, setting invalid properties aside
    pub fn run_portfolio(&self, projects: &[PropertyProject]) -> BatchOutcome {
        let outcomes: Vec<Result<PropertyProjection, (u32, InputError)>> = projects
            .par_iter()
            .map(|project| {
                self.run_validated(&project.input)
                    .map(|scenarios| PropertyProjection {
                        property_id: project.property_id,
                        scenarios,
                    })
                    .map_err(|err| (project.property_id, err))
            })
            .collect();

        let mut batch = BatchOutcome::default();
        for outcome in outcomes {
            match outcome {
                Ok(projection) => batch.projections.push(projection),
                Err((property_id, err)) => {
                    log::warn!("skipping property {}: {}", property_id, err);
                    batch.rejected.push((property_id, err));
                }
            }
        }

        log::info!(
            "projected {} properties, {} rejected",
            batch.projections.len(),
            batch.rejected.len()
        );
        batch
    }
}
