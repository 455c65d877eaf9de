//! Batch runner for projecting every reverting parameter in a table
//!
//! Pre-loads the parameter table and rate series once, then projects all
//! eligible parameters. Each parameter's projection is independent and pure,
//! so the batch fans out across threads; results come back in sorted name
//! order regardless of scheduling.

use crate::error::Result;
use crate::policy::ParameterTable;
use crate::projection::{InflationRates, ProjectionConfig, ProjectionEngine, ProjectionResult};
use log::{debug, info};
use rayon::prelude::*;

/// Pre-loaded projection runner for a single parameter-table update
pub struct ProjectionRunner {
    table: ParameterTable,
    engine: ProjectionEngine,
}

impl ProjectionRunner {
    /// Create a runner; validates the window and precomputes factors
    pub fn new(
        table: ParameterTable,
        rates: InflationRates,
        config: ProjectionConfig,
    ) -> Result<Self> {
        let engine = ProjectionEngine::new(config, &rates)?;
        Ok(Self { table, engine })
    }

    /// The loaded parameter table
    pub fn table(&self) -> &ParameterTable {
        &self.table
    }

    /// The run's window configuration
    pub fn config(&self) -> &ProjectionConfig {
        self.engine.config()
    }

    /// Sorted names of the parameters this run will project
    pub fn reverting_parameters(&self) -> Vec<String> {
        let config = self.engine.config();
        self.table
            .reverting_parameters(config.final_year, &config.skip)
    }

    /// Project every reverting parameter, in parallel, sorted by name
    pub fn run(&self) -> Result<Vec<ProjectionResult>> {
        let names = self.reverting_parameters();
        info!("projecting {} reverting parameters", names.len());

        let results: Result<Vec<ProjectionResult>> = names
            .par_iter()
            .filter_map(|name| self.table.get(name).map(|record| (name, record)))
            .map(|(name, record)| {
                debug!("projecting {}", name);
                self.engine
                    .project_parameter(name, record, self.table.start_year())
            })
            .collect();
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{ParamRecord, ParamValue, RoundDir};

    fn table() -> ParameterTable {
        let mut table = ParameterTable::new(2013);
        for (name, indexed) in [
            ("_II_em", true),
            ("_SS_Earnings_c", true),
            ("_CTC_c", false),
            ("_II_brk7", true),
        ] {
            table.insert(
                name,
                ParamRecord {
                    indexed,
                    value: (0..14).map(|i| ParamValue::Scalar(1000.0 + i as f64)).collect(),
                    value_yrs: (2013..=2026).collect(),
                    round_to: vec![1.0],
                    round_dir: RoundDir::Default,
                },
            );
        }
        table
    }

    fn rates() -> InflationRates {
        InflationRates::new(2013, vec![0.02; 20])
    }

    #[test]
    fn test_run_projects_only_eligible_parameters() {
        let runner = ProjectionRunner::new(table(), rates(), ProjectionConfig::default()).unwrap();

        // _CTC_c is not indexed; _II_brk7 is in the default skip list
        assert_eq!(
            runner.reverting_parameters(),
            vec!["_II_em", "_SS_Earnings_c"]
        );

        let results = runner.run().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name(), "_II_em");
        assert_eq!(results[1].name(), "_SS_Earnings_c");
        assert!(!results.iter().any(|r| r.name() == "_CTC_c"));
        assert!(!results.iter().any(|r| r.name() == "_II_brk7"));
    }

    #[test]
    fn test_run_covers_full_window() {
        let runner = ProjectionRunner::new(table(), rates(), ProjectionConfig::default()).unwrap();
        let results = runner.run().unwrap();
        for result in &results {
            assert_eq!(result.len(), 10); // 2017..=2026 inclusive
            assert!(result.get(2017).is_some());
            assert!(result.get(2026).is_some());
        }
    }

    #[test]
    fn test_run_is_deterministic() {
        let runner = ProjectionRunner::new(table(), rates(), ProjectionConfig::default()).unwrap();
        let first = runner.run().unwrap();
        let second = runner.run().unwrap();
        assert_eq!(first, second);
    }
}
