//! Core engine projecting parameter values across a reversion window

use super::factors::{InflationFactors, InflationRates};
use super::rounding::{round_value, Stage};
use crate::error::{ProjectionError, Result};
use crate::policy::{ParamRecord, ParamValue};
use std::collections::BTreeMap;

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Year immediately preceding the modeled policy regime; source of the
    /// reversion baseline
    pub prior_year: i32,

    /// Last year with authoritative historical parameter values
    pub base_year: i32,

    /// Year in which indexed parameter values revert
    pub final_year: i32,

    /// Parameters never projected regardless of eligibility (statutory
    /// "infinite" ceilings)
    pub skip: Vec<String>,
}

impl ProjectionConfig {
    /// Check the window ordering invariant `prior < base < final`
    pub fn validate(&self) -> Result<()> {
        if self.prior_year >= self.base_year || self.base_year >= self.final_year {
            return Err(ProjectionError::InvalidWindow {
                prior_year: self.prior_year,
                base_year: self.base_year,
                final_year: self.final_year,
            });
        }
        Ok(())
    }
}

impl Default for ProjectionConfig {
    /// Window and skip list matching the bundled parameter file
    fn default() -> Self {
        Self {
            prior_year: 2017,
            base_year: 2019,
            final_year: 2026,
            skip: vec!["_II_brk7".to_string(), "_PT_brk7".to_string()],
        }
    }
}

/// Projected values for one parameter, covering every year in
/// `[prior_year, final_year]` with the same shape as the source parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionResult {
    name: String,
    values: BTreeMap<i32, ParamValue>,
}

impl ProjectionResult {
    /// Parameter name this result belongs to
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Projected (or copied historical) value for `year`
    pub fn get(&self, year: i32) -> Option<&ParamValue> {
        self.values.get(&year)
    }

    /// Iterate over (year, value) pairs in year order
    pub fn iter(&self) -> impl Iterator<Item = (i32, &ParamValue)> {
        self.values.iter().map(|(year, value)| (*year, value))
    }

    /// Number of years covered
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Main projection engine: a validated window plus factors computed once
pub struct ProjectionEngine {
    config: ProjectionConfig,
    factors: InflationFactors,
}

impl ProjectionEngine {
    /// Create an engine, validating the window and precomputing both factor
    /// structures from the rate series
    pub fn new(config: ProjectionConfig, rates: &InflationRates) -> Result<Self> {
        let factors = InflationFactors::build(rates, &config)?;
        Ok(Self { config, factors })
    }

    /// The run's window configuration
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project one parameter across `[prior_year, final_year]`
    ///
    /// Historical years up to the base year are copied verbatim. Years
    /// strictly between base and final grow the base-year value by that
    /// year's window factor. The final year grows the PRIOR-year value by
    /// the full-window factor: the reversion value is pre-reform law
    /// compounded forward, not the reform value carried on.
    pub fn project_parameter(
        &self,
        name: &str,
        record: &ParamRecord,
        start_year: i32,
    ) -> Result<ProjectionResult> {
        record.validate(name, start_year)?;

        let missing = |year: i32| ProjectionError::MissingValue {
            name: name.to_string(),
            year,
        };
        let mut values = BTreeMap::new();

        for year in self.config.prior_year..=self.config.base_year {
            let value = record
                .value_for(year, start_year)
                .ok_or_else(|| missing(year))?;
            values.insert(year, value.clone());
        }

        let bvalue = record
            .value_for(self.config.base_year, start_year)
            .ok_or_else(|| missing(self.config.base_year))?;
        for year in self.config.base_year + 1..self.config.final_year {
            let factor = self.factors.by_year[&year];
            let grown = bvalue.map(|_, v| v * factor);
            values.insert(year, round_value(record, &grown, Stage::Intermediate));
        }

        let pvalue = record
            .value_for(self.config.prior_year, start_year)
            .ok_or_else(|| missing(self.config.prior_year))?;
        let grown = pvalue.map(|_, v| v * self.factors.final_factor);
        values.insert(
            self.config.final_year,
            round_value(record, &grown, Stage::Final),
        );

        Ok(ProjectionResult {
            name: name.to_string(),
            values,
        })
    }
}
