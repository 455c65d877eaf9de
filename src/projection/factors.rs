//! Inflation factor construction from per-year growth rates

use super::engine::ProjectionConfig;
use crate::error::{ProjectionError, Result};
use std::collections::BTreeMap;

/// Per-year inflation rate series derived from the growth-factor file
///
/// `rates[i]` is the rate applied moving from year `start_year + i` to the
/// next year: value[t+1] = value[t] * (1 + rate[t]).
#[derive(Debug, Clone)]
pub struct InflationRates {
    start_year: i32,
    rates: Vec<f64>,
}

impl InflationRates {
    /// Create a rate series whose first entry applies to `start_year`
    pub fn new(start_year: i32, rates: Vec<f64>) -> Self {
        Self { start_year, rates }
    }

    /// Year the first rate applies to
    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Number of years covered by the series
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Rate for `year`; a year outside the series is a fatal configuration
    /// error (malformed growth-factor input)
    pub fn rate(&self, year: i32) -> Result<f64> {
        let idx = year - self.start_year;
        if idx < 0 || idx as usize >= self.rates.len() {
            return Err(ProjectionError::RateOutOfRange {
                year,
                start_year: self.start_year,
                end_year: self.start_year + self.rates.len() as i32,
            });
        }
        Ok(self.rates[idx as usize])
    }

    /// Compounded multiplier from `prior_year` to `final_year`: the product
    /// of (1 + rate) over every year in `[prior_year, final_year)`
    pub fn final_factor(&self, prior_year: i32, final_year: i32) -> Result<f64> {
        let mut factor = 1.0;
        for year in prior_year..final_year {
            factor *= 1.0 + self.rate(year)?;
        }
        Ok(factor)
    }

    /// Compounded multiplier from `base_year` up to (not including) each year
    /// in `[base_year, final_year)`; the factor for `base_year` itself is 1.0
    pub fn window_factors(&self, base_year: i32, final_year: i32) -> Result<BTreeMap<i32, f64>> {
        let mut factors = BTreeMap::new();
        let mut factor = 1.0;
        for year in base_year..final_year {
            factors.insert(year, factor);
            factor *= 1.0 + self.rate(year)?;
        }
        Ok(factors)
    }
}

/// Both factor structures a projection run needs, computed once per run
#[derive(Debug, Clone)]
pub struct InflationFactors {
    /// Multiplier from the prior year all the way to the final year
    pub final_factor: f64,
    /// Multiplier from the base year to each year in `[base_year, final_year)`
    pub by_year: BTreeMap<i32, f64>,
}

impl InflationFactors {
    /// Build the factors for a projection window
    pub fn build(rates: &InflationRates, config: &ProjectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            final_factor: rates.final_factor(config.prior_year, config.final_year)?,
            by_year: rates.window_factors(config.base_year, config.final_year)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat_rates() -> InflationRates {
        InflationRates::new(2013, vec![0.02; 20])
    }

    #[test]
    fn test_base_year_factor_is_one() {
        let rates = flat_rates();
        let factors = rates.window_factors(2019, 2026).unwrap();
        assert_eq!(factors[&2019], 1.0);
        assert_eq!(factors.len(), 7);
        assert!(!factors.contains_key(&2026));
    }

    #[test]
    fn test_window_factors_compound() {
        let rates = flat_rates();
        let factors = rates.window_factors(2019, 2026).unwrap();
        for year in 2019..2025 {
            assert_relative_eq!(
                factors[&(year + 1)],
                factors[&year] * (1.0 + rates.rate(year).unwrap()),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_window_factors_concrete() {
        // rates 2019: 2%, 2020: 3% => factor for 2021 is 1.02 * 1.03
        let mut series = vec![0.0; 9]; // 2013..=2021
        series[6] = 0.02; // 2019
        series[7] = 0.03; // 2020
        let rates = InflationRates::new(2013, series);

        let factors = rates.window_factors(2019, 2022).unwrap();
        assert_relative_eq!(factors[&2021], 1.02 * 1.03, max_relative = 1e-12);
        assert_relative_eq!(factors[&2020], 1.02, max_relative = 1e-12);
    }

    #[test]
    fn test_final_factor_compounds_full_window() {
        let rates = flat_rates();
        let factor = rates.final_factor(2017, 2026).unwrap();
        assert_relative_eq!(factor, 1.02_f64.powi(9), max_relative = 1e-12);
    }

    #[test]
    fn test_short_series_is_fatal() {
        let rates = InflationRates::new(2013, vec![0.02; 5]); // covers 2013-2017
        let err = rates.final_factor(2017, 2026).unwrap_err();
        assert!(matches!(
            err,
            ProjectionError::RateOutOfRange { year: 2018, .. }
        ));

        let err = rates.window_factors(2019, 2026).unwrap_err();
        assert!(matches!(err, ProjectionError::RateOutOfRange { .. }));
    }

    #[test]
    fn test_build_validates_window() {
        let rates = flat_rates();
        let config = ProjectionConfig {
            prior_year: 2019,
            base_year: 2017,
            final_year: 2026,
            skip: Vec::new(),
        };
        assert!(matches!(
            InflationFactors::build(&rates, &config),
            Err(ProjectionError::InvalidWindow { .. })
        ));
    }
}
