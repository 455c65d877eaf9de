//! Load parameter tables and growth factors from policy source files

use super::data::{ParamRecord, ParameterTable};
use crate::error::{ProjectionError, Result};
use crate::projection::InflationRates;
use log::info;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default path to the bundled policy parameter file
pub const DEFAULT_PARAMS_PATH: &str = "data/policy_params.json";

/// Default path to the bundled growth-factor file
pub const DEFAULT_GROWFACTORS_PATH: &str = "data/growfactors.csv";

/// Load a parameter table from a JSON file
///
/// The file is a flat map from parameter name to record; `start_year` is the
/// year of each record's first value-array entry. Shape invariants are
/// checked up front so a malformed table fails before any output is written.
pub fn load_parameter_table<P: AsRef<Path>>(path: P, start_year: i32) -> Result<ParameterTable> {
    let file = File::open(path)?;
    load_parameter_table_from_reader(file, start_year)
}

/// Load a parameter table from any reader (e.g., string buffer)
pub fn load_parameter_table_from_reader<R: Read>(
    reader: R,
    start_year: i32,
) -> Result<ParameterTable> {
    let params: BTreeMap<String, ParamRecord> = serde_json::from_reader(reader)?;
    let table = ParameterTable::from_parts(start_year, params);
    table.validate()?;
    info!("loaded {} policy parameters", table.len());
    Ok(table)
}

/// Load the bundled parameter file from its default location
pub fn load_default_parameters() -> Result<ParameterTable> {
    load_parameter_table(DEFAULT_PARAMS_PATH, super::DEFAULT_START_YEAR)
}

/// Raw CSV row matching the growth-factor file columns
#[derive(Debug, serde::Deserialize)]
struct GrowthFactorRow {
    #[serde(rename = "YEAR")]
    year: i32,
    #[serde(rename = "ACPIU")]
    acpiu: f64,
}

/// Load per-year inflation rates from a growth-factor CSV file
///
/// Each row carries a year and its CPI multiplier; the inflation rate for a
/// year is the multiplier minus one. Rows must cover consecutive years.
pub fn load_growth_factors<P: AsRef<Path>>(path: P) -> Result<InflationRates> {
    let file = File::open(path)?;
    load_growth_factors_from_reader(file)
}

/// Load growth factors from any reader (e.g., string buffer)
pub fn load_growth_factors_from_reader<R: Read>(reader: R) -> Result<InflationRates> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut start_year = None;
    let mut rates = Vec::new();

    for result in csv_reader.deserialize() {
        let row: GrowthFactorRow = result?;
        let start = *start_year.get_or_insert(row.year);
        let expected = start + rates.len() as i32;
        if row.year != expected {
            return Err(ProjectionError::NonContiguousYears {
                expected,
                found: row.year,
            });
        }
        rates.push(row.acpiu - 1.0);
    }

    let start_year = start_year.unwrap_or_default();
    info!(
        "loaded {} inflation rates starting at {}",
        rates.len(),
        start_year
    );
    Ok(InflationRates::new(start_year, rates))
}

/// Load the bundled growth-factor file from its default location
pub fn load_default_growth_factors() -> Result<InflationRates> {
    load_growth_factors(DEFAULT_GROWFACTORS_PATH)
}
