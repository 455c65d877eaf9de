//! Snapshot report emission
//!
//! Writes the before/after parameter listings used to audit a parameter-table
//! update: one labeled block per parameter, one `year: value` line per year.

use crate::error::Result;
use crate::policy::ParameterTable;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};
use std::io::Write;

/// Write the historical snapshot: each parameter's recorded values for every
/// year in `[prior_year, final_year]`, straight from the table
pub fn write_history<W: Write>(
    writer: &mut W,
    table: &ParameterTable,
    names: &[String],
    config: &ProjectionConfig,
) -> Result<()> {
    for name in names {
        writeln!(writer, "*** {} ***", name)?;
        let record = match table.get(name) {
            Some(record) => record,
            None => continue,
        };
        for year in config.prior_year..=config.final_year {
            if let Some(value) = record.value_for(year, table.start_year()) {
                writeln!(writer, "{}: {}", year, value)?;
            }
        }
    }
    Ok(())
}

/// Write the projected snapshot: the same structural format, with values for
/// years past the base year taken from the projection results
pub fn write_projection<W: Write>(writer: &mut W, results: &[ProjectionResult]) -> Result<()> {
    for result in results {
        writeln!(writer, "*** {} ***", result.name())?;
        for (year, value) in result.iter() {
            writeln!(writer, "{}: {}", year, value)?;
        }
    }
    Ok(())
}

/// Project every name in `names` and write the projected snapshot
pub fn write_projection_for<W: Write>(
    writer: &mut W,
    table: &ParameterTable,
    names: &[String],
    engine: &ProjectionEngine,
) -> Result<()> {
    let mut results = Vec::with_capacity(names.len());
    for name in names {
        if let Some(record) = table.get(name) {
            results.push(engine.project_parameter(name, record, table.start_year())?);
        }
    }
    write_projection(writer, &results)
}
