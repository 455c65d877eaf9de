//! Policy parameter projection CLI
//!
//! Calculates future values of inflation-indexed policy parameters and writes
//! a before/after snapshot pair for auditing a parameter-table update. Run it
//! when the growth-factor file changes or when the last known historical
//! parameter values are updated (in which case the base year advances).

use anyhow::{Context, Result};
use clap::Parser;
use policy_projection::policy::loader::{self, DEFAULT_GROWFACTORS_PATH, DEFAULT_PARAMS_PATH};
use policy_projection::policy::DEFAULT_START_YEAR;
use policy_projection::{report, ProjectionConfig, ProjectionRunner};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(about = "Project inflation-indexed policy parameter values to their reversion year")]
struct Args {
    /// Policy parameter file (JSON map of name -> record)
    #[arg(long, default_value = DEFAULT_PARAMS_PATH)]
    params: PathBuf,

    /// Growth-factor file (CSV with YEAR and ACPIU columns)
    #[arg(long, default_value = DEFAULT_GROWFACTORS_PATH)]
    growfactors: PathBuf,

    /// Year of the first entry in each parameter's value array
    #[arg(long, default_value_t = DEFAULT_START_YEAR)]
    start_year: i32,

    /// Year preceding the modeled policy regime (reversion baseline)
    #[arg(long, default_value_t = 2017)]
    prior_year: i32,

    /// Last year with known historical parameter values
    #[arg(long, default_value_t = 2019)]
    base_year: i32,

    /// Year in which parameter values revert
    #[arg(long, default_value_t = 2026)]
    final_year: i32,

    /// Parameter names to skip (defaults to the statutory 9e99 ceilings)
    #[arg(long, value_delimiter = ',', default_values_t = ["_II_brk7".to_string(), "_PT_brk7".to_string()])]
    skip: Vec<String>,

    /// Output file for existing parameter values
    #[arg(long, default_value = "ppp.old")]
    old: PathBuf,

    /// Output file for newly projected parameter values
    #[arg(long, default_value = "ppp.new")]
    new: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let table = loader::load_parameter_table(&args.params, args.start_year)
        .with_context(|| format!("loading parameter file {}", args.params.display()))?;
    let rates = loader::load_growth_factors(&args.growfactors)
        .with_context(|| format!("loading growth-factor file {}", args.growfactors.display()))?;

    let config = ProjectionConfig {
        prior_year: args.prior_year,
        base_year: args.base_year,
        final_year: args.final_year,
        skip: args.skip,
    };
    let runner = ProjectionRunner::new(table, rates, config)?;

    let names = runner.reverting_parameters();
    println!("number_of_reverting_parameters= {}", names.len());

    let mut old = BufWriter::new(
        File::create(&args.old)
            .with_context(|| format!("creating {}", args.old.display()))?,
    );
    report::write_history(&mut old, runner.table(), &names, runner.config())?;
    old.flush()?;

    let results = runner.run()?;
    let mut new = BufWriter::new(
        File::create(&args.new)
            .with_context(|| format!("creating {}", args.new.display()))?,
    );
    report::write_projection(&mut new, &results)?;
    new.flush()?;

    println!("old values written to: {}", args.old.display());
    println!("new values written to: {}", args.new.display());
    Ok(())
}
