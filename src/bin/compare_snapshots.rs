//! Compare two parameter snapshot files and report per-year differences
//!
//! Usage: cargo run --bin compare_snapshots -- --old ppp.old --new ppp.new

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(about = "Diff two parameter snapshot files parameter by parameter, year by year")]
struct Args {
    /// Snapshot with existing parameter values
    #[arg(long, default_value = "ppp.old")]
    old: PathBuf,

    /// Snapshot with newly projected parameter values
    #[arg(long, default_value = "ppp.new")]
    new: PathBuf,
}

/// Parsed snapshot: parameter name -> year -> rendered value
type Snapshot = BTreeMap<String, BTreeMap<i32, String>>;

fn parse_snapshot(text: &str) -> Result<Snapshot> {
    let mut snapshot = Snapshot::new();
    let mut current: Option<String> = None;

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(name) = line
            .strip_prefix("*** ")
            .and_then(|rest| rest.strip_suffix(" ***"))
        {
            current = Some(name.to_string());
            snapshot.entry(name.to_string()).or_default();
        } else if let Some((year, value)) = line.split_once(':') {
            let name = match &current {
                Some(name) => name,
                None => bail!("line {}: value line before any parameter block", lineno + 1),
            };
            let year: i32 = year
                .trim()
                .parse()
                .with_context(|| format!("line {}: bad year '{}'", lineno + 1, year))?;
            snapshot
                .entry(name.clone())
                .or_default()
                .insert(year, value.trim().to_string());
        } else {
            bail!("line {}: unrecognized snapshot line: {}", lineno + 1, line);
        }
    }
    Ok(snapshot)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let old_text = fs::read_to_string(&args.old)
        .with_context(|| format!("reading {}", args.old.display()))?;
    let new_text = fs::read_to_string(&args.new)
        .with_context(|| format!("reading {}", args.new.display()))?;

    let old = parse_snapshot(&old_text)?;
    let new = parse_snapshot(&new_text)?;

    let mut differences = 0usize;

    for (name, new_years) in &new {
        let Some(old_years) = old.get(name) else {
            println!("+ {} (only in {})", name, args.new.display());
            differences += 1;
            continue;
        };
        for (year, new_value) in new_years {
            let old_value = old_years.get(year);
            if old_value != Some(new_value) {
                println!(
                    "{} {}: {} -> {}",
                    name,
                    year,
                    old_value.map(String::as_str).unwrap_or("(none)"),
                    new_value
                );
                differences += 1;
            }
        }
        for year in old_years.keys().filter(|y| !new_years.contains_key(y)) {
            println!("{} {}: dropped", name, year);
            differences += 1;
        }
    }
    for name in old.keys().filter(|n| !new.contains_key(*n)) {
        println!("- {} (only in {})", name, args.old.display());
        differences += 1;
    }

    println!(
        "{} differing values across {} parameters",
        differences,
        new.len()
    );
    Ok(())
}
