//! Policy parameter data structures matching the parameter file format

use crate::error::{ProjectionError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// First year covered by the bundled parameter file's value arrays
pub const DEFAULT_START_YEAR: i32 = 2013;

/// A single year's value for one policy parameter
///
/// Scalar parameters (a rate, a wage cap) carry one number per year;
/// parameters that vary by filing status carry one number per status column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Scalar(f64),
    ByStatus(Vec<f64>),
}

impl ParamValue {
    /// Number of columns (1 for scalar parameters)
    pub fn columns(&self) -> usize {
        match self {
            ParamValue::Scalar(_) => 1,
            ParamValue::ByStatus(vs) => vs.len(),
        }
    }

    /// Per-column view of the value regardless of shape
    pub fn components(&self) -> &[f64] {
        match self {
            ParamValue::Scalar(v) => std::slice::from_ref(v),
            ParamValue::ByStatus(vs) => vs,
        }
    }

    /// Apply `f` to every column, preserving shape and column order
    pub fn map<F>(&self, f: F) -> ParamValue
    where
        F: Fn(usize, f64) -> f64,
    {
        match self {
            ParamValue::Scalar(v) => ParamValue::Scalar(f(0, *v)),
            ParamValue::ByStatus(vs) => {
                ParamValue::ByStatus(vs.iter().enumerate().map(|(idx, &v)| f(idx, v)).collect())
            }
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Scalar(v) => write!(f, "{}", v),
            ParamValue::ByStatus(vs) => {
                write!(f, "[")?;
                for (idx, v) in vs.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Rounding rule declared on a parameter
///
/// Parameters with no `round_dir` entry in the parameter file use default
/// rounding: cents for intermediate years, whole units at the reversion year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundDir {
    #[default]
    Default,
    /// Round down to the granularity grid
    Down,
    /// Round to the nearest grid point (midpoint ties round up)
    Nearest,
}

/// One parameter's metadata and value history from the policy parameter file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamRecord {
    /// Whether the parameter is adjusted annually by inflation
    pub indexed: bool,

    /// Value history indexed by `(year - start_year)`
    pub value: Vec<ParamValue>,

    /// Years with an authoritative historical value
    pub value_yrs: BTreeSet<i32>,

    /// Rounding granularity per column; a single entry applies to every column
    pub round_to: Vec<f64>,

    /// Declared rounding rule; absent in the file means default rounding
    #[serde(default)]
    pub round_dir: RoundDir,
}

impl ParamRecord {
    /// Column count of the parameter's values (1 for scalar parameters)
    pub fn columns(&self) -> usize {
        self.value.first().map_or(1, ParamValue::columns)
    }

    /// Value recorded for `year`, given the table's start year
    pub fn value_for(&self, year: i32, start_year: i32) -> Option<&ParamValue> {
        let idx = usize::try_from(year - start_year).ok()?;
        self.value.get(idx)
    }

    /// Granularity for `column`, honoring the single-entry broadcast rule
    pub fn granularity(&self, column: usize) -> f64 {
        if self.round_to.len() == 1 {
            self.round_to[0]
        } else {
            self.round_to[column]
        }
    }

    /// Check shape invariants: consistent column width across years, positive
    /// granularities, and a `round_to` length of 1 or the column count
    pub fn validate(&self, name: &str, start_year: i32) -> Result<()> {
        let columns = self.columns();
        for (idx, v) in self.value.iter().enumerate() {
            if v.columns() != columns {
                return Err(ProjectionError::RaggedColumns {
                    name: name.to_string(),
                    year: start_year + idx as i32,
                    expected: columns,
                    found: v.columns(),
                });
            }
        }
        if self.round_to.len() != 1 && self.round_to.len() != columns {
            return Err(ProjectionError::ShapeMismatch {
                name: name.to_string(),
                columns,
                round_to_len: self.round_to.len(),
            });
        }
        if let Some(&g) = self.round_to.iter().find(|&&g| g <= 0.0) {
            return Err(ProjectionError::InvalidGranularity {
                name: name.to_string(),
                granularity: g,
            });
        }
        Ok(())
    }
}

/// Read-only table of policy parameters keyed by name
///
/// Value arrays in every record are indexed by `(year - start_year)`.
/// Iteration order is sorted by name, which makes report output canonical.
#[derive(Debug, Clone, Default)]
pub struct ParameterTable {
    start_year: i32,
    params: BTreeMap<String, ParamRecord>,
}

impl ParameterTable {
    /// Create an empty table whose value arrays begin at `start_year`
    pub fn new(start_year: i32) -> Self {
        Self {
            start_year,
            params: BTreeMap::new(),
        }
    }

    /// Build a table from already-parsed records
    pub fn from_parts(start_year: i32, params: BTreeMap<String, ParamRecord>) -> Self {
        Self { start_year, params }
    }

    /// First year covered by the table's value arrays
    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Add or replace a parameter record
    pub fn insert(&mut self, name: impl Into<String>, record: ParamRecord) {
        self.params.insert(name.into(), record);
    }

    /// Look up a parameter by name
    pub fn get(&self, name: &str) -> Option<&ParamRecord> {
        self.params.get(name)
    }

    /// Number of parameters in the table
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate over parameters in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamRecord)> {
        self.params.iter()
    }

    /// Validate shape invariants for every record in the table
    pub fn validate(&self) -> Result<()> {
        for (name, record) in &self.params {
            record.validate(name, self.start_year)?;
        }
        Ok(())
    }

    /// Names of parameters whose values revert at `final_year`: indexed, with
    /// an authoritative value recorded at `final_year`, and not in the
    /// caller's skip list (statutory "infinite" ceilings stay fixed by law).
    /// Returned in sorted name order.
    pub fn reverting_parameters(&self, final_year: i32, skip: &[String]) -> Vec<String> {
        self.params
            .iter()
            .filter(|(name, record)| {
                record.indexed
                    && record.value_yrs.contains(&final_year)
                    && !skip.iter().any(|s| s == *name)
            })
            .map(|(name, _)| name.clone())
            .collect()
    }
}
