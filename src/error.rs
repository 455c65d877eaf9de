//! Error types for parameter projection

use thiserror::Error;

/// Errors surfaced while loading inputs or projecting parameter values
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// Year window violates `prior_year < base_year < final_year`
    #[error("invalid projection window: prior={prior_year} base={base_year} final={final_year}")]
    InvalidWindow {
        prior_year: i32,
        base_year: i32,
        final_year: i32,
    },

    /// Growth-factor series has no rate for a year the window requires
    #[error("no inflation rate for year {year}: series covers [{start_year}, {end_year})")]
    RateOutOfRange {
        year: i32,
        start_year: i32,
        end_year: i32,
    },

    /// `round_to` length is neither 1 nor the parameter's column count
    #[error("parameter '{name}' has {columns} value columns but {round_to_len} rounding granularities")]
    ShapeMismatch {
        name: String,
        columns: usize,
        round_to_len: usize,
    },

    /// Multi-column value arrays must have the same width in every year
    #[error("parameter '{name}' has {found} columns in year {year}, expected {expected}")]
    RaggedColumns {
        name: String,
        year: i32,
        expected: usize,
        found: usize,
    },

    /// Rounding granularities must be positive
    #[error("parameter '{name}' has non-positive rounding granularity {granularity}")]
    InvalidGranularity { name: String, granularity: f64 },

    /// No historical value recorded for a year the projection must copy
    #[error("parameter '{name}' has no value for year {year}")]
    MissingValue { name: String, year: i32 },

    /// Growth-factor rows must cover consecutive years with no gaps
    #[error("growth-factor rows must be contiguous by year: expected {expected}, found {found}")]
    NonContiguousYears { expected: i32, found: i32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parameter file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("growth-factor file error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
