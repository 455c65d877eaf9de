//! Policy parameter table: domain types and file loaders

mod data;
pub mod loader;

pub use data::{ParamRecord, ParamValue, ParameterTable, RoundDir, DEFAULT_START_YEAR};
pub use loader::{
    load_default_growth_factors, load_default_parameters, load_growth_factors,
    load_parameter_table,
};
