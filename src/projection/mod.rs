//! Projection core: inflation factors, rounding policies, and the engine

mod engine;
mod factors;
mod rounding;

pub use engine::{ProjectionConfig, ProjectionEngine, ProjectionResult};
pub use factors::{InflationFactors, InflationRates};
pub use rounding::{round_value, Rounding, Stage, VALUE_CAP};
