//! Rounding policies applied to projected parameter values

use crate::policy::{ParamRecord, ParamValue, RoundDir};

/// Numeric cap representing "no limit" in the parameter table; every rounded
/// value is clamped to at most this sentinel
pub const VALUE_CAP: f64 = 9e99;

/// Rounding applied to a single projected number
///
/// `Down` and `Nearest` snap to the parameter's granularity grid. `Cents`
/// and `Whole` are the two halves of default rounding, used for parameters
/// that declare no rounding direction: cents for intermediate years, whole
/// units at the reversion year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rounding {
    /// Round down to the granularity grid
    Down { granularity: f64 },
    /// Round to the nearest grid point; exact midpoints keep the ceiling
    Nearest { granularity: f64 },
    /// Round to two decimal places
    Cents,
    /// Round to zero decimal places
    Whole,
}

impl Rounding {
    /// Apply this rounding to `value`, clamping the result to [`VALUE_CAP`]
    pub fn apply(self, value: f64) -> f64 {
        let rounded = match self {
            Rounding::Down { granularity } => (value / granularity).floor() * granularity,
            Rounding::Nearest { granularity } => {
                let mut rounded = (value / granularity).ceil() * granularity;
                let remainder = value % granularity;
                // Correct the ceiling only for strict lower-half remainders;
                // an exact midpoint keeps the ceiling (ties round up)
                if remainder > 0.0 && remainder < granularity / 2.0 {
                    rounded -= granularity;
                }
                rounded
            }
            Rounding::Cents => (value * 100.0).round() / 100.0,
            Rounding::Whole => value.round(),
        };
        rounded.min(VALUE_CAP)
    }
}

/// Which stage of the projection a value belongs to; only default-rounded
/// parameters distinguish the two
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// A year strictly between the base year and the final year
    Intermediate,
    /// The reversion year itself
    Final,
}

/// Round every column of `value` per the record's declared rounding rule
///
/// Grid-rounded parameters select the matching per-column granularity (a
/// single `round_to` entry applies to every column); default-rounded
/// parameters use cent precision for intermediate years and whole units at
/// the reversion year. The record's shape must have been validated.
pub fn round_value(record: &ParamRecord, value: &ParamValue, stage: Stage) -> ParamValue {
    value.map(|column, v| {
        let rounding = match record.round_dir {
            RoundDir::Down => Rounding::Down {
                granularity: record.granularity(column),
            },
            RoundDir::Nearest => Rounding::Nearest {
                granularity: record.granularity(column),
            },
            RoundDir::Default => match stage {
                Stage::Intermediate => Rounding::Cents,
                Stage::Final => Rounding::Whole,
            },
        };
        rounding.apply(v)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_down_to_grid() {
        let down = Rounding::Down { granularity: 100.0 };
        assert_eq!(down.apply(1050.0), 1000.0);
        assert_eq!(down.apply(1099.99), 1000.0);
        assert_eq!(down.apply(1100.0), 1100.0);
    }

    #[test]
    fn test_round_nearest_midpoint_ties_go_up() {
        let nearest = Rounding::Nearest { granularity: 100.0 };
        // Exact midpoint: remainder 50 is not < 50, ceiling stands
        assert_eq!(nearest.apply(1050.0), 1100.0);
        // Lower half: ceiling corrected down
        assert_eq!(nearest.apply(1020.0), 1000.0);
        // Upper half: ceiling stands
        assert_eq!(nearest.apply(1080.0), 1100.0);
        // On-grid value is unchanged
        assert_eq!(nearest.apply(1100.0), 1100.0);
    }

    #[test]
    fn test_rounding_idempotent() {
        for rounding in [
            Rounding::Down { granularity: 50.0 },
            Rounding::Nearest { granularity: 50.0 },
        ] {
            for value in [0.0, 17.3, 24.999, 25.0, 26.1, 49.9, 1049.5, 123456.78] {
                let once = rounding.apply(value);
                assert_eq!(rounding.apply(once), once, "{:?} on {}", rounding, value);
            }
        }
    }

    #[test]
    fn test_default_rounding_precision() {
        assert_eq!(Rounding::Cents.apply(1234.5678), 1234.57);
        assert_eq!(Rounding::Cents.apply(1234.5), 1234.5);
        assert_eq!(Rounding::Whole.apply(1234.5678), 1235.0);
        assert_eq!(Rounding::Whole.apply(2200.0), 2200.0);
    }

    #[test]
    fn test_cap_clamps_all_policies() {
        for rounding in [
            Rounding::Down { granularity: 100.0 },
            Rounding::Nearest { granularity: 100.0 },
            Rounding::Cents,
            Rounding::Whole,
        ] {
            assert_eq!(rounding.apply(1e150), VALUE_CAP);
            assert!(rounding.apply(VALUE_CAP) <= VALUE_CAP);
        }
    }

    #[test]
    fn test_round_value_per_column_granularity() {
        let record = ParamRecord {
            indexed: true,
            value: vec![ParamValue::ByStatus(vec![0.0, 0.0, 0.0])],
            value_yrs: [2013].into_iter().collect(),
            round_to: vec![10.0, 100.0, 1000.0],
            round_dir: RoundDir::Down,
        };
        let value = ParamValue::ByStatus(vec![1234.0, 1234.0, 1234.0]);
        let rounded = round_value(&record, &value, Stage::Intermediate);
        assert_eq!(rounded, ParamValue::ByStatus(vec![1230.0, 1200.0, 1000.0]));
    }

    #[test]
    fn test_round_value_single_granularity_broadcasts() {
        let record = ParamRecord {
            indexed: true,
            value: vec![ParamValue::ByStatus(vec![0.0, 0.0])],
            value_yrs: [2013].into_iter().collect(),
            round_to: vec![50.0],
            round_dir: RoundDir::Nearest,
        };
        let value = ParamValue::ByStatus(vec![1020.0, 1030.0]);
        let rounded = round_value(&record, &value, Stage::Final);
        assert_eq!(rounded, ParamValue::ByStatus(vec![1000.0, 1050.0]));
    }

    #[test]
    fn test_round_value_default_stages() {
        let record = ParamRecord {
            indexed: true,
            value: vec![ParamValue::Scalar(0.0)],
            value_yrs: [2013].into_iter().collect(),
            round_to: vec![1.0],
            round_dir: RoundDir::Default,
        };
        let value = ParamValue::Scalar(4133.8147);
        assert_eq!(
            round_value(&record, &value, Stage::Intermediate),
            ParamValue::Scalar(4133.81)
        );
        assert_eq!(
            round_value(&record, &value, Stage::Final),
            ParamValue::Scalar(4134.0)
        );
    }
}
