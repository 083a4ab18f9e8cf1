#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Impact distribution and risk classification types.
//!
//! These types carry per-location exceedance values from the impact engine
//! through percentile classification and spatial aggregation. They are
//! independent of the polygon data used for the administrative joins.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Asset category controlling how exceedance magnitudes are rounded.
///
/// Economic magnitudes are monetary and continuous; non-economic magnitudes
/// are counts (people, units) and must not be reported fractionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    /// Monetary loss, rounded to 2 decimal digits.
    Economic,
    /// Counts of people/units affected, rounded up to the next integer.
    NonEconomic,
}

impl AssetCategory {
    /// Applies this category's rounding rule to a raw magnitude.
    #[must_use]
    pub fn round(self, value: f64) -> f64 {
        match self {
            Self::Economic => (value * 100.0).round() / 100.0,
            Self::NonEconomic => value.ceil(),
        }
    }
}

/// Error raised when a return-period series fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    /// The series contained no return periods.
    #[error("Return-period series is empty")]
    Empty,

    /// A return period was zero.
    #[error("Return period must be positive")]
    NonPositive,

    /// The same return period appeared twice.
    #[error("Duplicate return period: {0}")]
    Duplicate(u32),
}

/// The ordered set of return periods (in years) requested for one run.
///
/// Order is preserved for column naming and legend display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReturnPeriodSeries(Vec<u32>);

impl ReturnPeriodSeries {
    /// Validates and wraps a list of return periods.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError`] if the list is empty, contains zero, or
    /// contains duplicates.
    pub fn new(periods: Vec<u32>) -> Result<Self, SeriesError> {
        if periods.is_empty() {
            return Err(SeriesError::Empty);
        }
        for (i, rp) in periods.iter().enumerate() {
            if *rp == 0 {
                return Err(SeriesError::NonPositive);
            }
            if periods[..i].contains(rp) {
                return Err(SeriesError::Duplicate(*rp));
            }
        }
        Ok(Self(periods))
    }

    /// The return periods in request order.
    #[must_use]
    pub fn periods(&self) -> &[u32] {
        &self.0
    }

    /// Number of return periods (the exceedance table's column count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the constructor rejects empty series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Column name for a return period (e.g. `rp10`).
    #[must_use]
    pub fn column_name(return_period: u32) -> String {
        format!("rp{return_period}")
    }
}

/// One exposure centroid with its exceedance magnitudes.
///
/// `values` is aligned with the run's [`ReturnPeriodSeries`]. Immutable once
/// built; classification and administrative names are layered on top rather
/// than mutated in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactPoint {
    /// Centroid latitude (EPSG:4326).
    pub latitude: f64,
    /// Centroid longitude (EPSG:4326).
    pub longitude: f64,
    /// Exceedance magnitude per return period, in series order.
    pub values: Vec<f64>,
}

impl ImpactPoint {
    /// True if every return-period value is zero or negative.
    ///
    /// Such points have no exceedance at any evaluated return period and are
    /// dropped before classification.
    #[must_use]
    pub fn has_no_exceedance(&self) -> bool {
        self.values.iter().all(|v| *v <= 0.0)
    }
}

/// The reshaped exceedance data for one run: points × return periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceedanceTable {
    /// The requested return periods, in column order.
    pub return_periods: ReturnPeriodSeries,
    /// Retained points (rows with at least one positive value).
    pub points: Vec<ImpactPoint>,
}

/// Whether breakpoints run low-to-high or high-to-low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// `breakpoints[0] < breakpoints[last]`.
    Ascending,
    /// Everything else, including a flat sequence.
    Descending,
}

/// Percentile breakpoints for one return-period column.
///
/// Five values: a literal 0 followed by the 20/40/60/80th percentiles of the
/// column's positive values, each rounded to 1 decimal. Read-only after
/// computation; reproduced verbatim in the overlay legend metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskBreakpoints {
    /// The return period this column classifies.
    pub return_period: u32,
    /// The 5 breakpoint values.
    pub values: Vec<f64>,
    /// Detected ordering of `values`.
    pub direction: Direction,
}

impl RiskBreakpoints {
    /// Wraps a breakpoint sequence, detecting its direction.
    #[must_use]
    pub fn new(return_period: u32, values: Vec<f64>) -> Self {
        let direction = if values.first() < values.last() {
            Direction::Ascending
        } else {
            Direction::Descending
        };
        Self {
            return_period,
            values,
            direction,
        }
    }

    /// Assigns the ordinal risk level (1-based) for a value.
    ///
    /// Values outside the breakpoint range clamp to the first/last level;
    /// interior values take the first matching breakpoint gap.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn level_for(&self, value: f64) -> u8 {
        let levels = &self.values;
        let len = levels.len() as u8;
        match self.direction {
            Direction::Ascending => {
                if value < levels[0] {
                    return 1;
                }
                if value >= levels[levels.len() - 1] {
                    return len;
                }
                for i in 1..levels.len() {
                    if levels[i - 1] <= value && value < levels[i] {
                        return i as u8;
                    }
                }
                len
            }
            Direction::Descending => {
                if value > levels[0] {
                    return 1;
                }
                if value <= levels[levels.len() - 1] {
                    return len;
                }
                for i in 1..levels.len() {
                    if levels[i - 1] >= value && value > levels[i] {
                        return i as u8;
                    }
                }
                len
            }
        }
    }
}

/// An [`ImpactPoint`] with its per-return-period risk levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedPoint {
    /// The underlying exceedance point.
    pub point: ImpactPoint,
    /// Risk level (1..=5) per return period, in series order.
    pub levels: Vec<u8>,
}

/// The classified exceedance data: points with levels plus the breakpoints
/// that produced them (one set per return period, in series order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedTable {
    /// The requested return periods, in column order.
    pub return_periods: ReturnPeriodSeries,
    /// Breakpoints per return period, in series order.
    pub breakpoints: Vec<RiskBreakpoints>,
    /// Classified points.
    pub points: Vec<ClassifiedPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn economic_rounding_two_decimals() {
        assert!((AssetCategory::Economic.round(1.234_56) - 1.23).abs() < f64::EPSILON);
    }

    #[test]
    fn non_economic_rounding_ceils() {
        assert!((AssetCategory::NonEconomic.round(1.01) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn series_rejects_empty_zero_and_duplicates() {
        assert_eq!(ReturnPeriodSeries::new(vec![]), Err(SeriesError::Empty));
        assert_eq!(
            ReturnPeriodSeries::new(vec![10, 0]),
            Err(SeriesError::NonPositive)
        );
        assert_eq!(
            ReturnPeriodSeries::new(vec![10, 25, 10]),
            Err(SeriesError::Duplicate(10))
        );
    }

    #[test]
    fn series_preserves_order() {
        let series = ReturnPeriodSeries::new(vec![25, 20, 15, 10]).unwrap();
        assert_eq!(series.periods(), &[25, 20, 15, 10]);
    }

    #[test]
    fn ascending_level_assignment() {
        let bp = RiskBreakpoints::new(10, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(bp.direction, Direction::Ascending);
        assert_eq!(bp.level_for(0.5), 1);
        assert_eq!(bp.level_for(2.5), 3);
        assert_eq!(bp.level_for(5.0), 5);
    }

    #[test]
    fn descending_level_assignment() {
        let bp = RiskBreakpoints::new(10, vec![5.0, 4.0, 3.0, 2.0, 1.0]);
        assert_eq!(bp.direction, Direction::Descending);
        assert_eq!(bp.level_for(4.5), 1);
        assert_eq!(bp.level_for(2.5), 3);
        assert_eq!(bp.level_for(0.5), 5);
        assert_eq!(bp.level_for(6.0), 1);
    }

    #[test]
    fn levels_stay_in_range() {
        let bp = RiskBreakpoints::new(10, vec![0.0, 1.5, 2.0, 3.5, 9.0]);
        for v in [-1.0, 0.0, 0.1, 1.5, 2.0, 3.49, 9.0, 100.0] {
            let level = bp.level_for(v);
            assert!((1..=5).contains(&level), "value {v} gave level {level}");
        }
    }

    #[test]
    fn no_exceedance_detection() {
        let point = ImpactPoint {
            latitude: 0.0,
            longitude: 0.0,
            values: vec![0.0, -1.0],
        };
        assert!(point.has_no_exceedance());

        let point = ImpactPoint {
            latitude: 0.0,
            longitude: 0.0,
            values: vec![0.0, 0.5],
        };
        assert!(!point.has_no_exceedance());
    }
}
