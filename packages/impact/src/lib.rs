#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Exceedance table building and percentile risk classification.
//!
//! Consumes the per-point exceedance curves produced by the external impact
//! engine, reshapes them into a tabular structure, and derives data-driven
//! ordinal risk levels per return period. The impact computation itself is
//! behind the [`ImpactSource`] trait; this crate only post-processes its
//! output.

pub mod classify;
pub mod impf;
pub mod table;

use peril_map_impact_models::{ReturnPeriodSeries, SeriesError};
use thiserror::Error;

/// Errors that can occur while building or classifying exceedance data.
#[derive(Debug, Error)]
pub enum ImpactError {
    /// The impact engine failed to evaluate the exceedance curves.
    #[error("Impact source error: {0}")]
    Source(String),

    /// The exceedance matrix did not match the coordinate/series shape.
    #[error("Exceedance matrix shape mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch {
        /// Number of values implied by the coordinates and series.
        expected: usize,
        /// Number of values the source returned.
        actual: usize,
    },

    /// The return-period series failed validation.
    #[error("Invalid return-period series: {0}")]
    Series(#[from] SeriesError),

    /// A return-period column had no positive values to take percentiles of.
    #[error("No positive values for return period {return_period}; cannot derive risk levels")]
    NoPositiveValues {
        /// The return period whose column was all zero/negative.
        return_period: u32,
    },
}

/// Interface to the external impact-computation engine's result.
///
/// The engine consumes exposure + hazard + impact-function-set and exposes
/// per-point coordinates plus an exceedance-curve query. Implementations are
/// supplied by the caller; this crate never computes impacts itself.
pub trait ImpactSource {
    /// Exposure centroid coordinates as (longitude, latitude) pairs.
    fn coordinates(&self) -> &[(f64, f64)];

    /// Evaluates the exceedance curves at the given return periods.
    ///
    /// Returns one row per coordinate, each with one magnitude per return
    /// period in series order.
    ///
    /// # Errors
    ///
    /// Returns an error string if the engine cannot evaluate the curves.
    fn local_exceedance(
        &self,
        return_periods: &ReturnPeriodSeries,
    ) -> Result<Vec<Vec<f64>>, String>;

    /// Physical unit of the impact magnitudes (e.g. `USD`, `People`).
    fn unit(&self) -> &str;

    /// Hazard type code (e.g. `FL`, `D`, `HW`).
    fn hazard_code(&self) -> &str;
}
