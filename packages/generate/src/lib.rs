#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Overlay and report generation from classified impact data.
//!
//! Orchestrates the pipeline: exceedance table → risk classification →
//! spatial aggregation → artifact assembly. Produces two materializations of
//! the same intermediate data: a classified GeoJSON overlay with embedded
//! legend metadata, and a flat tabular administrative report.
//!
//! Every entry point returns `Result<Generated<T>, GenerateError>` so
//! callers can tell "no qualifying data" apart from a pipeline fault; no
//! error is swallowed.

pub mod overlay;
pub mod radius;
pub mod report;

use std::path::PathBuf;

use peril_map_geography::{AdminDataSource, CountryResolver, GeographyError};
use peril_map_impact::ImpactError;
use peril_map_impact_models::{AssetCategory, ReturnPeriodSeries};
use thiserror::Error;

/// Errors that can occur during overlay or report generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Exceedance table building or classification failed.
    #[error("Impact error: {0}")]
    Impact(#[from] ImpactError),

    /// Boundary fetch, country resolution, or layer parsing failed.
    #[error("Geography error: {0}")]
    Geography(#[from] GeographyError),

    /// Writing the overlay artifact failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the overlay artifact failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of a generation run that completed without a fault.
///
/// `Empty` means the pipeline ran but nothing qualified (every point was
/// filtered or unjoined); it is a legitimate result, distinct from an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generated<T> {
    /// The artifact was produced.
    Data(T),
    /// No qualifying data; no artifact was produced or overwritten.
    Empty,
}

impl<T> Generated<T> {
    /// True for the `Empty` variant.
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Per-run configuration supplied by the caller.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Country display name; resolved to ISO3 via the context's resolver.
    pub country_name: String,
    /// Exposure type code (e.g. `tree_crops`), used by the radius policy.
    pub exposure_type: String,
    /// Controls magnitude rounding.
    pub asset_category: AssetCategory,
    /// Return periods to evaluate, in display order.
    pub return_periods: ReturnPeriodSeries,
}

/// External collaborators and output location for one run.
///
/// Passed explicitly into each entry point; the overlay path is supplied by
/// the caller so concurrent or test-isolated runs never collide on a shared
/// temp file.
pub struct RunContext<'a> {
    /// Administrative-boundary collaborator.
    pub admin: &'a dyn AdminDataSource,
    /// Country-name normalization collaborator.
    pub countries: &'a dyn CountryResolver,
    /// Where the overlay artifact is written (overwritten each run).
    pub overlay_path: PathBuf,
}

impl RunContext<'_> {
    /// Resolves the configured country name to its ISO3 code.
    fn resolve_iso3(&self, country_name: &str) -> Result<String, GeographyError> {
        self.countries
            .iso3(country_name)
            .ok_or_else(|| GeographyError::UnknownCountry(country_name.to_owned()))
    }
}
