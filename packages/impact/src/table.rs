//! Exceedance table building.
//!
//! Reshapes the impact engine's per-point exceedance curves into a table of
//! coordinates plus one column per requested return period, applying the
//! asset category's rounding rule and dropping rows with no exceedance.

use peril_map_impact_models::{AssetCategory, ExceedanceTable, ImpactPoint, ReturnPeriodSeries};

use crate::{ImpactError, ImpactSource};

/// Builds the exceedance table for one run.
///
/// Magnitudes are rounded per `asset_category` (2 decimals for economic,
/// ceiling for non-economic). Rows where every return-period value is ≤ 0
/// are dropped; they represent locations with no exceedance at any evaluated
/// return period and carry no signal for the overlay or report.
///
/// # Errors
///
/// Returns [`ImpactError::Source`] if the engine cannot evaluate the curves,
/// or [`ImpactError::ShapeMismatch`] if the returned matrix does not match
/// the coordinate count and series length.
pub fn build_exceedance_table(
    source: &dyn ImpactSource,
    return_periods: &ReturnPeriodSeries,
    asset_category: AssetCategory,
) -> Result<ExceedanceTable, ImpactError> {
    let coords = source.coordinates();
    let matrix = source
        .local_exceedance(return_periods)
        .map_err(ImpactError::Source)?;

    if matrix.len() != coords.len() {
        return Err(ImpactError::ShapeMismatch {
            expected: coords.len() * return_periods.len(),
            actual: matrix.iter().map(Vec::len).sum(),
        });
    }

    let mut points = Vec::with_capacity(coords.len());
    for (&(longitude, latitude), row) in coords.iter().zip(&matrix) {
        if row.len() != return_periods.len() {
            return Err(ImpactError::ShapeMismatch {
                expected: coords.len() * return_periods.len(),
                actual: matrix.iter().map(Vec::len).sum(),
            });
        }

        let values: Vec<f64> = row.iter().map(|v| asset_category.round(*v)).collect();
        let point = ImpactPoint {
            latitude,
            longitude,
            values,
        };
        if !point.has_no_exceedance() {
            points.push(point);
        }
    }

    log::info!(
        "Built exceedance table: {} of {} points retained across {} return periods",
        points.len(),
        coords.len(),
        return_periods.len()
    );

    Ok(ExceedanceTable {
        return_periods: return_periods.clone(),
        points,
    })
}
