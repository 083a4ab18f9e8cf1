//! Percentile-based risk level classification.
//!
//! Each return-period column is classified independently: the 20/40/60/80th
//! percentiles of its positive values (rounded to 1 decimal, with a literal
//! 0 prepended) form 5 breakpoints, and every point is assigned an ordinal
//! level 1..=5 against them. Breakpoint order is direction-aware so columns
//! whose natural ordering is descending classify correctly.

use peril_map_impact_models::{ClassifiedPoint, ClassifiedTable, ExceedanceTable, RiskBreakpoints};

use crate::ImpactError;

/// Percentile ranks used for the 4 data-driven breakpoints.
const PERCENTILES: [f64; 4] = [20.0, 40.0, 60.0, 80.0];

/// Classifies every point in the table, one column at a time.
///
/// Zero/negative values are definitionally the baseline: they are excluded
/// from the percentile computation but still receive a level.
///
/// # Errors
///
/// Returns [`ImpactError::NoPositiveValues`] if a return-period column has
/// no value above zero; the percentile distribution is undefined there and
/// silently inventing a legend would be indistinguishable from real data.
pub fn classify(table: &ExceedanceTable) -> Result<ClassifiedTable, ImpactError> {
    let mut breakpoints = Vec::with_capacity(table.return_periods.len());

    for (column, &return_period) in table.return_periods.periods().iter().enumerate() {
        let mut positive: Vec<f64> = table
            .points
            .iter()
            .map(|p| p.values[column])
            .filter(|v| *v > 0.0)
            .collect();

        if positive.is_empty() {
            return Err(ImpactError::NoPositiveValues { return_period });
        }
        positive.sort_by(|a, b| a.total_cmp(b));

        let mut values = Vec::with_capacity(PERCENTILES.len() + 1);
        values.push(0.0);
        for p in PERCENTILES {
            values.push(round1(percentile(&positive, p)));
        }

        log::debug!(
            "rp{return_period}: breakpoints {values:?} over {} values",
            positive.len()
        );
        breakpoints.push(RiskBreakpoints::new(return_period, values));
    }

    let points = table
        .points
        .iter()
        .map(|point| ClassifiedPoint {
            point: point.clone(),
            levels: breakpoints
                .iter()
                .enumerate()
                .map(|(column, bp)| bp.level_for(point.values[column]))
                .collect(),
        })
        .collect();

    Ok(ClassifiedTable {
        return_periods: table.return_periods.clone(),
        breakpoints,
        points,
    })
}

/// Linearly interpolated percentile of a sorted, non-empty slice.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
