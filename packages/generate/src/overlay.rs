//! Classified GeoJSON overlay assembly.
//!
//! Composes classified, country-joined impact points plus legend metadata
//! into a GeoJSON feature collection and persists it to the run's overlay
//! path. The artifact is fully overwritten each run; on an empty or failed
//! run nothing is written, so a previous artifact is never corrupted.

use std::io::{BufWriter, Write as _};
use std::path::PathBuf;

use peril_map_geography_models::AdminLevel;
use peril_map_impact::table::build_exceedance_table;
use peril_map_impact::{ImpactSource, classify};
use peril_map_impact_models::ReturnPeriodSeries;
use peril_map_spatial::AdminIndex;
use serde_json::json;

use crate::radius::circle_radius;
use crate::{Generated, GenerateError, RunConfig, RunContext};

/// What a successful overlay run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlaySummary {
    /// Where the artifact was written.
    pub path: PathBuf,
    /// Number of features in the collection.
    pub feature_count: usize,
    /// Visualization radius embedded in the metadata, in meters.
    pub radius: u32,
}

/// Generates the classified overlay artifact for one run.
///
/// Points are joined against the depth-2 administrative layer; points that
/// fall outside every recognized boundary are discarded as artifacts outside
/// the area of interest.
///
/// # Errors
///
/// Returns [`GenerateError`] on country resolution, exceedance, classification,
/// boundary, or write failure. An all-filtered input is not an error; it
/// yields [`Generated::Empty`] and leaves the overlay path untouched.
pub fn generate_overlay(
    ctx: &RunContext<'_>,
    source: &dyn ImpactSource,
    config: &RunConfig,
) -> Result<Generated<OverlaySummary>, GenerateError> {
    let iso3 = ctx.resolve_iso3(&config.country_name)?;

    let table = build_exceedance_table(source, &config.return_periods, config.asset_category)?;
    if table.points.is_empty() {
        log::info!("No points with exceedance for {iso3}; overlay skipped");
        return Ok(Generated::Empty);
    }
    let classified = classify::classify(&table)?;

    let layer = ctx.admin.admin_layer(&iso3, AdminLevel::Two)?;
    let index = AdminIndex::build(&layer);

    let periods = classified.return_periods.periods();
    let mut features = Vec::with_capacity(classified.points.len());
    for cp in &classified.points {
        let Some(attrs) = index.locate(cp.point.longitude, cp.point.latitude) else {
            continue;
        };

        let mut properties = serde_json::Map::new();
        for (column, &rp) in periods.iter().enumerate() {
            properties.insert(
                ReturnPeriodSeries::column_name(rp),
                json!(cp.point.values[column]),
            );
            properties.insert(
                format!("{}_level", ReturnPeriodSeries::column_name(rp)),
                json!(cp.levels[column]),
            );
        }
        properties.insert("name".to_owned(), json!(attrs.name));
        properties.insert("country".to_owned(), json!(attrs.country));

        features.push(json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": [cp.point.longitude, cp.point.latitude]
            },
            "properties": properties,
        }));
    }

    if features.is_empty() {
        log::info!("No points inside {iso3} boundaries; overlay skipped");
        return Ok(Generated::Empty);
    }
    let feature_count = features.len();

    let mut percentile_values = serde_json::Map::new();
    for bp in &classified.breakpoints {
        percentile_values.insert(
            ReturnPeriodSeries::column_name(bp.return_period),
            json!(bp.values),
        );
    }

    let radius = circle_radius(source.hazard_code(), &iso3, &config.exposure_type);
    let document = json!({
        "type": "FeatureCollection",
        "features": features,
        "_metadata": {
            "percentile_values": percentile_values,
            "radius": radius,
            "return_periods": periods,
            "title": format!("Risk ({})", source.unit()),
            "unit": source.unit(),
        }
    });

    let file = std::fs::File::create(&ctx.overlay_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &document)?;
    writer.flush()?;

    log::info!(
        "Wrote overlay with {feature_count} features to {}",
        ctx.overlay_path.display()
    );

    Ok(Generated::Data(OverlaySummary {
        path: ctx.overlay_path.clone(),
        feature_count,
        radius,
    }))
}
