#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Administrative boundary layers and collaborator interfaces.
//!
//! An [`AdministrativeLayer`] is the polygon collection for one country at
//! one subdivision depth, in EPSG:4326. Layers come from an external
//! boundary-data collaborator behind [`AdminDataSource`] and are immutable
//! reference data for the duration of a run; callers may cache and share
//! them across runs.

use geo::MultiPolygon;
use geojson::GeoJson;
use peril_map_geography_models::{AdminAttributes, AdminLevel};
use thiserror::Error;

/// Errors that can occur while fetching or parsing boundary data.
#[derive(Debug, Error)]
pub enum GeographyError {
    /// The boundary-data collaborator failed.
    #[error("Boundary data error: {0}")]
    Source(String),

    /// The country name could not be resolved to an ISO3 code.
    #[error("Unknown country: {0}")]
    UnknownCountry(String),

    /// GeoJSON parsing failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The GeoJSON document was not a feature collection of polygons.
    #[error("Malformed boundary data: {message}")]
    Malformed {
        /// Description of what went wrong.
        message: String,
    },
}

/// One administrative polygon with its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminArea {
    /// Name and country attributes.
    pub attributes: AdminAttributes,
    /// The subdivision's footprint (EPSG:4326).
    pub polygon: MultiPolygon<f64>,
}

/// The polygon collection for one country at one subdivision depth.
#[derive(Debug, Clone, PartialEq)]
pub struct AdministrativeLayer {
    /// Subdivision depth of every polygon in the layer.
    pub level: AdminLevel,
    /// The polygons.
    pub areas: Vec<AdminArea>,
}

/// Interface to the external administrative-boundary collaborator.
pub trait AdminDataSource {
    /// Fetches the polygon layer for a country at the given depth.
    ///
    /// # Errors
    ///
    /// Returns [`GeographyError`] if the layer cannot be fetched or parsed.
    fn admin_layer(
        &self,
        country_iso3: &str,
        level: AdminLevel,
    ) -> Result<AdministrativeLayer, GeographyError>;
}

/// Interface to the external country-name normalization collaborator.
pub trait CountryResolver {
    /// Resolves a country name to its ISO3 code, if recognized.
    fn iso3(&self, country_name: &str) -> Option<String>;
}

/// Parses a GeoJSON feature collection into an [`AdministrativeLayer`].
///
/// Accepts `Polygon` and `MultiPolygon` geometries; features missing a
/// usable geometry or a `name` property are skipped with a warning rather
/// than failing the whole layer.
///
/// # Errors
///
/// Returns [`GeographyError`] if the document is not valid GeoJSON or not a
/// feature collection.
pub fn parse_layer(
    geojson_str: &str,
    level: AdminLevel,
) -> Result<AdministrativeLayer, GeographyError> {
    let geojson: GeoJson = geojson_str.parse()?;
    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(GeographyError::Malformed {
            message: "expected a FeatureCollection".to_owned(),
        });
    };

    let mut areas = Vec::with_capacity(collection.features.len());
    for feature in collection.features {
        let Some(name) = property_string(&feature, "name") else {
            log::warn!("Skipping boundary feature without a name property");
            continue;
        };
        let country = property_string(&feature, "country").unwrap_or_default();

        let Some(polygon) = feature.geometry.and_then(to_multipolygon) else {
            log::warn!("Skipping boundary {name}: no polygonal geometry");
            continue;
        };

        areas.push(AdminArea {
            attributes: AdminAttributes { name, country },
            polygon,
        });
    }

    log::info!(
        "Parsed {} admin areas at depth {}",
        areas.len(),
        level.depth()
    );
    Ok(AdministrativeLayer { level, areas })
}

fn property_string(feature: &geojson::Feature, key: &str) -> Option<String> {
    feature
        .properties
        .as_ref()
        .and_then(|props| props.get(key))
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
}

/// Converts a GeoJSON geometry into a [`MultiPolygon`].
/// Handles both `Polygon` and `MultiPolygon` geometry types.
fn to_multipolygon(geometry: geojson::Geometry) -> Option<MultiPolygon<f64>> {
    let geo_geom: geo::Geometry<f64> = geometry.try_into().ok()?;
    match geo_geom {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYER: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"name": "North", "country": "Testland"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": {"country": "Testland"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[2.0, 0.0], [3.0, 0.0], [3.0, 1.0], [2.0, 1.0], [2.0, 0.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": {"name": "Line", "country": "Testland"},
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[0.0, 0.0], [1.0, 1.0]]
                }
            }
        ]
    }"#;

    #[test]
    fn parses_polygons_and_skips_unusable_features() {
        let layer = parse_layer(LAYER, AdminLevel::One).unwrap();
        assert_eq!(layer.areas.len(), 1);
        assert_eq!(layer.areas[0].attributes.name, "North");
        assert_eq!(layer.areas[0].attributes.country, "Testland");
    }

    #[test]
    fn rejects_non_feature_collections() {
        let result = parse_layer(
            r#"{"type": "Point", "coordinates": [0.0, 0.0]}"#,
            AdminLevel::One,
        );
        assert!(matches!(result, Err(GeographyError::Malformed { .. })));
    }
}
