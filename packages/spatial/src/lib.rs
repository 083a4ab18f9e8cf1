#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-memory spatial index for administrative attribution.
//!
//! Builds an R-tree over one administrative layer's polygons and provides
//! fast point-in-polygon lookups. Used by both the overlay and report
//! pipelines to attach subdivision names to impact points.

use geo::{Contains, MultiPolygon};
use peril_map_geography::AdministrativeLayer;
use peril_map_geography_models::AdminAttributes;
use rstar::{AABB, RTree, RTreeObject};

/// An administrative polygon stored in the R-tree with its attributes.
struct AreaEntry {
    attributes: AdminAttributes,
    envelope: AABB<[f64; 2]>,
    polygon: MultiPolygon<f64>,
}

impl RTreeObject for AreaEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Pre-built spatial index for one administrative layer.
///
/// Constructed once per layer and read-only afterwards, so joining the same
/// point set twice yields identical assignments.
pub struct AdminIndex {
    areas: RTree<AreaEntry>,
}

impl AdminIndex {
    /// Builds an R-tree index over the layer's polygons.
    #[must_use]
    pub fn build(layer: &AdministrativeLayer) -> Self {
        let entries: Vec<AreaEntry> = layer
            .areas
            .iter()
            .map(|area| AreaEntry {
                attributes: area.attributes.clone(),
                envelope: compute_envelope(&area.polygon),
                polygon: area.polygon.clone(),
            })
            .collect();

        log::info!(
            "Built spatial index over {} admin areas at depth {}",
            entries.len(),
            layer.level.depth()
        );
        Self {
            areas: RTree::bulk_load(entries),
        }
    }

    /// Looks up the administrative attributes for a point.
    ///
    /// Administrative subdivisions tile a country without overlap, so first
    /// match wins; overlapping/duplicate boundaries resolve arbitrarily and
    /// this is an accepted limitation.
    #[must_use]
    pub fn locate(&self, longitude: f64, latitude: f64) -> Option<&AdminAttributes> {
        let point = geo::Point::new(longitude, latitude);
        let query_env = AABB::from_point([longitude, latitude]);

        for entry in self.areas.locate_in_envelope_intersecting(&query_env) {
            if entry.polygon.contains(&point) {
                return Some(&entry.attributes);
            }
        }
        None
    }

    /// Left point-in-polygon join: one attribute slot per input coordinate.
    ///
    /// Points falling outside every polygon get `None`; filtering is left to
    /// the caller (the overlay drops them, the report keeps partial rows).
    #[must_use]
    pub fn join(&self, coordinates: &[(f64, f64)]) -> Vec<Option<AdminAttributes>> {
        coordinates
            .iter()
            .map(|&(longitude, latitude)| self.locate(longitude, latitude).cloned())
            .collect()
    }
}

/// Compute the bounding box envelope for a [`MultiPolygon`].
fn compute_envelope(mp: &MultiPolygon<f64>) -> AABB<[f64; 2]> {
    use geo::BoundingRect;

    mp.bounding_rect().map_or_else(
        || AABB::from_point([0.0, 0.0]),
        |rect| AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]),
    )
}
