//! Flat administrative report assembly.
//!
//! Joins classified impact points against both administrative depths and
//! produces an in-memory table with display-label columns. The two joins are
//! independent: a failing layer is logged and contributes a null column
//! rather than aborting the other.

use peril_map_geography_models::{AdminAttributes, AdminLevel};
use peril_map_impact::table::build_exceedance_table;
use peril_map_impact::{ImpactSource, classify};
use peril_map_impact_models::ReturnPeriodSeries;
use peril_map_spatial::AdminIndex;

use crate::{Generated, GenerateError, RunConfig, RunContext};

/// One report row: administrative names, coordinates, and the exceedance
/// magnitude per return period.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    /// Coarse subdivision name, if the depth-1 join matched.
    pub admin1: Option<String>,
    /// Fine subdivision name, if the depth-2 join matched.
    pub admin2: Option<String>,
    /// Point latitude.
    pub latitude: f64,
    /// Point longitude.
    pub longitude: f64,
    /// Magnitude per return period, in series order.
    pub values: Vec<f64>,
}

/// The tabular report artifact. In-memory only; persistence is left to the
/// caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    /// The return periods behind the `RP<n>` columns, in column order.
    pub return_periods: ReturnPeriodSeries,
    /// Rows with at least one administrative name.
    pub rows: Vec<ReportRow>,
}

impl ReportTable {
    /// Display column labels: `Admin 1, Admin 2, Latitude, Longitude, RP<n>...`.
    #[must_use]
    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec![
            "Admin 1".to_owned(),
            "Admin 2".to_owned(),
            "Latitude".to_owned(),
            "Longitude".to_owned(),
        ];
        headers.extend(
            self.return_periods
                .periods()
                .iter()
                .map(|rp| format!("RP{rp}")),
        );
        headers
    }
}

/// Generates the administrative report for one run.
///
/// # Errors
///
/// Returns [`GenerateError`] on country resolution, exceedance, or
/// classification failure. A layer failing to fetch is tolerated (its column
/// is null); only both-layers-failed rows disappear, and an all-filtered
/// input yields [`Generated::Empty`].
pub fn generate_report(
    ctx: &RunContext<'_>,
    source: &dyn ImpactSource,
    config: &RunConfig,
) -> Result<Generated<ReportTable>, GenerateError> {
    let iso3 = ctx.resolve_iso3(&config.country_name)?;

    let table = build_exceedance_table(source, &config.return_periods, config.asset_category)?;
    if table.points.is_empty() {
        log::info!("No points with exceedance for {iso3}; report is empty");
        return Ok(Generated::Empty);
    }
    let classified = classify::classify(&table)?;

    let coords: Vec<(f64, f64)> = classified
        .points
        .iter()
        .map(|cp| (cp.point.longitude, cp.point.latitude))
        .collect();

    let admin1 = join_layer(ctx, &iso3, AdminLevel::One, &coords);
    let admin2 = join_layer(ctx, &iso3, AdminLevel::Two, &coords);

    let mut rows = Vec::with_capacity(classified.points.len());
    for (i, cp) in classified.points.iter().enumerate() {
        let admin1 = admin1[i].as_ref().map(|a| a.name.clone());
        let admin2 = admin2[i].as_ref().map(|a| a.name.clone());
        if admin1.is_none() && admin2.is_none() {
            continue;
        }
        rows.push(ReportRow {
            admin1,
            admin2,
            latitude: cp.point.latitude,
            longitude: cp.point.longitude,
            values: cp.point.values.clone(),
        });
    }

    if rows.is_empty() {
        log::info!("No rows joined any admin boundary for {iso3}; report is empty");
        return Ok(Generated::Empty);
    }

    log::info!("Built report with {} rows for {iso3}", rows.len());
    Ok(Generated::Data(ReportTable {
        return_periods: classified.return_periods,
        rows,
    }))
}

/// Joins one administrative depth, degrading to a null column on failure.
fn join_layer(
    ctx: &RunContext<'_>,
    iso3: &str,
    level: AdminLevel,
    coords: &[(f64, f64)],
) -> Vec<Option<AdminAttributes>> {
    match ctx.admin.admin_layer(iso3, level) {
        Ok(layer) => AdminIndex::build(&layer).join(coords),
        Err(error) => {
            log::error!("Admin depth {} join failed: {error}", level.depth());
            vec![None; coords.len()]
        }
    }
}

#[cfg(test)]
mod tests {
    use geo::{MultiPolygon, polygon};
    use peril_map_geography::{
        AdminArea, AdminDataSource, AdministrativeLayer, CountryResolver, GeographyError,
    };
    use peril_map_impact_models::AssetCategory;

    use super::*;

    struct FakeImpact {
        coords: Vec<(f64, f64)>,
        matrix: Vec<Vec<f64>>,
    }

    impl ImpactSource for FakeImpact {
        fn coordinates(&self) -> &[(f64, f64)] {
            &self.coords
        }

        fn local_exceedance(&self, _: &ReturnPeriodSeries) -> Result<Vec<Vec<f64>>, String> {
            Ok(self.matrix.clone())
        }

        fn unit(&self) -> &str {
            "People"
        }

        fn hazard_code(&self) -> &str {
            "D"
        }
    }

    fn unit_square(name: &str) -> AdminArea {
        AdminArea {
            attributes: AdminAttributes {
                name: name.to_owned(),
                country: "Testland".to_owned(),
            },
            polygon: MultiPolygon(vec![polygon![
                (x: 0.0, y: 0.0),
                (x: 1.0, y: 0.0),
                (x: 1.0, y: 1.0),
                (x: 0.0, y: 1.0),
                (x: 0.0, y: 0.0),
            ]]),
        }
    }

    /// Both depths resolve; depth 1 is "Province", depth 2 "District".
    struct FakeAdmin;

    impl AdminDataSource for FakeAdmin {
        fn admin_layer(
            &self,
            _country_iso3: &str,
            level: AdminLevel,
        ) -> Result<AdministrativeLayer, GeographyError> {
            let name = match level {
                AdminLevel::One => "Province",
                AdminLevel::Two => "District",
            };
            Ok(AdministrativeLayer {
                level,
                areas: vec![unit_square(name)],
            })
        }
    }

    /// Depth 2 always fails; depth 1 resolves.
    struct FineLayerBroken;

    impl AdminDataSource for FineLayerBroken {
        fn admin_layer(
            &self,
            _country_iso3: &str,
            level: AdminLevel,
        ) -> Result<AdministrativeLayer, GeographyError> {
            match level {
                AdminLevel::One => Ok(AdministrativeLayer {
                    level,
                    areas: vec![unit_square("Province")],
                }),
                AdminLevel::Two => Err(GeographyError::Source("boundary service down".to_owned())),
            }
        }
    }

    struct FakeCountries;

    impl CountryResolver for FakeCountries {
        fn iso3(&self, country_name: &str) -> Option<String> {
            (country_name == "Testland").then(|| "TST".to_owned())
        }
    }

    fn config() -> RunConfig {
        RunConfig {
            country_name: "Testland".to_owned(),
            exposure_type: "tree_crops".to_owned(),
            asset_category: AssetCategory::NonEconomic,
            return_periods: ReturnPeriodSeries::new(vec![10, 25]).unwrap(),
        }
    }

    fn context(admin: &'static dyn AdminDataSource) -> RunContext<'static> {
        RunContext {
            admin,
            countries: &FakeCountries,
            overlay_path: std::env::temp_dir().join("peril_map_report_unused.json"),
        }
    }

    #[test]
    fn joins_both_depths_and_labels_columns() {
        let ctx = context(&FakeAdmin);
        let source = FakeImpact {
            coords: vec![(0.5, 0.5), (0.6, 0.6)],
            matrix: vec![vec![0.0, 5.0], vec![3.0, 9.0]],
        };

        let result = generate_report(&ctx, &source, &config()).unwrap();
        let Generated::Data(table) = result else {
            panic!("expected data");
        };

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].admin1.as_deref(), Some("Province"));
        assert_eq!(table.rows[0].admin2.as_deref(), Some("District"));
        assert_eq!(
            table.headers(),
            vec!["Admin 1", "Admin 2", "Latitude", "Longitude", "RP10", "RP25"]
        );
    }

    #[test]
    fn failing_fine_layer_degrades_to_null_column() {
        let ctx = context(&FineLayerBroken);
        let source = FakeImpact {
            coords: vec![(0.5, 0.5)],
            matrix: vec![vec![2.0, 5.0]],
        };

        let result = generate_report(&ctx, &source, &config()).unwrap();
        let Generated::Data(table) = result else {
            panic!("expected data");
        };

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].admin1.as_deref(), Some("Province"));
        assert_eq!(table.rows[0].admin2, None);
    }

    #[test]
    fn rows_missing_both_names_are_dropped() {
        let ctx = context(&FakeAdmin);
        let source = FakeImpact {
            coords: vec![(0.5, 0.5), (5.0, 5.0)],
            matrix: vec![vec![1.0, 5.0], vec![3.0, 9.0]],
        };

        let result = generate_report(&ctx, &source, &config()).unwrap();
        let Generated::Data(table) = result else {
            panic!("expected data");
        };
        assert_eq!(table.rows.len(), 1);
        assert!((table.rows[0].latitude - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn no_exceedance_anywhere_is_empty() {
        let ctx = context(&FakeAdmin);
        let source = FakeImpact {
            coords: vec![(0.5, 0.5)],
            matrix: vec![vec![0.0, 0.0]],
        };

        let result = generate_report(&ctx, &source, &config()).unwrap();
        assert!(result.is_empty());
    }
}
