//! Visualization radius policy.
//!
//! A static rule table mapping (country, hazard code, exposure type) to the
//! circle radius used when rendering impact points. Rules are evaluated
//! first-match; everything unmatched falls through to [`DEFAULT_RADIUS`].
//! Entries are density adjustments: smaller radii where point density is
//! high.

/// Radius applied when no rule matches, in meters.
pub const DEFAULT_RADIUS: u32 = 2000;

struct RadiusRule {
    country: &'static str,
    hazard: &'static str,
    /// Exposure types the rule applies to; `None` matches any exposure.
    exposures: Option<&'static [&'static str]>,
    radius: u32,
}

const RULES: &[RadiusRule] = &[
    // Thailand: dense asset clusters render better with small circles.
    RadiusRule {
        country: "THA",
        hazard: "HW",
        exposures: None,
        radius: 100,
    },
    RadiusRule {
        country: "THA",
        hazard: "D",
        exposures: Some(&["tree_crops", "grass_crops"]),
        radius: 11000,
    },
    RadiusRule {
        country: "THA",
        hazard: "D",
        exposures: Some(&[
            "water_users",
            "wet_markets",
            "tree_crops_farmers",
            "grass_crops_farmers",
        ]),
        radius: 100,
    },
    RadiusRule {
        country: "THA",
        hazard: "FL",
        exposures: None,
        radius: 100,
    },
    // Egypt: hotels are extremely dense and need an extra-small radius.
    RadiusRule {
        country: "EGY",
        hazard: "HW",
        exposures: Some(&["hotels"]),
        radius: 10,
    },
    RadiusRule {
        country: "EGY",
        hazard: "HW",
        exposures: None,
        radius: 100,
    },
    RadiusRule {
        country: "EGY",
        hazard: "FL",
        exposures: Some(&["students"]),
        radius: 2000,
    },
    RadiusRule {
        country: "EGY",
        hazard: "FL",
        exposures: Some(&[
            "diarrhea_patients",
            "crops",
            "livestock",
            "hotels",
            "power_plants",
            "roads",
        ]),
        radius: 10,
    },
];

/// Returns the visualization radius for a run, in meters.
#[must_use]
pub fn circle_radius(hazard_code: &str, country_iso3: &str, exposure_type: &str) -> u32 {
    for rule in RULES {
        if rule.country != country_iso3 || rule.hazard != hazard_code {
            continue;
        }
        match rule.exposures {
            None => return rule.radius,
            Some(exposures) if exposures.contains(&exposure_type) => return rule.radius,
            Some(_) => {}
        }
    }
    DEFAULT_RADIUS
}
