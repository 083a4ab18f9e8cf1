//! Impact-function curve definitions.
//!
//! A static lookup keyed by (exposure type, hazard type). Each entry is a
//! declarative curve record consumed by the external impact engine; there is
//! no algorithmic content here beyond the table itself. Unknown pairs fall
//! back to [`ImpactFunctionDef::DEFAULT`].

/// A vulnerability curve mapping hazard intensity to a damage fraction.
///
/// `intensity` and `mean_damage` are parallel arrays; the fraction of
/// affected assets is implicitly 1.0 at every step.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactFunctionDef {
    /// Hazard type code the curve applies to (e.g. `FL`, `D`).
    pub hazard_code: &'static str,
    /// Curve identifier within the engine's function set.
    pub id: u16,
    /// Hazard intensity steps.
    pub intensity: &'static [f64],
    /// Mean damage degree at each intensity step.
    pub mean_damage: &'static [f64],
    /// Unit of the intensity axis.
    pub intensity_unit: &'static str,
    /// Display name.
    pub name: &'static str,
}

impl ImpactFunctionDef {
    /// Fallback for exposure/hazard pairs with no defined curve.
    pub const DEFAULT: Self = Self {
        hazard_code: "",
        id: 1,
        intensity: &[],
        mean_damage: &[],
        intensity_unit: "",
        name: "",
    };

    /// Fraction of affected assets per intensity step (all ones).
    #[must_use]
    pub fn affected_fraction(&self) -> Vec<f64> {
        vec![1.0; self.intensity.len()]
    }
}

const FLOOD_DEPTH_STEPS: &[f64] = &[
    0.0, 0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0, 3.0, 4.0, 5.0,
];
const SPI_STEPS: &[f64] = &[-3.5, -3.0, -2.5, -2.0, -1.5, -1.0, -0.5, 0.0, 0.5];

const TREE_CROPS_FLOOD_DAMAGE: &[f64] = &[
    0.0, -0.0061, -0.003, 0.0082, 0.0262, 0.0495, 0.0765, 0.1054, 0.1346, 0.2246, 0.2318, 0.2318,
];
const GRASS_CROPS_FLOOD_DAMAGE: &[f64] = &[
    0.0, 0.0, 0.0067, 0.0454, 0.0975, 0.1537, 0.2074, 0.2543, 0.2922, 0.3203, 0.33, 0.33,
];

/// Returns the curve for an exposure/hazard pair.
///
/// Unknown pairs return [`ImpactFunctionDef::DEFAULT`].
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn impact_function(exposure_type: &str, hazard_type: &str) -> ImpactFunctionDef {
    match (exposure_type, hazard_type) {
        ("buddhist_monks", "flood") => ImpactFunctionDef {
            hazard_code: "FL",
            id: 101,
            intensity: FLOOD_DEPTH_STEPS,
            mean_damage: &[0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
            intensity_unit: "People",
            name: "Buddhist monks",
        },
        ("students", "flood") => ImpactFunctionDef {
            hazard_code: "FL",
            id: 102,
            intensity: &[0.0, 0.3, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0, 3.0, 4.0, 5.0],
            mean_damage: &[0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
            intensity_unit: "People",
            name: "Students",
        },
        ("tree_crops_farmers", "flood") => ImpactFunctionDef {
            hazard_code: "FL",
            id: 103,
            intensity: FLOOD_DEPTH_STEPS,
            mean_damage: TREE_CROPS_FLOOD_DAMAGE,
            intensity_unit: "People",
            name: "Tree crops farmers",
        },
        ("grass_crops_farmers", "flood") => ImpactFunctionDef {
            hazard_code: "FL",
            id: 104,
            intensity: FLOOD_DEPTH_STEPS,
            mean_damage: GRASS_CROPS_FLOOD_DAMAGE,
            intensity_unit: "People",
            name: "Grass crops farmers",
        },
        ("diarrhea_patients", "flood") => ImpactFunctionDef {
            hazard_code: "FL",
            id: 105,
            intensity: &[0.01, 0.08, 0.44, 2.0],
            mean_damage: &[0.0001, 0.0002, 0.0004, 0.0009],
            intensity_unit: "People",
            name: "Diarrhoea patients",
        },
        ("tree_crops", "flood") => ImpactFunctionDef {
            hazard_code: "D",
            id: 201,
            intensity: FLOOD_DEPTH_STEPS,
            mean_damage: TREE_CROPS_FLOOD_DAMAGE,
            intensity_unit: "SPI",
            name: "Tree crops",
        },
        ("grass_crops", "flood") => ImpactFunctionDef {
            hazard_code: "D",
            id: 202,
            intensity: FLOOD_DEPTH_STEPS,
            mean_damage: GRASS_CROPS_FLOOD_DAMAGE,
            intensity_unit: "SPI",
            name: "Grass crops",
        },
        ("wet_markets", "flood") => ImpactFunctionDef {
            hazard_code: "D",
            id: 203,
            intensity: FLOOD_DEPTH_STEPS,
            mean_damage: GRASS_CROPS_FLOOD_DAMAGE,
            intensity_unit: "SPI",
            name: "Markets",
        },
        ("roads", "flood") => ImpactFunctionDef {
            hazard_code: "D",
            id: 301,
            intensity: &[0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6],
            mean_damage: &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0],
            intensity_unit: "SPI",
            name: "Mobility",
        },
        ("tree_crops_farmers", "drought") => ImpactFunctionDef {
            hazard_code: "D",
            id: 103,
            intensity: SPI_STEPS,
            mean_damage: &[0.6667, 0.6667, 0.3906, 0.2232, 0.1216, 0.06, 0.0227, 0.0, 0.0],
            intensity_unit: "SPI",
            name: "Tree crop farmers",
        },
        ("grass_crops_farmers", "drought") => ImpactFunctionDef {
            hazard_code: "D",
            id: 104,
            intensity: SPI_STEPS,
            mean_damage: &[1.0, 1.0, 1.0, 0.7365, 0.4013, 0.1981, 0.0748, 0.0, 0.0],
            intensity_unit: "SPI",
            name: "Tree crop farmers",
        },
        ("water_users", "drought") => ImpactFunctionDef {
            hazard_code: "D",
            id: 105,
            intensity: SPI_STEPS,
            mean_damage: &[1.0, 0.5871, 0.3362, 0.1925, 0.1102, 0.0631, 0.0361, 0.0207, 0.0119],
            intensity_unit: "SPI",
            name: "Unmet water demand",
        },
        ("tree_crops", "drought") => ImpactFunctionDef {
            hazard_code: "D",
            id: 201,
            intensity: SPI_STEPS,
            mean_damage: &[0.4667, 0.1867, 0.0706, 0.0332, 0.0216, 0.013, 0.0107, 0.0, 0.0],
            intensity_unit: "SPI",
            name: "Tree crops",
        },
        ("grass_crops", "drought") => ImpactFunctionDef {
            hazard_code: "D",
            id: 202,
            intensity: SPI_STEPS,
            mean_damage: &[0.6, 0.2, 0.15, 0.1, 0.0713, 0.0381, 0.0148, 0.0, 0.0],
            intensity_unit: "SPI",
            name: "Grass crops",
        },
        ("wet_markets", "drought") => ImpactFunctionDef {
            hazard_code: "D",
            id: 203,
            intensity: SPI_STEPS,
            mean_damage: &[0.7, 0.25, 0.18, 0.12, 0.0613, 0.0381, 0.0148, 0.0, 0.0],
            intensity_unit: "SPI",
            name: "Markets",
        },
        _ => ImpactFunctionDef::DEFAULT,
    }
}

/// Default impact function id per hazard type code.
#[must_use]
pub fn default_function_id(hazard_code: &str) -> u16 {
    match hazard_code {
        "TC" => 1,
        "RF" => 3,
        "BF" => 4,
        "FL" => 5,
        "EQ" => 6,
        _ => 9,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_pair_returns_its_curve() {
        let impf = impact_function("students", "flood");
        assert_eq!(impf.id, 102);
        assert_eq!(impf.hazard_code, "FL");
        assert_eq!(impf.intensity.len(), impf.mean_damage.len());
        assert_eq!(impf.affected_fraction(), vec![1.0; 12]);
    }

    #[test]
    fn drought_and_flood_curves_differ() {
        assert_ne!(
            impact_function("tree_crops", "flood"),
            impact_function("tree_crops", "drought")
        );
    }

    #[test]
    fn unknown_pair_falls_back_to_default() {
        assert_eq!(
            impact_function("hotels", "earthquake"),
            ImpactFunctionDef::DEFAULT
        );
    }

    #[test]
    fn curves_have_matching_axis_lengths() {
        let pairs = [
            ("buddhist_monks", "flood"),
            ("students", "flood"),
            ("tree_crops_farmers", "flood"),
            ("grass_crops_farmers", "flood"),
            ("diarrhea_patients", "flood"),
            ("tree_crops", "flood"),
            ("grass_crops", "flood"),
            ("wet_markets", "flood"),
            ("roads", "flood"),
            ("tree_crops_farmers", "drought"),
            ("grass_crops_farmers", "drought"),
            ("water_users", "drought"),
            ("tree_crops", "drought"),
            ("grass_crops", "drought"),
            ("wet_markets", "drought"),
        ];
        for (exposure, hazard) in pairs {
            let impf = impact_function(exposure, hazard);
            assert_eq!(
                impf.intensity.len(),
                impf.mean_damage.len(),
                "{exposure}/{hazard}"
            );
        }
    }

    #[test]
    fn default_ids_by_hazard() {
        assert_eq!(default_function_id("FL"), 5);
        assert_eq!(default_function_id("TC"), 1);
        assert_eq!(default_function_id("XX"), 9);
    }
}
