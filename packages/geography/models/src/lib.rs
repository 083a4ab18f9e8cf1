#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Administrative boundary attribute types.
//!
//! These types describe the political subdivisions used for spatial
//! aggregation, independent of the polygon geometry they annotate.

use serde::{Deserialize, Serialize};

/// Administrative subdivision depth for one country.
///
/// Depth 1 is the coarse subdivision (regions/provinces), depth 2 the fine
/// one (districts). The overlay uses depth 2 only; the report joins both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdminLevel {
    /// Coarse subdivision (e.g. province).
    One,
    /// Fine subdivision (e.g. district).
    Two,
}

impl AdminLevel {
    /// Numeric depth as used by the boundary-data collaborator.
    #[must_use]
    pub const fn depth(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

/// Attributes carried by one administrative polygon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAttributes {
    /// Subdivision name (e.g. "Bangkok").
    pub name: String,
    /// Owning country identifier.
    pub country: String,
}
