//! Data models for resolved locations and report rows.
//!
//! - [`LocationRecord`] - Administrative hierarchy for one coordinate
//! - [`ReportRow`] - A coordinate joined with its resolved location
//! - [`RunSummary`] - Counters for a finished pipeline run

use crate::short_code::short_code;
use location_hierarchy_kml::Coordinate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Placeholder for attributes the provider did not return
pub const UNKNOWN: &str = "Unknown";

/// Administrative hierarchy resolved for a single coordinate.
///
/// Every `*_code` field is [`short_code`] of its sibling name, including when
/// the name is [`UNKNOWN`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Postal code
    pub postcode: String,
    /// State name
    pub state: String,
    /// Short code of the state
    pub state_code: String,
    /// City, town or village
    pub municipality: String,
    /// Short code of the municipality
    pub municipality_code: String,
    /// Suburb or county
    pub district: String,
    /// Short code of the district
    pub district_code: String,
    /// Hamlet or neighbourhood
    pub community: String,
    /// Short code of the community
    pub community_code: String,
}

impl LocationRecord {
    /// Build a record from resolved names, deriving the short codes.
    #[must_use]
    pub fn new(
        postcode: impl Into<String>,
        state: impl Into<String>,
        municipality: impl Into<String>,
        district: impl Into<String>,
        community: impl Into<String>,
    ) -> Self {
        let state = state.into();
        let municipality = municipality.into();
        let district = district.into();
        let community = community.into();

        Self {
            postcode: postcode.into(),
            state_code: short_code(&state),
            state,
            municipality_code: short_code(&municipality),
            municipality,
            district_code: short_code(&district),
            district,
            community_code: short_code(&community),
            community,
        }
    }

    /// Record with every attribute set to [`UNKNOWN`]
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(UNKNOWN, UNKNOWN, UNKNOWN, UNKNOWN, UNKNOWN)
    }
}

/// One line of the output report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Coordinate as extracted from the input document
    pub coordinate: Coordinate,
    /// Resolved administrative hierarchy
    pub location: LocationRecord,
}

impl ReportRow {
    /// Join a coordinate with its resolved location
    #[inline]
    #[must_use]
    pub const fn new(coordinate: Coordinate, location: LocationRecord) -> Self {
        Self {
            coordinate,
            location,
        }
    }

    /// Field values in report column order
    #[must_use]
    pub fn to_record(&self) -> [String; 11] {
        let location = &self.location;
        [
            self.coordinate.latitude.clone(),
            self.coordinate.longitude.clone(),
            location.postcode.clone(),
            location.state.clone(),
            location.state_code.clone(),
            location.municipality.clone(),
            location.municipality_code.clone(),
            location.district.clone(),
            location.district_code.clone(),
            location.community.clone(),
            location.community_code.clone(),
        ]
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Coordinates extracted from the input
    pub coordinates: usize,
    /// Coordinates written to the report
    pub resolved: usize,
    /// Coordinates skipped after a miss or a failed request
    pub skipped: usize,
    /// Path of the written report
    pub output: PathBuf,
}
