//! Reverse geocoding.
//!
//! [`ReverseGeocoder`] is the seam the pipeline drives: one coordinate in, an
//! optional [`LocationRecord`] out. Implementations absorb their own failures
//! and report them through logging, so a `None` covers both "no result" and
//! "request failed".
//!
//! ## Submodules
//!
//! - [`opencage`] - `OpenCage` Geocoding API client

pub mod opencage;

use crate::models::{LocationRecord, UNKNOWN};
use async_trait::async_trait;
use location_hierarchy_kml::Coordinate;
use serde_json::{Map, Value};

/// Resolves a coordinate to its administrative hierarchy
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Resolve one coordinate. `None` means the coordinate should be skipped.
    async fn resolve(&self, coordinate: &Coordinate) -> Option<LocationRecord>;
}

/// Provider keys tried for the municipality, in order
pub const MUNICIPALITY_KEYS: &[&str] = &["city", "town", "village"];
/// Provider keys tried for the district, in order
pub const DISTRICT_KEYS: &[&str] = &["suburb", "county"];
/// Provider keys tried for the community, in order
pub const COMMUNITY_KEYS: &[&str] = &["hamlet", "neighbourhood"];

/// Map a provider's address components onto a [`LocationRecord`].
///
/// Each field takes the first present key of its fallback chain, or
/// [`UNKNOWN`] when none is present.
#[must_use]
pub fn location_from_components(components: &Map<String, Value>) -> LocationRecord {
    LocationRecord::new(
        first_present(components, &["postcode"]),
        first_present(components, &["state"]),
        first_present(components, MUNICIPALITY_KEYS),
        first_present(components, DISTRICT_KEYS),
        first_present(components, COMMUNITY_KEYS),
    )
}

/// First key whose value is a non-empty string or a number.
fn first_present(components: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| match components.get(*key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| UNKNOWN.to_string())
}
