//! Error types for coordinate extraction

use std::io;
use thiserror::Error;

/// Errors that can occur while extracting coordinates from a KML document
#[derive(Debug, Error)]
pub enum KmlError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// KML or KMZ parsing error
    #[error("KML parsing error: {0}")]
    Parse(String),

    /// The document has no placemark collection, or none of its placemarks has a point
    #[error("No coordinates found in KML document")]
    NoCoordinates,
}

impl KmlError {
    /// Whether the error means the document held nothing to process.
    #[inline]
    #[must_use]
    pub const fn is_no_coordinates(&self) -> bool {
        matches!(self, Self::NoCoordinates)
    }
}

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, KmlError>;
