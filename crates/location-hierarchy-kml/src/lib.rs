//! # location-hierarchy-kml
//!
//! Point coordinate extraction from KML documents.
//!
//! This crate reads a KML (or zipped KMZ) file and returns the point
//! coordinates of the placemarks held by its `<Document>`, in document order.
//! Everything else in the file (folders, paths, polygons, styles) is ignored.
//!
//! ## Supported Formats
//!
//! | Format | Extension | Description |
//! |--------|-----------|-------------|
//! | KML | `.kml` | Keyhole Markup Language (Google Earth) |
//! | KMZ | `.kmz` | Compressed KML (ZIP archive) |
//!
//! ## Quick Start
//!
//! ```no_run
//! use location_hierarchy_kml::extract_coordinates;
//!
//! let coordinates = extract_coordinates("Fornecimento_CAMTAUA.kml")?;
//!
//! for coordinate in &coordinates {
//!     println!("{}°, {}°", coordinate.latitude, coordinate.longitude);
//! }
//! # Ok::<(), location_hierarchy_kml::KmlError>(())
//! ```
//!
//! ## Coordinate Order
//!
//! KML writes coordinates as `longitude,latitude[,altitude]`. The first value
//! becomes [`Coordinate::longitude`] and the second [`Coordinate::latitude`];
//! altitude is dropped. Values stay text, trimmed but otherwise as written.
//! The order is taken on trust, so a document with the two values swapped
//! produces swapped fields.
//!
//! ## Error Handling
//!
//! ```no_run
//! use location_hierarchy_kml::{extract_coordinates, KmlError};
//!
//! match extract_coordinates("survey.kml") {
//!     Ok(coords) => println!("Extracted {} points", coords.len()),
//!     Err(KmlError::NoCoordinates) => println!("Nothing to geocode"),
//!     Err(KmlError::Io(e)) => println!("File error: {}", e),
//!     Err(e) => println!("Error: {}", e),
//! }
//! ```

pub mod error;
pub mod kml;

pub use crate::error::{KmlError, Result};
pub use crate::kml::{extract_coordinates, extract_coordinates_from_str, Coordinate};
