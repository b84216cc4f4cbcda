//! KML (Keyhole Markup Language) point extraction
//!
//! Reads a KML or KMZ file and returns the point coordinates of the placemarks
//! held directly by its `<Document>`, in document order.
//!
//! ## Example
//!
//! ```no_run
//! use location_hierarchy_kml::extract_coordinates;
//!
//! let coordinates = extract_coordinates("survey.kml")?;
//! println!("Found {} points", coordinates.len());
//! # Ok::<(), location_hierarchy_kml::KmlError>(())
//! ```

use crate::error::{KmlError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A point location as decimal-degree text
///
/// Values are kept exactly as written in the document (trimmed), so they
/// reach the geocoding query and the report without reformatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude (degrees)
    pub latitude: String,
    /// Longitude (degrees)
    pub longitude: String,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude text
    #[must_use]
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    /// Parse a KML coordinate tuple, `lon,lat[,alt]`.
    ///
    /// Tokens are split on commas and trimmed. Returns `None` when either of
    /// the first two tokens is missing or blank.
    ///
    /// ```
    /// use location_hierarchy_kml::Coordinate;
    ///
    /// let c = Coordinate::from_tuple(" -48.123, -1.4560, 10 ").unwrap();
    /// assert_eq!(c, Coordinate::new("-1.4560", "-48.123"));
    /// assert_eq!(Coordinate::from_tuple("-48.123"), None);
    /// ```
    #[must_use]
    pub fn from_tuple(text: &str) -> Option<Self> {
        // A whitespace-separated tuple list keeps only its first tuple
        let mut tokens = text
            .split(',')
            .map(|token| token.split_whitespace().next().unwrap_or_default());

        let longitude = tokens.next().filter(|t| !t.is_empty())?;
        let latitude = tokens.next().filter(|t| !t.is_empty())?;

        Some(Self::new(latitude, longitude))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Extract point coordinates from a KML or KMZ file
///
/// Files with a `.kmz` extension are opened as ZIP archives and the first
/// KML entry is used.
///
/// # Errors
///
/// - [`KmlError::Io`] if the file cannot be opened or read
/// - [`KmlError::Parse`] if the document or archive is malformed
/// - [`KmlError::NoCoordinates`] if no placemark carries a point
#[must_use = "this function returns extracted coordinates that should be processed"]
pub fn extract_coordinates<P: AsRef<Path>>(path: P) -> Result<Vec<Coordinate>> {
    let path = path.as_ref();

    let is_kmz = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("kmz"));

    let file = File::open(path)?;

    let kml_content = if is_kmz {
        read_kmz(file)?
    } else {
        let mut reader = BufReader::new(file);
        let mut kml_content = String::new();
        reader.read_to_string(&mut kml_content)?;
        kml_content
    };

    extract_coordinates_from_str(&kml_content)
}

/// Extract point coordinates from KML text
///
/// Only `Placemark` elements that are direct children of the `Document`
/// count, and only through their own `Point/coordinates`. Placemarks with no
/// point, or a point without a usable coordinate string, are skipped.
///
/// # Errors
///
/// - [`KmlError::Parse`] if the text is not well-formed XML
/// - [`KmlError::NoCoordinates`] if there is no `<Document>` or none of its
///   placemarks carries a point
pub fn extract_coordinates_from_str(content: &str) -> Result<Vec<Coordinate>> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut state = ExtractState::default();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => state.open(e.local_name().as_ref()),
            Ok(Event::Empty(e)) => {
                // `<Document/>` is a document with no placemarks
                if state.is_document_position(e.local_name().as_ref()) {
                    state.found_document = true;
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(text) = state.coordinates_text.as_mut() {
                    let unescaped = e
                        .unescape()
                        .map_err(|e| KmlError::Parse(format!("Failed to parse KML: {e}")))?;
                    text.push_str(&unescaped);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(text) = state.coordinates_text.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::End(_)) => state.close(),
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(KmlError::Parse(format!(
                    "Failed to parse KML at position {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    if !state.found_document || state.coordinates.is_empty() {
        return Err(KmlError::NoCoordinates);
    }

    Ok(state.coordinates)
}

const KML: &[u8] = b"kml";
const DOCUMENT: &[u8] = b"Document";
const PLACEMARK: &[u8] = b"Placemark";
const POINT: &[u8] = b"Point";
const COORDINATES: &[u8] = b"coordinates";

/// Walk state for [`extract_coordinates_from_str`]
#[derive(Default)]
struct ExtractState {
    /// Local names of the currently open elements
    stack: Vec<Vec<u8>>,
    /// Depth of the `<Document>` being read
    document: Option<usize>,
    found_document: bool,
    /// Coordinate of the placemark being read
    placemark: Option<Coordinate>,
    /// Text of the `Point/coordinates` element being read
    coordinates_text: Option<String>,
    coordinates: Vec<Coordinate>,
}

impl ExtractState {
    /// The first `Document`, either the root or a child of the `kml` root.
    fn is_document_position(&self, name: &[u8]) -> bool {
        name == DOCUMENT
            && !self.found_document
            && match self.stack.as_slice() {
                [] => true,
                [root] => root.as_slice() == KML,
                _ => false,
            }
    }

    /// Whether the elements open below the document are exactly `path`
    fn at(&self, path: &[&[u8]]) -> bool {
        self.document.is_some_and(|depth| {
            self.stack.len() == depth + 1 + path.len()
                && self.stack[depth + 1..]
                    .iter()
                    .zip(path)
                    .all(|(open, &name)| open.as_slice() == name)
        })
    }

    fn open(&mut self, name: &[u8]) {
        if self.is_document_position(name) {
            self.document = Some(self.stack.len());
            self.found_document = true;
        } else if name == PLACEMARK && self.at(&[]) {
            self.placemark = None;
        } else if name == COORDINATES && self.at(&[PLACEMARK, POINT]) {
            self.coordinates_text = Some(String::new());
        }

        self.stack.push(name.to_vec());
    }

    fn close(&mut self) {
        self.stack.pop();

        if let Some(text) = self.coordinates_text.take() {
            // A placemark holds a single point; the first one wins
            if self.placemark.is_none() {
                self.placemark = Coordinate::from_tuple(&text);
            }
        } else if self.at(&[]) {
            // Closed a direct child of the document
            if let Some(coordinate) = self.placemark.take() {
                self.coordinates.push(coordinate);
            }
        } else if self.document == Some(self.stack.len()) {
            self.document = None;
        }
    }
}

/// Read the KML entry out of a KMZ archive
fn read_kmz(file: File) -> Result<String> {
    let mut zip = zip::ZipArchive::new(file)
        .map_err(|e| KmlError::Parse(format!("Failed to open KMZ archive: {e}")))?;

    let mut kml_entry_index = None;

    for i in 0..zip.len() {
        let entry = zip
            .by_index(i)
            .map_err(|e| KmlError::Parse(format!("Failed to read archive entry: {e}")))?;

        let name = entry.name();
        if name.eq_ignore_ascii_case("doc.kml")
            || Path::new(name)
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("kml"))
        {
            kml_entry_index = Some(i);
            break;
        }
    }

    let kml_entry_index = kml_entry_index
        .ok_or_else(|| KmlError::Parse("No KML file found in KMZ archive".to_string()))?;

    let mut kml_file = zip
        .by_index(kml_entry_index)
        .map_err(|e| KmlError::Parse(format!("Failed to read KML from KMZ: {e}")))?;

    let mut kml_content = String::new();
    kml_file.read_to_string(&mut kml_content)?;

    Ok(kml_content)
}
