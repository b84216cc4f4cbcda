//! # location-hierarchy
//!
//! Reverse-geocodes the point placemarks of a KML document and writes the
//! administrative hierarchy of each point to a CSV report.
//!
//! ## Overview
//!
//! The batch is a single forward pipeline:
//! 1. Extract point coordinates from the input KML/KMZ
//! 2. Resolve each coordinate, one request at a time, through the `OpenCage` API
//! 3. Map the first result's address components to postcode, state,
//!    municipality, district and community, each with a short code
//! 4. Write every resolved coordinate to the CSV report
//!
//! Coordinates that return no result, or whose request fails, are logged and
//! left out of the report.
//!
//! ## Example Usage
//!
//! ```no_run
//! use location_hierarchy::{pipeline, Config, ConfigLayer, OpenCageClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::load(None, ConfigLayer::default())?;
//! let client = OpenCageClient::from_config(&config);
//!
//! let summary = pipeline::run(&config, &client).await?;
//! println!("{} of {} coordinates resolved", summary.resolved, summary.coordinates);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Layered run configuration
//! - [`geocoder`] - Reverse-geocoding trait and the `OpenCage` client
//! - [`models`] - Location records, report rows and run summaries
//! - [`pipeline`] - The extract → resolve → report batch
//! - [`report`] - CSV output
//! - [`short_code`] - Four-letter codes derived from place names

pub mod config;
pub mod error;
pub mod geocoder;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod short_code;

pub use config::{Config, ConfigLayer};
pub use error::{ConfigError, GeocodeError, PipelineError, ReportError};
pub use geocoder::{location_from_components, opencage::OpenCageClient, ReverseGeocoder};
pub use location_hierarchy_kml::Coordinate;
pub use models::{LocationRecord, ReportRow, RunSummary, UNKNOWN};
pub use report::{write_report, write_rows, REPORT_HEADER};
pub use short_code::{short_code, SHORT_CODE_LEN};
