//! Extract → resolve → report.
//!
//! Coordinates are resolved strictly one after another: the next request is
//! not sent until the previous one has settled. Misses and failed requests
//! drop the coordinate and the loop moves on; rows stay in input order with
//! no placeholders for skipped points.

use crate::config::Config;
use crate::error::Result;
use crate::geocoder::ReverseGeocoder;
use crate::models::{ReportRow, RunSummary};
use crate::report::write_report;
use location_hierarchy_kml::{extract_coordinates, Coordinate};
use tracing::info;

/// Run the whole batch: extract coordinates, resolve each, write the report.
///
/// # Errors
///
/// Returns [`crate::PipelineError::Input`] if the input yields no coordinates
/// (or cannot be read), before any request is made, and
/// [`crate::PipelineError::Report`] if the report cannot be written.
pub async fn run<G>(config: &Config, geocoder: &G) -> Result<RunSummary>
where
    G: ReverseGeocoder + ?Sized,
{
    let coordinates = extract_coordinates(&config.input)?;
    info!(
        "Extracted {} coordinates from {}",
        coordinates.len(),
        config.input.display()
    );

    let rows = resolve_all(&coordinates, geocoder).await;

    write_report(&config.output, &rows)?;
    info!("Done! Data saved to {}", config.output.display());

    Ok(RunSummary {
        coordinates: coordinates.len(),
        resolved: rows.len(),
        skipped: coordinates.len() - rows.len(),
        output: config.output.clone(),
    })
}

/// Resolve coordinates in order, keeping only those that resolved.
pub async fn resolve_all<G>(coordinates: &[Coordinate], geocoder: &G) -> Vec<ReportRow>
where
    G: ReverseGeocoder + ?Sized,
{
    let mut rows = Vec::with_capacity(coordinates.len());

    for coordinate in coordinates {
        info!("Processing: {}", coordinate);

        if let Some(location) = geocoder.resolve(coordinate).await {
            rows.push(ReportRow::new(coordinate.clone(), location));
        }
    }

    rows
}
