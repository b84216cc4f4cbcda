//! CSV report output.
//!
//! The report always starts with the fixed header below, even when no
//! coordinate resolved.
//!
//! | Column | Source |
//! |--------|--------|
//! | Latitude, Longitude | extracted coordinate |
//! | Postcode | `postcode` |
//! | State, State Code | `state` |
//! | Municipality, Municipality Code | `city` / `town` / `village` |
//! | District, District Code | `suburb` / `county` |
//! | Community, Community Code | `hamlet` / `neighbourhood` |

use crate::error::ReportError;
use crate::models::ReportRow;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Report column titles, in output order
pub const REPORT_HEADER: [&str; 11] = [
    "Latitude",
    "Longitude",
    "Postcode",
    "State",
    "State Code",
    "Municipality",
    "Municipality Code",
    "District",
    "District Code",
    "Community",
    "Community Code",
];

/// Write the report to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_report(path: &Path, rows: &[ReportRow]) -> Result<(), ReportError> {
    let file = File::create(path)?;
    write_rows(file, rows)
}

/// Write the header and `rows` as CSV to any writer.
///
/// # Errors
///
/// Returns an error if writing or flushing fails.
pub fn write_rows<W: Write>(writer: W, rows: &[ReportRow]) -> Result<(), ReportError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    writer.write_record(REPORT_HEADER)?;
    for row in rows {
        writer.write_record(row.to_record())?;
    }
    writer.flush()?;

    Ok(())
}
