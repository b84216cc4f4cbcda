//! Error types for the geocoding pipeline

use location_hierarchy_kml::KmlError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from a single reverse-geocoding request
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Transport failure (connection, TLS, body read)
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx response from the provider
    #[error("API error ({status}): {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as returned by the provider
        body: String,
    },

    /// Body was not the expected JSON shape
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors while writing the CSV report
#[derive(Debug, Error)]
pub enum ReportError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API key in any configuration layer, and none built into the binary
    #[error(
        "Missing OpenCage API key: this build has no built-in key, so set OPENCAGE_API_KEY \
         at runtime or api_key in the config file"
    )]
    MissingApiKey,

    /// Config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        /// Path of the config file
        path: PathBuf,
        /// Underlying IO error
        source: io::Error,
    },

    /// Config file is not valid TOML
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        /// Path of the config file
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },
}

/// Errors that end a pipeline run
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input document could not be turned into coordinates
    #[error("Failed to extract coordinates: {0}")]
    Input(#[from] KmlError),

    /// Report could not be written
    #[error("Failed to write report: {0}")]
    Report(#[from] ReportError),
}

impl PipelineError {
    /// Whether the process should terminate abnormally.
    ///
    /// Only an input without coordinates is fatal; read, parse and write
    /// failures are logged and the run ends normally.
    #[inline]
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Input(e) if e.is_no_coordinates())
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
