//! `OpenCage` Geocoding API client.
//!
//! Issues one `GET` per coordinate and maps the first result's `components`
//! onto a [`LocationRecord`].
//!
//! ## Example
//!
//! ```no_run
//! use location_hierarchy::geocoder::opencage::OpenCageClient;
//! use location_hierarchy_kml::Coordinate;
//!
//! # async fn example() -> Result<(), location_hierarchy::GeocodeError> {
//! let client = OpenCageClient::new(std::env::var("OPENCAGE_API_KEY").unwrap_or_default());
//!
//! if let Some(location) = client.lookup(&Coordinate::new("-1.72", "-48.88")).await? {
//!     println!("{} / {}", location.state, location.municipality);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Request
//!
//! | Parameter | Value |
//! |-----------|-------|
//! | `q` | `{latitude},{longitude}` |
//! | `key` | API key |
//! | `language` | response language hint (default `pt`) |
//! | `countrycode` | country restriction hint (default `br`) |
//!
//! No timeout is set and failed requests are not retried.

use super::{location_from_components, ReverseGeocoder};
use crate::config::Config;
use crate::error::GeocodeError;
use crate::models::LocationRecord;
use async_trait::async_trait;
use location_hierarchy_kml::Coordinate;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

/// Public `OpenCage` forward/reverse geocoding endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.opencagedata.com/geocode/v1/json";
/// Default response language hint
pub const DEFAULT_LANGUAGE: &str = "pt";
/// Default country-code hint
pub const DEFAULT_COUNTRY_CODE: &str = "br";

/// Geocoding response. Only `results` is read.
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    components: Map<String, Value>,
}

/// HTTP client for the `OpenCage` API
#[derive(Debug, Clone)]
pub struct OpenCageClient {
    /// Reqwest HTTP client
    client: Client,
    /// Endpoint URL, without query
    endpoint: String,
    /// `OpenCage` API key
    api_key: String,
    /// `language` query parameter
    language: String,
    /// `countrycode` query parameter
    country_code: String,
}

impl OpenCageClient {
    /// Create a client for the public endpoint with the default hints
    #[must_use = "creates OpenCage client with API key"]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
        }
    }

    /// Create a client from loaded configuration
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_key.clone())
            .with_endpoint(config.endpoint.clone())
            .with_hints(config.language.clone(), config.country_code.clone())
    }

    /// Use a different endpoint URL
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Use different `language` and `countrycode` hints
    #[must_use]
    pub fn with_hints(
        mut self,
        language: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        self.language = language.into();
        self.country_code = country_code.into();
        self
    }

    /// Use a preconfigured HTTP client
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Endpoint URL requests are sent to
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Look up one coordinate.
    ///
    /// Returns `Ok(None)` when the provider answers with an empty `results`
    /// array.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Request`] on transport failure
    /// - [`GeocodeError::Status`] on a non-2xx response
    /// - [`GeocodeError::Decode`] if the body is not a geocoding response
    pub async fn lookup(
        &self,
        coordinate: &Coordinate,
    ) -> Result<Option<LocationRecord>, GeocodeError> {
        let query = format!("{},{}", coordinate.latitude, coordinate.longitude);

        // without_url: the URL carries the API key
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query.as_str()),
                ("key", self.api_key.as_str()),
                ("language", self.language.as_str()),
                ("countrycode", self.country_code.as_str()),
            ])
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        let parsed: GeocodeResponse = serde_json::from_str(&body)?;
        debug!("{} result(s) for {}", parsed.results.len(), coordinate);

        Ok(parsed
            .results
            .first()
            .map(|result| location_from_components(&result.components)))
    }
}

#[async_trait]
impl ReverseGeocoder for OpenCageClient {
    async fn resolve(&self, coordinate: &Coordinate) -> Option<LocationRecord> {
        match self.lookup(coordinate).await {
            Ok(Some(location)) => Some(location),
            Ok(None) => {
                warn!("No results for {}", coordinate);
                None
            }
            Err(e) => {
                error!("API error for {}: {}", coordinate, e);
                None
            }
        }
    }
}
