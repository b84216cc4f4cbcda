//! Run configuration.
//!
//! A [`Config`] is assembled once at startup and passed down by reference.
//! Values are layered, later layers winning:
//!
//! | Layer | Source |
//! |-------|--------|
//! | defaults | built-in paths, endpoint and hints |
//! | user file | `~/.location-hierarchy.toml` |
//! | project file | `./.location-hierarchy.toml`, or the file given with `--config` |
//! | environment | `OPENCAGE_API_KEY`, `LOCATION_HIERARCHY_*` |
//! | command line | `--input`, `--output`, `--endpoint`, `--language`, `--country-code` |
//!
//! When no layer supplies an API key, the `OPENCAGE_API_KEY` value present at
//! build time is used. A key that is still missing or blank is a
//! [`ConfigError::MissingApiKey`].
//!
//! Config file syntax (every key optional):
//!
//! ```toml
//! api_key = "..."
//! input = "Fornecimento_CAMTAUA.kml"
//! output = "location_hierarchy.csv"
//! endpoint = "https://api.opencagedata.com/geocode/v1/json"
//! language = "pt"
//! country_code = "br"
//! ```

use crate::error::ConfigError;
use crate::geocoder::opencage::{DEFAULT_COUNTRY_CODE, DEFAULT_ENDPOINT, DEFAULT_LANGUAGE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default input document
pub const DEFAULT_INPUT: &str = "Fornecimento_CAMTAUA.kml";
/// Default report path
pub const DEFAULT_OUTPUT: &str = "location_hierarchy.csv";
/// Name of the user and project config files
pub const CONFIG_FILE_NAME: &str = ".location-hierarchy.toml";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "OPENCAGE_API_KEY";
/// Environment variable overriding the input path
pub const INPUT_ENV: &str = "LOCATION_HIERARCHY_INPUT";
/// Environment variable overriding the report path
pub const OUTPUT_ENV: &str = "LOCATION_HIERARCHY_OUTPUT";
/// Environment variable overriding the endpoint URL
pub const ENDPOINT_ENV: &str = "LOCATION_HIERARCHY_ENDPOINT";
/// Environment variable overriding the language hint
pub const LANGUAGE_ENV: &str = "LOCATION_HIERARCHY_LANGUAGE";
/// Environment variable overriding the country-code hint
pub const COUNTRY_CODE_ENV: &str = "LOCATION_HIERARCHY_COUNTRY_CODE";

/// API key compiled into the binary, if any
const BUILT_IN_API_KEY: Option<&str> = option_env!("OPENCAGE_API_KEY");

/// Fully resolved configuration for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `OpenCage` API key
    pub api_key: String,
    /// Input KML or KMZ document
    pub input: PathBuf,
    /// Output CSV report
    pub output: PathBuf,
    /// Geocoding endpoint URL
    pub endpoint: String,
    /// Response language hint
    pub language: String,
    /// Country-code hint
    pub country_code: String,
}

/// One layer of optional settings (config file, environment or command line)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigLayer {
    /// `OpenCage` API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Input document path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,
    /// Report path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Endpoint URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Language hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Country-code hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

impl ConfigLayer {
    /// Load a layer from a TOML file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let layer: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(layer.without_blanks())
    }

    /// Layer read from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Layer read through an environment-style lookup. Blank values count as unset.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_key: lookup(API_KEY_ENV),
            input: lookup(INPUT_ENV).map(PathBuf::from),
            output: lookup(OUTPUT_ENV).map(PathBuf::from),
            endpoint: lookup(ENDPOINT_ENV),
            language: lookup(LANGUAGE_ENV),
            country_code: lookup(COUNTRY_CODE_ENV),
        }
        .without_blanks()
    }

    /// Overlay `higher` on top of `self`; values set in `higher` win.
    #[must_use]
    pub fn merge(self, higher: Self) -> Self {
        Self {
            api_key: higher.api_key.or(self.api_key),
            input: higher.input.or(self.input),
            output: higher.output.or(self.output),
            endpoint: higher.endpoint.or(self.endpoint),
            language: higher.language.or(self.language),
            country_code: higher.country_code.or(self.country_code),
        }
    }

    fn without_blanks(self) -> Self {
        fn text(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }
        fn path(value: Option<PathBuf>) -> Option<PathBuf> {
            value.filter(|p| !p.as_os_str().is_empty())
        }

        Self {
            api_key: text(self.api_key),
            input: path(self.input),
            output: path(self.output),
            endpoint: text(self.endpoint),
            language: text(self.language),
            country_code: text(self.country_code),
        }
    }
}

impl Config {
    /// Assemble configuration from every layer.
    ///
    /// `config_file` replaces project config discovery; unlike a discovered
    /// file, it must load cleanly. `cli` is the command-line layer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] when no key is available, or a
    /// read/parse error for an explicit `config_file`.
    pub fn load(config_file: Option<&Path>, cli: ConfigLayer) -> Result<Self, ConfigError> {
        let mut layers = ConfigLayer::default();

        if let Some(user) = dirs::home_dir()
            .map(|home| home.join(CONFIG_FILE_NAME))
            .and_then(|path| load_discovered(&path))
        {
            layers = layers.merge(user);
        }

        match config_file {
            Some(path) => layers = layers.merge(ConfigLayer::load_from_file(path)?),
            None => {
                if let Some(project) = load_discovered(Path::new(CONFIG_FILE_NAME)) {
                    layers = layers.merge(project);
                }
            }
        }

        let layers = layers.merge(ConfigLayer::from_env()).merge(cli);
        Self::from_layer(layers, BUILT_IN_API_KEY)
    }

    /// Fill a merged layer with defaults.
    ///
    /// `fallback_api_key` is used when the layer has no key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] when neither source has a
    /// non-blank key.
    pub fn from_layer(
        layer: ConfigLayer,
        fallback_api_key: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let api_key = layer
            .api_key
            .or_else(|| fallback_api_key.map(str::to_string))
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            api_key,
            input: layer.input.unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
            output: layer.output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            endpoint: layer.endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            language: layer.language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            country_code: layer
                .country_code
                .unwrap_or_else(|| DEFAULT_COUNTRY_CODE.to_string()),
        })
    }
}

/// Load a discovered config file; failures are reported and skipped.
fn load_discovered(path: &Path) -> Option<ConfigLayer> {
    if !path.exists() {
        return None;
    }

    match ConfigLayer::load_from_file(path) {
        Ok(layer) => {
            debug!("Loaded config from {}", path.display());
            Some(layer)
        }
        Err(e) => {
            warn!("Ignoring config file: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn with_key(key: &str) -> ConfigLayer {
        ConfigLayer {
            api_key: Some(key.to_string()),
            ..ConfigLayer::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_layer(with_key("abc"), None).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.input, PathBuf::from("Fornecimento_CAMTAUA.kml"));
        assert_eq!(config.output, PathBuf::from("location_hierarchy.csv"));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.language, "pt");
        assert_eq!(config.country_code, "br");
    }

    #[test]
    fn test_missing_api_key() {
        let err = Config::from_layer(ConfigLayer::default(), None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));

        let err = Config::from_layer(ConfigLayer::default(), Some("  ")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn test_fallback_api_key() {
        let config = Config::from_layer(ConfigLayer::default(), Some("built-in")).unwrap();
        assert_eq!(config.api_key, "built-in");

        let config = Config::from_layer(with_key("configured"), Some("built-in")).unwrap();
        assert_eq!(config.api_key, "configured");
    }

    #[test]
    fn test_merge_precedence() {
        let file = ConfigLayer {
            api_key: Some("file-key".to_string()),
            input: Some(PathBuf::from("file.kml")),
            language: Some("en".to_string()),
            ..ConfigLayer::default()
        };
        let cli = ConfigLayer {
            input: Some(PathBuf::from("cli.kml")),
            ..ConfigLayer::default()
        };

        let merged = file.merge(cli);
        assert_eq!(merged.api_key.as_deref(), Some("file-key"));
        assert_eq!(merged.input, Some(PathBuf::from("cli.kml")));
        assert_eq!(merged.language.as_deref(), Some("en"));
        assert_eq!(merged.output, None);
    }

    #[test]
    fn test_from_lookup_ignores_blank_values() {
        let env: HashMap<&str, &str> = [
            (API_KEY_ENV, ""),
            (OUTPUT_ENV, "out.csv"),
            (COUNTRY_CODE_ENV, "  "),
        ]
        .into_iter()
        .collect();

        let layer = ConfigLayer::from_lookup(|key| env.get(key).map(|v| (*v).to_string()));
        assert_eq!(layer.api_key, None);
        assert_eq!(layer.output, Some(PathBuf::from("out.csv")));
        assert_eq!(layer.country_code, None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "api_key = \"toml-key\"\ninput = \"data/points.kmz\"\ncountry_code = \"pt\"\n",
        )
        .unwrap();

        let layer = ConfigLayer::load_from_file(&path).unwrap();
        assert_eq!(layer.api_key.as_deref(), Some("toml-key"));
        assert_eq!(layer.input, Some(PathBuf::from("data/points.kmz")));
        assert_eq!(layer.country_code.as_deref(), Some("pt"));
        assert_eq!(layer.endpoint, None);
    }

    #[test]
    fn test_load_from_file_errors() {
        let dir = TempDir::new().unwrap();

        let err = ConfigLayer::load_from_file(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));

        let path = dir.path().join("broken.toml");
        fs::write(&path, "api_key = [unterminated").unwrap();
        let err = ConfigLayer::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_discovered_skips_broken_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        assert_eq!(load_discovered(&path), None);

        fs::write(&path, "language = 5").unwrap();
        assert_eq!(load_discovered(&path), None);
    }
}
