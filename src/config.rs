//! Configuration loading
//!
//! Settings come from a JSON file in the platform config directory
//! (`~/.config/skyview/config.json` on Linux), overridden by the
//! `OPENWEATHER_API_KEY` environment variable and command-line flags.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

use crate::data::weather::{DEFAULT_GEOCODING_BASE, DEFAULT_WEATHER_BASE};
use crate::data::{Coordinates, ReqwestTransport, WeatherClient, WeatherError};

/// Request timeout when none is configured
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// City looked up at startup when no location is given
const DEFAULT_CITY: &str = "London";

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file is not valid JSON for our schema
    #[error("Invalid config file {path}: {source}")]
    Invalid {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// No API key from any source
    #[error("No OpenWeatherMap API key configured. Pass --api-key, set OPENWEATHER_API_KEY, or add \"api_key\" to the config file")]
    MissingApiKey,

    /// The HTTP client could not be built
    #[error("Failed to create weather client: {0}")]
    Client(#[from] WeatherError),
}

/// On-disk shape; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    api_key: Option<String>,
    geocoding_base: Option<String>,
    weather_base: Option<String>,
    timeout_secs: Option<u64>,
    default_city: Option<String>,
    home: Option<Coordinates>,
}

/// Resolved application settings
#[derive(Clone)]
pub struct Config {
    /// OpenWeatherMap API key
    pub api_key: Option<String>,
    /// Base URL for the geocoding API
    pub geocoding_base: String,
    /// Base URL for the weather and forecast APIs
    pub weather_base: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// City looked up at startup when no location is given
    pub default_city: String,
    /// Coordinates used by the "my location" key
    pub home: Option<Coordinates>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("geocoding_base", &self.geocoding_base)
            .field("weather_base", &self.weather_base)
            .field("timeout", &self.timeout)
            .field("default_city", &self.default_city)
            .field("home", &self.home)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            geocoding_base: DEFAULT_GEOCODING_BASE.to_string(),
            weather_base: DEFAULT_WEATHER_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_city: DEFAULT_CITY.to_string(),
            home: None,
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from the default location.
    ///
    /// An explicit path must exist. A missing file at the default location
    /// yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Reads and parses a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Invalid {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(Self::from(file))
    }

    /// Replaces the API key when `api_key` is set
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    /// Builds a weather client from these settings
    pub fn weather_client(&self) -> Result<WeatherClient, ConfigError> {
        let api_key = self.api_key.clone().ok_or(ConfigError::MissingApiKey)?;
        let transport = ReqwestTransport::new(self.timeout)?;
        Ok(WeatherClient::new(api_key, Arc::new(transport))
            .with_geocoding_base(self.geocoding_base.clone())
            .with_weather_base(self.weather_base.clone()))
    }
}

impl From<FileConfig> for Config {
    fn from(file: FileConfig) -> Self {
        let defaults = Self::default();
        Self {
            api_key: file.api_key.filter(|k| !k.trim().is_empty()),
            geocoding_base: file.geocoding_base.unwrap_or(defaults.geocoding_base),
            weather_base: file.weather_base.unwrap_or(defaults.weather_base),
            timeout: file
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            default_city: file
                .default_city
                .filter(|c| !c.trim().is_empty())
                .unwrap_or(defaults.default_city),
            home: file.home,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "skyview")
}

/// `config.json` in the platform config directory
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
}

/// Directory for the interactive-mode log file
pub fn log_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write config");
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.geocoding_base, DEFAULT_GEOCODING_BASE);
        assert_eq!(config.weather_base, DEFAULT_WEATHER_BASE);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.default_city, "London");
        assert!(config.home.is_none());
    }

    #[test]
    fn test_load_full_file() {
        let file = write_config(
            r#"{
                "api_key": "abc123",
                "geocoding_base": "http://localhost:1/geo/1.0",
                "weather_base": "http://localhost:1/data/2.5",
                "timeout_secs": 3,
                "default_city": "Oslo",
                "home": {"latitude": 59.91, "longitude": 10.75}
            }"#,
        );

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.geocoding_base, "http://localhost:1/geo/1.0");
        assert_eq!(config.weather_base, "http://localhost:1/data/2.5");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.default_city, "Oslo");
        assert_eq!(config.home, Some(Coordinates::new(59.91, 10.75)));
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let file = write_config(r#"{"default_city": "Lima"}"#);
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.default_city, "Lima");
        assert_eq!(config.weather_base, DEFAULT_WEATHER_BASE);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_blank_values_ignored() {
        let file = write_config(r#"{"api_key": "  ", "default_city": ""}"#);
        let config = Config::load(Some(file.path())).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.default_city, "London");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let result = Config::load(Some(&path));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_invalid_json_is_error() {
        let file = write_config("{ not json");
        let result = Config::load(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_unknown_field_is_error() {
        let file = write_config(r#"{"apikey": "typo"}"#);
        let result = Config::load(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_api_key_override() {
        let file = write_config(r#"{"api_key": "from-file"}"#);
        let config = Config::load(Some(file.path())).unwrap();

        let overridden = config.clone().with_api_key(Some("from-cli".to_string()));
        assert_eq!(overridden.api_key.as_deref(), Some("from-cli"));

        let kept = config.clone().with_api_key(None);
        assert_eq!(kept.api_key.as_deref(), Some("from-file"));

        let blank = config.with_api_key(Some(String::new()));
        assert_eq!(blank.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_weather_client_requires_api_key() {
        let result = Config::default().weather_client();
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));

        let config = Config::default().with_api_key(Some("key".to_string()));
        assert!(config.weather_client().is_ok());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::default().with_api_key(Some("super-secret".to_string()));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_default_config_path_file_name() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("config.json"));
        }
    }
}
