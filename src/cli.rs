//! Command-line interface parsing for skyview
//!
//! This module handles parsing of CLI arguments using clap: the startup
//! location (a city or a coordinate pair), the API key, and the run mode.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::config::Config;
use crate::data::{Coordinates, LocationQuery};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The city argument is blank
    #[error("City name cannot be empty")]
    EmptyCity,

    /// Coordinates outside the valid range
    #[error("Invalid coordinates: {0}, {1}. Latitude must be within -90..90 and longitude within -180..180")]
    InvalidCoordinates(f64, f64),
}

/// skyview - Current weather and a 5-day forecast in your terminal
#[derive(Parser, Debug)]
#[command(name = "skyview")]
#[command(about = "Current weather and a 5-day forecast in your terminal")]
#[command(version)]
pub struct Cli {
    /// City to look up at startup
    ///
    /// Examples:
    ///   skyview                 # Look up the configured default city
    ///   skyview Paris           # Look up Paris
    ///   skyview "New York"      # Quote names with spaces
    #[arg(value_name = "CITY", conflicts_with_all = ["lat", "lon"])]
    pub city: Option<String>,

    /// Latitude for a coordinate lookup (requires --lon)
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude for a coordinate lookup (requires --lat)
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Path to a JSON config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the report once and exit instead of starting the TUI
    #[arg(long)]
    pub once: bool,

    /// Print the report as JSON (with --once)
    #[arg(long, requires = "once")]
    pub json: bool,

    /// Show built-in demo data; no API key or network needed
    #[arg(long)]
    pub demo: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// How the application presents results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Full-screen terminal UI
    #[default]
    Interactive,
    /// One lookup printed to stdout
    Once { json: bool },
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// Location given on the command line, if any
    pub query: Option<LocationQuery>,
    /// Interactive or one-shot
    pub mode: RunMode,
    /// Whether to show demo data instead of querying the service
    pub demo: bool,
    /// Whether debug logging is enabled
    pub verbose: bool,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if the city is blank or coordinates are out of range
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let query = match (&cli.city, cli.lat, cli.lon) {
            (Some(city), _, _) => {
                if city.trim().is_empty() {
                    return Err(CliError::EmptyCity);
                }
                Some(LocationQuery::city(city.trim()))
            }
            (None, Some(lat), Some(lon)) => {
                let coordinates = Coordinates::new(lat, lon);
                if !coordinates.is_valid() {
                    return Err(CliError::InvalidCoordinates(lat, lon));
                }
                Some(LocationQuery::Coordinates(coordinates))
            }
            // clap enforces that --lat and --lon come together
            _ => None,
        };

        let mode = if cli.once {
            RunMode::Once { json: cli.json }
        } else {
            RunMode::Interactive
        };

        Ok(StartupConfig {
            query,
            mode,
            demo: cli.demo,
            verbose: cli.verbose,
        })
    }

    /// The query to run at startup: the CLI location or the configured default city
    pub fn initial_query(&self, config: &Config) -> LocationQuery {
        self.query
            .clone()
            .unwrap_or_else(|| LocationQuery::city(config.default_city.clone()))
    }
}
