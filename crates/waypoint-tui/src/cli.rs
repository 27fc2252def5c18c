//! Command-line configuration.
//!
//! Maps arguments onto the home location, the simulated collaborators, the
//! place catalogue and the log destination.

use std::{fs::File, io, path::PathBuf, sync::Arc};

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use waypoint_core::{
    ConfigError, HomeConfig,
    config::{DEFAULT_HOME_LAT, DEFAULT_HOME_LON, DEFAULT_SPAN_METERS},
};
use waypoint_harness::{Catalogue, CatalogueError, SimServices, sim_services::DEFAULT_ROUTE_POINTS};

/// Command-line errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Home location or span rejected.
    #[error("invalid home configuration: {0}")]
    Config(#[from] ConfigError),

    /// Catalogue file missing or malformed.
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    /// Failure rate outside `0.0..=1.0`.
    #[error("failure rate {0} must be between 0 and 1")]
    FailureRate(f64),

    /// Log file could not be opened.
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        /// Requested path.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
}

/// Waypoint terminal map
#[derive(Parser, Debug, Clone)]
#[command(name = "waypoint-tui")]
#[command(about = "Search nearby places and overlay routes in the terminal")]
#[command(version)]
pub struct Args {
    /// Home latitude in degrees
    #[arg(long, default_value_t = DEFAULT_HOME_LAT, allow_negative_numbers = true)]
    pub lat: f64,

    /// Home longitude in degrees
    #[arg(long, default_value_t = DEFAULT_HOME_LON, allow_negative_numbers = true)]
    pub lon: f64,

    /// Width of the search region around home, in metres
    #[arg(long, default_value_t = DEFAULT_SPAN_METERS)]
    pub span_meters: f64,

    /// Seed for the simulated map services
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Probability that a simulated lookup fails
    #[arg(long, default_value_t = 0.0)]
    pub failure_rate: f64,

    /// TOML place catalogue (built-in Toronto places if omitted)
    #[arg(long)]
    pub catalogue: Option<PathBuf>,

    /// Points per simulated route
    #[arg(long, default_value_t = DEFAULT_ROUTE_POINTS)]
    pub route_points: usize,

    /// Write logs to this file (the terminal is taken by the UI)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Home location and search region.
    pub fn home_config(&self) -> Result<HomeConfig, CliError> {
        Ok(HomeConfig::new(self.lat, self.lon, self.span_meters)?)
    }

    /// Simulated collaborators.
    pub fn services(&self) -> Result<SimServices, CliError> {
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(CliError::FailureRate(self.failure_rate));
        }
        let catalogue = match &self.catalogue {
            Some(path) => Catalogue::from_file(path)?,
            None => Catalogue::toronto(),
        };
        Ok(SimServices::from_catalogue(&catalogue, self.seed, self.failure_rate)
            .with_route_points(self.route_points))
    }

    /// Install the log subscriber if a log file was requested.
    ///
    /// `RUST_LOG` overrides `--log-level`.
    pub fn init_logging(&self) -> Result<(), CliError> {
        let Some(path) = &self.log_file else {
            return Ok(());
        };
        let file = File::create(path)
            .map_err(|source| CliError::LogFile { path: path.clone(), source })?;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level));
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
            .with(filter)
            .init();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_home() {
        let args = Args::parse_from(["waypoint-tui"]);
        let config = args.home_config().unwrap();
        assert_eq!(config, HomeConfig::default());
        assert!(args.log_file.is_none());
    }

    #[test]
    fn negative_coordinates_parse() {
        let args = Args::parse_from(["waypoint-tui", "--lat", "-33.86", "--lon", "151.21"]);
        assert_eq!(args.lat, -33.86);
        assert!(args.home_config().is_ok());
    }

    #[test]
    fn rejects_bad_home() {
        let args = Args::parse_from(["waypoint-tui", "--lat", "91"]);
        assert!(matches!(args.home_config(), Err(CliError::Config(_))));
    }

    #[test]
    fn rejects_bad_failure_rate() {
        let args = Args::parse_from(["waypoint-tui", "--failure-rate", "1.5"]);
        assert!(matches!(args.services(), Err(CliError::FailureRate(_))));
    }

    #[test]
    fn loads_catalogue_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/catalogues/waterfront.toml");
        let args = Args::parse_from(["waypoint-tui", "--catalogue", path]);
        let services = args.services().unwrap();
        assert_eq!(services.search.matching("park", HomeConfig::default().region()).len(), 2);
    }

    #[test]
    fn reports_missing_catalogue() {
        let args = Args::parse_from(["waypoint-tui", "--catalogue", "/nonexistent/places.toml"]);
        assert!(matches!(args.services(), Err(CliError::Catalogue(CatalogueError::Read { .. }))));
    }
}
