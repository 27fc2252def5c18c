//! Home location configuration.
//!
//! The home coordinate is both the default camera centre and the fixed origin
//! of every route. It is an immutable value injected into the application at
//! construction, never ambient global state.

use crate::{ConfigError, Coordinate, Region};

/// Default home latitude (downtown Toronto).
pub const DEFAULT_HOME_LAT: f64 = 43.641_612_077_740_52;

/// Default home longitude (downtown Toronto).
pub const DEFAULT_HOME_LON: f64 = -79.385_694_601_486_15;

/// Default search span around home, in metres.
pub const DEFAULT_SPAN_METERS: f64 = 10_000.0;

/// Fixed home location and search region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomeConfig {
    home: Coordinate,
    span_meters: f64,
}

impl HomeConfig {
    /// Create a configuration, validating the coordinate and span.
    pub fn new(lat: f64, lon: f64, span_meters: f64) -> Result<Self, ConfigError> {
        let home = Coordinate::new(lat, lon)?;
        Self::with_home(home, span_meters)
    }

    /// Create a configuration around an already-validated coordinate.
    pub fn with_home(home: Coordinate, span_meters: f64) -> Result<Self, ConfigError> {
        if !span_meters.is_finite() || span_meters <= 0.0 {
            return Err(ConfigError::InvalidSpan(span_meters));
        }
        Ok(Self { home, span_meters })
    }

    /// Home coordinate.
    pub fn home(&self) -> Coordinate {
        self.home
    }

    /// Search span in metres.
    pub fn span_meters(&self) -> f64 {
        self.span_meters
    }

    /// Region searches are scoped to, and the default camera framing.
    pub fn region(&self) -> Region {
        Region::new(self.home, self.span_meters)
    }
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            home: Coordinate::from_trusted(DEFAULT_HOME_LAT, DEFAULT_HOME_LON),
            span_meters: DEFAULT_SPAN_METERS,
        }
    }
}
