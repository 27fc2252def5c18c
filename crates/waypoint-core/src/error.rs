//! Error types for the Waypoint core.
//!
//! Strongly-typed errors for the two places where the core can reject input:
//! coordinate/configuration validation, and collaborator lookups (search,
//! directions, imagery).
//!
//! Lookup errors never escape the application layer as panics or `Err`
//! returns from a state transition. They are carried inside
//! [`crate::Lookup::Failed`] so the caller decides whether to surface them.

use thiserror::Error;

/// Errors from validated coordinate construction.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CoordinateError {
    /// Latitude or longitude is NaN or infinite.
    #[error("coordinate component is not finite")]
    NonFinite,

    /// Latitude outside `[-90, 90]`.
    #[error("latitude {0} out of range [-90, 90]")]
    LatitudeOutOfRange(f64),

    /// Longitude outside `[-180, 180]`.
    #[error("longitude {0} out of range [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// Errors from building a [`crate::HomeConfig`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Home coordinate failed validation.
    #[error("invalid home coordinate: {0}")]
    Coordinate(#[from] CoordinateError),

    /// Search span must be a positive, finite number of metres.
    #[error("invalid search span: {0} m")]
    InvalidSpan(f64),
}

/// Errors reported by a map-service collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Network unreachable, connection reset, or similar transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered but reported an error (throttling, outage).
    #[error("service error: {0}")]
    Service(String),

    /// The service rejected the request itself.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl LookupError {
    /// Returns true if the same request may succeed when issued again.
    ///
    /// Nothing in the application retries automatically; front-ends use this
    /// to decide whether to suggest a retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Service(_))
    }
}
