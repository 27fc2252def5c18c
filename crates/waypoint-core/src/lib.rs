//! Core types for Waypoint
//!
//! Geographic primitives, the records exchanged with map-service
//! collaborators, and the collaborator traits themselves. Contains no state
//! machines and no I/O: the application layer builds on top of these types.
//!
//! # Components
//!
//! - [`Coordinate`], [`Region`], [`MapRect`]: validated geometry
//! - [`Place`], [`Route`], [`ImageryScene`]: collaborator results
//! - [`Lookup`]: explicit found / empty / failed outcome
//! - [`PlaceSearch`], [`DirectionsService`], [`PreviewImagery`],
//!   [`ExternalNavigation`]: collaborator seams
//! - [`HomeConfig`]: the injected home location

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod geo;
pub mod lookup;
pub mod place;
pub mod service;

pub use config::HomeConfig;
pub use error::{ConfigError, CoordinateError, LookupError};
pub use geo::{Coordinate, LatLon, MapRect, Region, haversine_distance};
pub use lookup::{Lookup, LookupKind};
pub use place::{ImageryScene, Place, PlaceId, Route, TransportType};
pub use service::{DirectionsService, ExternalNavigation, PlaceSearch, PreviewImagery};
