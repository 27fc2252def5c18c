//! Domain records returned by map-service collaborators.
//!
//! These are plain data. The core never creates a [`Place`] or [`Route`] on
//! its own; they come back from [`crate::PlaceSearch`] and
//! [`crate::DirectionsService`] and are owned by the application state that
//! receives them.

use std::{
    fmt,
    hash::{Hash, Hasher},
    time::Duration,
};

use serde::Deserialize;

use crate::{Coordinate, MapRect};

/// Collaborator-assigned identity of a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub struct PlaceId(pub u64);

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "place#{}", self.0)
    }
}

/// A single search result.
///
/// Equality and hashing consider only [`Place::id`]: two values describe the
/// same place iff the collaborator gave them the same identity, even if the
/// display strings differ between lookups.
#[derive(Debug, Clone)]
pub struct Place {
    /// Collaborator identity.
    pub id: PlaceId,
    /// Display name ("Union Station").
    pub name: String,
    /// Display subtitle, usually the street address.
    pub subtitle: String,
    /// Location of the place.
    pub coordinate: Coordinate,
}

impl Place {
    /// Create a place record.
    pub fn new(
        id: PlaceId,
        name: impl Into<String>,
        subtitle: impl Into<String>,
        coordinate: Coordinate,
    ) -> Self {
        Self { id, name: name.into(), subtitle: subtitle.into(), coordinate }
    }
}

impl PartialEq for Place {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Place {}

impl Hash for Place {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// How the route is travelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TransportType {
    /// Driving directions.
    #[default]
    Automobile,
    /// Walking directions.
    Walking,
}

impl TransportType {
    /// Short human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Automobile => "driving",
            Self::Walking => "walking",
        }
    }
}

/// A computed path between two coordinates.
///
/// Immutable once built: a new directions lookup produces a new `Route`.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    points: Vec<Coordinate>,
    bounds: MapRect,
    distance_meters: f64,
    expected_travel_time: Duration,
    transport: TransportType,
}

impl Route {
    /// Build a route from its path geometry.
    ///
    /// Bounds and length are derived from `points`. Returns `None` for an
    /// empty path: a route always has somewhere to draw.
    pub fn new(
        points: Vec<Coordinate>,
        expected_travel_time: Duration,
        transport: TransportType,
    ) -> Option<Self> {
        let bounds = MapRect::from_points(&points)?;
        let distance_meters = points.windows(2).map(|w| w[0].distance_to(w[1])).sum();
        Some(Self { points, bounds, distance_meters, expected_travel_time, transport })
    }

    /// Ordered path geometry.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Bounding box of the path.
    pub fn bounds(&self) -> MapRect {
        self.bounds
    }

    /// Path length in metres.
    pub fn distance_meters(&self) -> f64 {
        self.distance_meters
    }

    /// Travel time estimated by the directions service.
    pub fn expected_travel_time(&self) -> Duration {
        self.expected_travel_time
    }

    /// Transport type the route was computed for.
    pub fn transport(&self) -> TransportType {
        self.transport
    }
}

/// Opaque handle to a street-level preview of a place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageryScene {
    /// Place the scene was captured for.
    pub place_id: PlaceId,
    /// Short description shown alongside the preview.
    pub caption: String,
}
