//! Observable application state types.
//!
//! These are the "View Model" pieces shared by the flows and the renderer:
//! request generations, lookup phases, the preview panel state and the
//! camera. None of them perform I/O.

use std::fmt;

use waypoint_core::{HomeConfig, ImageryScene, LookupError, MapRect, Place, Region};

/// Monotonic request token for one kind of lookup.
///
/// Every request is tagged with a fresh generation. A completion is applied
/// only if its generation is the one the flow is still waiting for, so a slow
/// response can never overwrite the result of a newer request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(pub u64);

impl Generation {
    /// The generation following this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen{}", self.0)
    }
}

/// Search lookup phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// No search in flight.
    Idle,
    /// Waiting for the search tagged `generation`.
    Searching {
        /// Generation of the accepted request.
        generation: Generation,
    },
}

/// Directions lookup phase.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutePhase {
    /// No route requested, or the route was dismissed.
    NoRoute,
    /// Waiting for the directions lookup tagged `generation`.
    Computing {
        /// Generation of the accepted request.
        generation: Generation,
        /// Place that was selected when directions were requested.
        destination: Place,
    },
    /// A route is shown in overlay mode.
    Active,
    /// The last directions lookup returned nothing or failed.
    Failed {
        /// Failure reported by the collaborator. `None` if no route existed.
        error: Option<LookupError>,
    },
}

/// Preview imagery shown in the detail panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewState {
    /// Nothing selected, nothing to preview.
    Idle,
    /// Waiting for the preview lookup tagged `generation`.
    Loading {
        /// Generation of the accepted request.
        generation: Generation,
    },
    /// A preview scene is available.
    Ready(ImageryScene),
    /// No imagery exists or the lookup failed; show a placeholder.
    Unavailable,
}

/// What the map viewport is framing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Camera {
    /// Centre-and-span framing (the default home region).
    Region(Region),
    /// Bounding-box framing (a route's extent).
    Rect(MapRect),
}

impl Camera {
    /// Default framing around the configured home.
    pub fn home(config: &HomeConfig) -> Self {
        Self::Region(config.region())
    }

    /// Bounding box of the framed area.
    pub fn bounds(&self) -> MapRect {
        match self {
            Self::Region(region) => region.bounds(),
            Self::Rect(rect) => *rect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_increase() {
        let g = Generation::default();
        assert!(g.next() > g);
        assert_eq!(g.next().next(), Generation(2));
    }

    #[test]
    fn home_camera_frames_home() {
        let config = HomeConfig::default();
        let camera = Camera::home(&config);
        assert!(camera.bounds().contains(config.home()));
    }
}
