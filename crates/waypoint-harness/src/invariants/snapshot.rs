//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture what the user can observe at a point in time.
//! Invariants operate on snapshots rather than live state to ensure
//! consistent, atomic checks.

use waypoint_app::{App, Camera, VisibleFeatures};
use waypoint_core::{Coordinate, MapRect, PlaceId};

/// Snapshot of the application's observable state.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSnapshot {
    /// Home coordinate.
    pub home: Coordinate,
    /// Current result ids, in order.
    pub results: Vec<PlaceId>,
    /// Selected place. `None` if nothing selected.
    pub selection: Option<PlaceId>,
    /// Whether the detail panel is shown.
    pub detail_visible: bool,
    /// Whether route overlay mode is active.
    pub overlay_active: bool,
    /// Bounds of the stored route. `None` if no route.
    pub route_bounds: Option<MapRect>,
    /// Destination of the stored route.
    pub destination: Option<PlaceId>,
    /// Viewport framing.
    pub camera: Camera,
    /// What the map draws.
    pub features: VisibleFeatures,
}

impl AppSnapshot {
    /// Capture the observable state of `app`.
    pub fn from_app(app: &App) -> Self {
        Self {
            home: app.config().home(),
            results: app.search().results().iter().map(|p| p.id).collect(),
            selection: app.search().selection().map(|p| p.id),
            detail_visible: app.detail_visible(),
            overlay_active: app.route().overlay_active(),
            route_bounds: app.route().route().map(waypoint_core::Route::bounds),
            destination: app.route().destination().map(|p| p.id),
            camera: app.camera(),
            features: app.visible_features(),
        }
    }

    /// Ids of the result markers on the map.
    pub fn visible_places(&self) -> Vec<PlaceId> {
        self.features.place_ids().collect()
    }
}
