//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use waypoint_app::{Camera, MarkerKind};
use waypoint_core::PlaceId;

use super::{AppSnapshot, Invariant, InvariantKind, InvariantResult, Violation};

/// Overlay mode requires a stored route and a destination that is one of
/// the current results.
pub struct OverlayRequiresRoute;

impl Invariant for OverlayRequiresRoute {
    fn kind(&self) -> InvariantKind {
        InvariantKind::OverlayRequiresRoute
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        if !state.overlay_active {
            return Ok(());
        }
        let listed = state.destination.is_some_and(|id| state.results.contains(&id));
        if state.route_bounds.is_none() || !listed {
            return Err(Violation {
                invariant: self.kind(),
                message: format!(
                    "overlay active with route {:?} and destination {:?} (results {:?})",
                    state.route_bounds, state.destination, state.results
                ),
            });
        }
        Ok(())
    }
}

/// The detail panel is shown exactly when a place is selected.
pub struct PanelMatchesSelection;

impl Invariant for PanelMatchesSelection {
    fn kind(&self) -> InvariantKind {
        InvariantKind::PanelMatchesSelection
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        if state.detail_visible != state.selection.is_some() {
            return Err(Violation {
                invariant: self.kind(),
                message: format!(
                    "detail_visible {} but selection {:?}",
                    state.detail_visible, state.selection
                ),
            });
        }
        Ok(())
    }
}

/// A selected place is one of the current results.
pub struct SelectionInResults;

impl Invariant for SelectionInResults {
    fn kind(&self) -> InvariantKind {
        InvariantKind::SelectionInResults
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        if let Some(selected) = state.selection
            && !state.results.contains(&selected)
        {
            return Err(Violation {
                invariant: self.kind(),
                message: format!("selection {selected} not in results {:?}", state.results),
            });
        }
        Ok(())
    }
}

/// Exactly one home marker, drawn first, at the home coordinate.
pub struct HomeMarkerFirst;

impl Invariant for HomeMarkerFirst {
    fn kind(&self) -> InvariantKind {
        InvariantKind::HomeMarkerFirst
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        let homes = state.features.markers.iter().filter(|m| m.kind == MarkerKind::Home).count();
        let first = state.features.markers.first();
        let ok = homes == 1
            && first.is_some_and(|m| m.kind == MarkerKind::Home && m.coordinate == state.home);
        if !ok {
            return Err(Violation {
                invariant: self.kind(),
                message: format!("{homes} home markers, first marker {first:?}"),
            });
        }
        Ok(())
    }
}

/// Result markers and polyline follow the overlay mode.
///
/// Overlay: exactly the results equal to the destination, plus a polyline.
/// Otherwise: every result in order, no polyline.
pub struct VisibleMarkersMatchMode;

impl Invariant for VisibleMarkersMatchMode {
    fn kind(&self) -> InvariantKind {
        InvariantKind::VisibleMarkersMatchMode
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        let visible = state.visible_places();
        let has_polyline = state.features.polyline.is_some();

        let problem = if state.overlay_active {
            let expected: Vec<PlaceId> = state
                .results
                .iter()
                .copied()
                .filter(|id| Some(*id) == state.destination)
                .collect();
            if !has_polyline {
                Some("overlay without polyline".to_owned())
            } else if visible != expected {
                Some(format!("overlay shows {visible:?}, destination {:?}", state.destination))
            } else {
                None
            }
        } else if has_polyline {
            Some("polyline outside overlay mode".to_owned())
        } else if visible != state.results {
            Some(format!("browsing shows {visible:?}, results {:?}", state.results))
        } else {
            None
        };

        match problem {
            Some(message) => Err(Violation { invariant: self.kind(), message }),
            None => Ok(()),
        }
    }
}

/// The viewport frames the route exactly while overlay mode is active, and
/// the home region otherwise.
pub struct CameraFramesRoute;

impl Invariant for CameraFramesRoute {
    fn kind(&self) -> InvariantKind {
        InvariantKind::CameraFramesRoute
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        let framed = match state.camera {
            Camera::Rect(rect) => Some(rect),
            Camera::Region(_) => None,
        };
        let expected = if state.overlay_active { state.route_bounds } else { None };
        if framed != expected {
            return Err(Violation {
                invariant: self.kind(),
                message: format!("camera {:?} with overlay {}", state.camera, state.overlay_active),
            });
        }
        Ok(())
    }
}
