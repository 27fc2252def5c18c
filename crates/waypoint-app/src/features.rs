//! Visible-features derivation.
//!
//! The single place where "what the map currently depicts" is decided. The
//! derivation is a pure function of both flows and the home coordinate; the
//! renderer calls it after every state change and draws exactly what it
//! returns.

use waypoint_core::{Coordinate, PlaceId};

use crate::{RouteFlow, SearchFlow};

/// Label of the home marker.
pub const HOME_LABEL: &str = "Me";

/// What a marker stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// The fixed home location.
    Home,
    /// A search result.
    Place(PlaceId),
}

/// A labelled point on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// What the marker stands for.
    pub kind: MarkerKind,
    /// Where it is drawn.
    pub coordinate: Coordinate,
    /// Text drawn next to it.
    pub label: String,
    /// Whether this is the selected result.
    pub selected: bool,
}

/// Everything the renderer draws on the map surface.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleFeatures {
    /// Markers, home first.
    pub markers: Vec<Marker>,
    /// Route geometry, present only in overlay mode with a route.
    pub polyline: Option<Vec<Coordinate>>,
}

impl VisibleFeatures {
    /// Ids of the visible search results, in drawing order.
    pub fn place_ids(&self) -> impl Iterator<Item = PlaceId> + '_ {
        self.markers.iter().filter_map(|m| match m.kind {
            MarkerKind::Place(id) => Some(id),
            MarkerKind::Home => None,
        })
    }
}

/// Derive the visible features.
///
/// - The home marker is always present and always first.
/// - In overlay mode only results equal to the route destination are shown,
///   plus the route polyline.
/// - Otherwise every result is shown and there is no polyline.
pub fn visible_features(
    home: Coordinate,
    search: &SearchFlow,
    route: &RouteFlow,
) -> VisibleFeatures {
    let home_marker = Marker {
        kind: MarkerKind::Home,
        coordinate: home,
        label: HOME_LABEL.to_owned(),
        selected: false,
    };

    let overlay = route.overlay_active();
    let destination = route.destination();
    let selection = search.selection();

    let places = search
        .results()
        .iter()
        .filter(|place| !overlay || destination == Some(*place))
        .map(|place| Marker {
            kind: MarkerKind::Place(place.id),
            coordinate: place.coordinate,
            label: place.name.clone(),
            selected: selection == Some(place),
        });

    let markers = std::iter::once(home_marker).chain(places).collect();
    let polyline = if overlay { route.route().map(|r| r.points().to_vec()) } else { None };

    VisibleFeatures { markers, polyline }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use waypoint_core::{HomeConfig, Lookup, Place, Route, TransportType};

    use super::*;
    use crate::Generation;

    fn place(id: u64) -> Place {
        let coord = Coordinate::new(43.65 + id as f64 * 0.001, -79.38).unwrap();
        Place::new(PlaceId(id), format!("Place {id}"), "", coord)
    }

    fn flows(ids: &[u64]) -> (SearchFlow, RouteFlow) {
        let mut search = SearchFlow::new();
        let _ = search.submit_query("coffee", HomeConfig::default().region());
        search.complete(Generation(1), Lookup::Found(ids.iter().copied().map(place).collect()));
        (search, RouteFlow::new())
    }

    #[test]
    fn home_marker_is_always_first() {
        let home = HomeConfig::default().home();
        let features = visible_features(home, &SearchFlow::new(), &RouteFlow::new());

        assert_eq!(features.markers.len(), 1);
        assert_eq!(features.markers[0].kind, MarkerKind::Home);
        assert_eq!(features.markers[0].label, HOME_LABEL);
        assert!(features.polyline.is_none());
    }

    #[test]
    fn browsing_shows_every_result_and_marks_selection() {
        let home = HomeConfig::default().home();
        let (mut search, route) = flows(&[1, 2, 3]);
        search.select(PlaceId(2));

        let features = visible_features(home, &search, &route);
        let ids: Vec<_> = features.place_ids().collect();
        assert_eq!(ids, vec![PlaceId(1), PlaceId(2), PlaceId(3)]);
        let selected: Vec<_> = features.markers.iter().filter(|m| m.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].kind, MarkerKind::Place(PlaceId(2)));
    }

    #[test]
    fn overlay_shows_destination_and_polyline() {
        let home = HomeConfig::default().home();
        let (mut search, mut route) = flows(&[1, 2, 3]);
        search.select(PlaceId(3));
        let _ = route.request_directions(search.selection(), home);
        let path = vec![home, place(3).coordinate];
        let found = Route::new(path.clone(), Duration::from_secs(60), TransportType::Walking);
        route.complete(Generation(1), Lookup::from_option(Ok(found)));

        let features = visible_features(home, &search, &route);
        assert_eq!(features.place_ids().collect::<Vec<_>>(), vec![PlaceId(3)]);
        assert_eq!(features.polyline, Some(path));
    }
}
