//! "Open in Maps" handoff for the terminal.
//!
//! A terminal cannot launch a maps app, so the handoff builds an
//! OpenStreetMap link centred on the place and writes it to the log.

use waypoint_core::{ExternalNavigation, Place};

/// Zoom level of the generated link.
const LINK_ZOOM: u8 = 17;

/// OpenStreetMap link with a marker on `place`.
pub fn maps_url(place: &Place) -> String {
    let lat = place.coordinate.lat();
    let lon = place.coordinate.lon();
    format!("https://www.openstreetmap.org/?mlat={lat:.6}&mlon={lon:.6}#map={LINK_ZOOM}/{lat:.6}/{lon:.6}")
}

/// Logs a maps link for each handoff.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapsLink;

impl ExternalNavigation for MapsLink {
    fn open(&self, place: &Place) {
        let url = maps_url(place);
        tracing::info!(place = %place.id, name = %place.name, %url, "open in maps");
    }
}
