//! Application input events.
//!
//! This module defines [`AppEvent`], the complete set of inputs that drive
//! the [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (query submission, marker taps, panel buttons) and
//!   redraw requests from the frontend.
//! - Lookup completions delivered by the [`crate::Bridge`].

use waypoint_core::{ImageryScene, Lookup, Place, PlaceId, Route, TransportType};

use crate::Generation;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Periodic tick.
    Tick,

    /// Frontend state changed (input edited, terminal resized).
    Redraw,

    /// Search text submitted.
    QuerySubmitted {
        /// Raw query text.
        query: String,
    },

    /// A result was selected (marker tap or list navigation).
    PlaceSelected {
        /// Identity of the selected place.
        place_id: PlaceId,
    },

    /// Select the next visible result, wrapping around.
    SelectNext,

    /// Select the previous visible result, wrapping around.
    SelectPrevious,

    /// Detail panel closed.
    SelectionCleared,

    /// "Show directions" pressed in the detail panel.
    DirectionsRequested,

    /// Transport type chosen for subsequent directions.
    TransportChanged {
        /// New transport type.
        transport: TransportType,
    },

    /// Leave route overlay mode.
    RouteDismissed,

    /// "Open in Maps" pressed in the detail panel.
    OpenExternallyRequested,

    /// User asked to quit.
    QuitRequested,

    /// Place search finished.
    SearchCompleted {
        /// Generation of the request this answers.
        generation: Generation,
        /// Search outcome.
        outcome: Lookup<Vec<Place>>,
    },

    /// Directions lookup finished.
    RouteCompleted {
        /// Generation of the request this answers.
        generation: Generation,
        /// Top-ranked route, if any.
        outcome: Lookup<Route>,
    },

    /// Preview imagery lookup finished.
    PreviewCompleted {
        /// Generation of the request this answers.
        generation: Generation,
        /// Preview scene, if any.
        outcome: Lookup<ImageryScene>,
    },
}
