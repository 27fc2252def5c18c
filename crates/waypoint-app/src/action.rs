//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.
//! Lookup actions carry the generation the app will accept a completion for.

use waypoint_core::{Coordinate, Place, Region, TransportType};

use crate::Generation;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Render the current state.
    Render,

    /// Quit the application.
    Quit,

    /// Run a place search.
    Search {
        /// Search generation the result must carry back.
        generation: Generation,
        /// Trimmed query text.
        query: String,
        /// Region to scope the search to.
        region: Region,
    },

    /// Compute directions.
    FetchRoute {
        /// Route generation the result must carry back.
        generation: Generation,
        /// Route origin (the home coordinate).
        from: Coordinate,
        /// Destination captured at request time.
        to: Place,
        /// Walking or driving.
        transport: TransportType,
    },

    /// Fetch preview imagery for the detail panel.
    FetchPreview {
        /// Preview generation the result must carry back.
        generation: Generation,
        /// Place being previewed.
        place: Place,
    },

    /// Hand the place to an external navigation app. No completion follows.
    OpenExternally {
        /// Place to open.
        place: Place,
    },
}

impl AppAction {
    /// Whether executing this action starts an asynchronous lookup.
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Search { .. } | Self::FetchRoute { .. } | Self::FetchPreview { .. })
    }
}
