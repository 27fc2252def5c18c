//! Route flow state machine.
//!
//! Resolves a route from the home coordinate to the selected place and owns
//! the transition into route overlay mode.
//!
//! NoRoute → Computing (on request) → Active | Failed. Any state returns to
//! NoRoute on reset or dismissal.
//!
//! # Invariants
//!
//! - `overlay_active` implies both `route` and `destination` are present.
//! - Only the completion for the latest request is applied.
//! - A failed or empty lookup never enters overlay mode.

use waypoint_core::{Coordinate, Lookup, MapRect, Place, Route, TransportType};

use crate::{AppAction, Generation, RoutePhase};

/// How a directions completion changed the flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteResolution {
    /// A route was stored and overlay mode is active.
    Shown {
        /// Bounding box the viewport should frame.
        bounds: MapRect,
    },
    /// No route was obtained. Overlay mode is off.
    Failed,
}

/// Route flow state.
#[derive(Debug, Clone)]
pub struct RouteFlow {
    /// Destination of the displayed route.
    destination: Option<Place>,
    /// Displayed route (top-ranked candidate).
    route: Option<Route>,
    /// Whether only the route and its destination are drawn.
    overlay_active: bool,
    /// Lookup phase.
    phase: RoutePhase,
    /// Generation of the most recently issued request.
    generation: Generation,
    /// Transport type for the next request.
    transport: TransportType,
}

impl Default for RouteFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteFlow {
    /// Create a flow with no route.
    pub fn new() -> Self {
        Self {
            destination: None,
            route: None,
            overlay_active: false,
            phase: RoutePhase::NoRoute,
            generation: Generation::default(),
            transport: TransportType::default(),
        }
    }

    /// Request directions from `from` to the current selection.
    ///
    /// No-op without a selection. The selected place is captured now: the
    /// route is drawn to it even if the selection changes before the lookup
    /// resolves. A request made while another is computing supersedes it.
    pub fn request_directions(
        &mut self,
        selection: Option<&Place>,
        from: Coordinate,
    ) -> Vec<AppAction> {
        let Some(place) = selection else {
            return vec![];
        };

        self.generation = self.generation.next();
        self.phase =
            RoutePhase::Computing { generation: self.generation, destination: place.clone() };

        tracing::debug!(
            generation = %self.generation,
            destination = %place.id,
            transport = self.transport.label(),
            "directions requested"
        );

        vec![AppAction::FetchRoute {
            generation: self.generation,
            from,
            to: place.clone(),
            transport: self.transport,
        }]
    }

    /// Apply a directions completion.
    ///
    /// Returns `None` if the completion belongs to a superseded or dismissed
    /// request and was discarded.
    pub fn complete(
        &mut self,
        generation: Generation,
        outcome: Lookup<Route>,
    ) -> Option<RouteResolution> {
        let destination = match &self.phase {
            RoutePhase::Computing { generation: pending, destination }
                if *pending == generation =>
            {
                destination.clone()
            },
            _ => {
                tracing::debug!(%generation, current = %self.generation, "discarding stale route");
                return None;
            },
        };

        match outcome {
            Lookup::Found(route) => {
                let bounds = route.bounds();
                self.route = Some(route);
                self.destination = Some(destination);
                self.overlay_active = true;
                self.phase = RoutePhase::Active;
                Some(RouteResolution::Shown { bounds })
            },
            Lookup::Empty => {
                tracing::info!(%generation, destination = %destination.id, "no route found");
                self.clear_route();
                self.phase = RoutePhase::Failed { error: None };
                Some(RouteResolution::Failed)
            },
            Lookup::Failed(error) => {
                tracing::warn!(%generation, %error, "directions lookup failed");
                self.clear_route();
                self.phase = RoutePhase::Failed { error: Some(error) };
                Some(RouteResolution::Failed)
            },
        }
    }

    /// Leave overlay mode and forget the route.
    ///
    /// Also abandons a computing request. Returns `true` if anything changed.
    pub fn dismiss(&mut self) -> bool {
        let changed = self.phase != RoutePhase::NoRoute;
        self.reset();
        changed
    }

    /// Return to NoRoute, discarding any in-flight request.
    pub fn reset(&mut self) {
        self.clear_route();
        self.phase = RoutePhase::NoRoute;
    }

    /// Choose walking or driving for subsequent requests.
    pub fn set_transport(&mut self, transport: TransportType) {
        self.transport = transport;
    }

    fn clear_route(&mut self) {
        self.route = None;
        self.destination = None;
        self.overlay_active = false;
    }

    /// Destination of the displayed route.
    pub fn destination(&self) -> Option<&Place> {
        self.destination.as_ref()
    }

    /// Place the flow is routing to: the pending destination while
    /// computing, the displayed destination otherwise.
    pub fn target(&self) -> Option<&Place> {
        match &self.phase {
            RoutePhase::Computing { destination, .. } => Some(destination),
            RoutePhase::NoRoute | RoutePhase::Active | RoutePhase::Failed { .. } => {
                self.destination.as_ref()
            },
        }
    }

    /// Displayed route.
    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Whether route overlay mode is active.
    pub fn overlay_active(&self) -> bool {
        self.overlay_active
    }

    /// Lookup phase.
    pub fn phase(&self) -> &RoutePhase {
        &self.phase
    }

    /// Whether a directions lookup is in flight.
    pub fn is_computing(&self) -> bool {
        matches!(self.phase, RoutePhase::Computing { .. })
    }

    /// Transport type for the next request.
    pub fn transport(&self) -> TransportType {
        self.transport
    }
}
