//! Application state machine.
//!
//! This module defines the [`App`] state machine, which composes the
//! [`SearchFlow`] and [`RouteFlow`] with the detail panel's preview, the
//! camera and a transient status line.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Reset policy
//!
//! - Submitting a new query clears the selection and the preview, resets the
//!   route flow (leaving overlay mode) and reframes the camera on home.
//! - When a search lands, a route requested meanwhile is dropped unless its
//!   destination is among the new results.
//! - Clearing the selection leaves the route flow alone. Overlay mode ends
//!   only with a new query or an explicit dismissal.
//! - A successful route clears the selection (closing the detail panel) and
//!   frames the route. A failed route keeps the panel open.

use waypoint_core::{HomeConfig, Lookup, LookupKind, PlaceId, Route, TransportType};

use crate::{
    AppAction, AppEvent, Camera, Generation, PreviewState, RouteFlow, RoutePhase, SearchFlow,
    features::{VisibleFeatures, visible_features},
    route::RouteResolution,
};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    /// Home location and search region.
    config: HomeConfig,
    /// Query, results and selection.
    search: SearchFlow,
    /// Route, destination and overlay mode.
    route: RouteFlow,
    /// Preview imagery for the selected place.
    preview: PreviewState,
    /// Generation of the most recently issued preview request.
    preview_generation: Generation,
    /// Current viewport framing.
    camera: Camera,
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl App {
    /// Create an App framed on the configured home region.
    pub fn new(config: HomeConfig) -> Self {
        Self {
            config,
            search: SearchFlow::new(),
            route: RouteFlow::new(),
            preview: PreviewState::Idle,
            preview_generation: Generation::default(),
            camera: Camera::home(&config),
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Tick => vec![],
            AppEvent::Redraw => vec![AppAction::Render],
            AppEvent::QuerySubmitted { query } => self.submit_query(&query),
            AppEvent::PlaceSelected { place_id } => self.select(place_id),
            AppEvent::SelectNext => self.select_adjacent(true),
            AppEvent::SelectPrevious => self.select_adjacent(false),
            AppEvent::SelectionCleared => self.clear_selection(),
            AppEvent::DirectionsRequested => self.request_directions(),
            AppEvent::TransportChanged { transport } => self.set_transport(transport),
            AppEvent::RouteDismissed => self.dismiss_route(),
            AppEvent::OpenExternallyRequested => self.open_externally(),
            AppEvent::QuitRequested => self.quit(),
            AppEvent::SearchCompleted { generation, outcome } => {
                if !self.search.complete(generation, outcome) {
                    return vec![];
                }
                self.drop_orphaned_route();
                self.status_message = Some(self.search_status());
                if self.search.selection().is_none() {
                    self.preview = PreviewState::Idle;
                }
                vec![AppAction::Render]
            },
            AppEvent::RouteCompleted { generation, outcome } => {
                self.on_route_completed(generation, outcome)
            },
            AppEvent::PreviewCompleted { generation, outcome } => {
                if self.preview != (PreviewState::Loading { generation }) {
                    tracing::debug!(%generation, "discarding stale preview");
                    return vec![];
                }
                self.preview = match outcome {
                    Lookup::Found(scene) => PreviewState::Ready(scene),
                    Lookup::Empty | Lookup::Failed(_) => PreviewState::Unavailable,
                };
                vec![AppAction::Render]
            },
        }
    }

    /// Submit a search query. Blank queries are ignored.
    pub fn submit_query(&mut self, text: &str) -> Vec<AppAction> {
        let mut actions = self.search.submit_query(text, self.config.region());
        if actions.is_empty() {
            return actions;
        }

        self.route.reset();
        self.preview = PreviewState::Idle;
        self.camera = Camera::home(&self.config);
        self.status_message = Some(format!("Searching for \"{}\"...", self.search.query()));

        actions.push(AppAction::Render);
        actions
    }

    /// Select a result, opening the detail panel and fetching its preview.
    ///
    /// Unknown ids and reselecting the current place are ignored.
    pub fn select(&mut self, place_id: PlaceId) -> Vec<AppAction> {
        if !self.search.select(place_id) {
            return vec![];
        }

        let Some(place) = self.search.selection().cloned() else {
            return vec![AppAction::Render];
        };

        self.preview_generation = self.preview_generation.next();
        self.preview = PreviewState::Loading { generation: self.preview_generation };

        vec![
            AppAction::FetchPreview { generation: self.preview_generation, place },
            AppAction::Render,
        ]
    }

    /// Clear the selection, closing the detail panel.
    pub fn clear_selection(&mut self) -> Vec<AppAction> {
        if !self.search.clear_selection() {
            return vec![];
        }
        self.preview = PreviewState::Idle;
        vec![AppAction::Render]
    }

    /// Request directions from home to the selected place.
    pub fn request_directions(&mut self) -> Vec<AppAction> {
        let mut actions =
            self.route.request_directions(self.search.selection(), self.config.home());
        if actions.is_empty() {
            return actions;
        }

        if let Some(place) = self.search.selection() {
            self.status_message = Some(format!(
                "Finding {} directions to {}...",
                self.route.transport().label(),
                place.name
            ));
        }

        actions.push(AppAction::Render);
        actions
    }

    /// Choose walking or driving for the next directions request.
    pub fn set_transport(&mut self, transport: TransportType) -> Vec<AppAction> {
        if self.route.transport() == transport {
            return vec![];
        }
        self.route.set_transport(transport);
        self.status_message = Some(format!("Directions: {}", transport.label()));
        vec![AppAction::Render]
    }

    /// Leave route overlay mode and reframe on home.
    pub fn dismiss_route(&mut self) -> Vec<AppAction> {
        if !self.route.dismiss() {
            return vec![];
        }
        self.camera = Camera::home(&self.config);
        self.status_message = None;
        vec![AppAction::Render]
    }

    /// Hand the selected place to an external navigation app.
    pub fn open_externally(&mut self) -> Vec<AppAction> {
        let Some(place) = self.search.selection().cloned() else {
            return vec![];
        };
        self.status_message = Some(format!("Opened {} in Maps", place.name));
        vec![AppAction::OpenExternally { place }, AppAction::Render]
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    /// Select the next (or previous) visible result, wrapping around.
    fn select_adjacent(&mut self, forward: bool) -> Vec<AppAction> {
        let ids: Vec<PlaceId> = self.visible_features().place_ids().collect();
        if ids.is_empty() {
            return vec![];
        }

        let current =
            self.search.selection().and_then(|s| ids.iter().position(|id| *id == s.id));
        let index = match (current, forward) {
            (None, true) => 0,
            (None, false) => ids.len() - 1,
            (Some(i), true) => (i + 1) % ids.len(),
            (Some(i), false) => (i + ids.len() - 1) % ids.len(),
        };

        self.select(ids[index])
    }

    fn on_route_completed(
        &mut self,
        generation: Generation,
        outcome: Lookup<Route>,
    ) -> Vec<AppAction> {
        match self.route.complete(generation, outcome) {
            None => vec![],
            Some(RouteResolution::Shown { bounds }) => {
                self.search.clear_selection();
                self.preview = PreviewState::Idle;
                self.camera = Camera::Rect(bounds);
                self.status_message = self.route.route().zip(self.route.destination()).map(
                    |(route, destination)| {
                        format!(
                            "{} to {}: {:.1} km, {} min",
                            capitalize(route.transport().label()),
                            destination.name,
                            route.distance_meters() / 1000.0,
                            route.expected_travel_time().as_secs().div_ceil(60)
                        )
                    },
                );
                vec![AppAction::Render]
            },
            Some(RouteResolution::Failed) => {
                if matches!(self.camera, Camera::Rect(_)) {
                    self.camera = Camera::home(&self.config);
                }
                self.status_message = Some(match self.route.phase() {
                    RoutePhase::Failed { error: Some(error) } => {
                        format!("Directions unavailable: {error}")
                    },
                    _ => "No route found".to_owned(),
                });
                vec![AppAction::Render]
            },
        }
    }

    /// Reset the route flow if the place it routes to is no longer a result.
    ///
    /// Directions can be requested from the previous results while a new
    /// search is in flight; once that search lands the route has nothing to
    /// point at.
    fn drop_orphaned_route(&mut self) {
        let results = self.search.results();
        let Some(orphan) = self.route.target().filter(|d| !results.contains(d)).map(|d| d.id)
        else {
            return;
        };

        tracing::debug!(destination = %orphan, "route destination left the results");
        self.route.reset();
        if matches!(self.camera, Camera::Rect(_)) {
            self.camera = Camera::home(&self.config);
        }
    }

    fn search_status(&self) -> String {
        let query = self.search.query();
        match self.search.last_outcome() {
            Some(LookupKind::Found) => {
                let count = self.search.results().len();
                let noun = if count == 1 { "result" } else { "results" };
                format!("{count} {noun} for \"{query}\"")
            },
            Some(LookupKind::Failed) => match self.search.last_error() {
                Some(error) => format!("Search failed: {error}"),
                None => "Search failed".to_owned(),
            },
            Some(LookupKind::Empty) | None => format!("No results for \"{query}\""),
        }
    }

    /// What the map currently depicts.
    pub fn visible_features(&self) -> VisibleFeatures {
        visible_features(self.config.home(), &self.search, &self.route)
    }

    /// Whether the detail panel is shown. Exactly when a place is selected.
    pub fn detail_visible(&self) -> bool {
        self.search.selection().is_some()
    }

    /// Home location and search region.
    pub fn config(&self) -> &HomeConfig {
        &self.config
    }

    /// Search flow state.
    pub fn search(&self) -> &SearchFlow {
        &self.search
    }

    /// Route flow state.
    pub fn route(&self) -> &RouteFlow {
        &self.route
    }

    /// Preview imagery state.
    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    /// Current viewport framing.
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
}
