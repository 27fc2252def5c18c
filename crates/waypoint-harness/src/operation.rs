//! Random user operations for model-based testing.
//!
//! An [`Operation`] is one thing a user (or the network) can do. The
//! [`FlowSimulation`] applies operations to an [`App`] synchronously, holding
//! issued lookups until an operation resolves them. Resolving in arbitrary
//! order is what exercises the last-request-wins handling.

use arbitrary::Arbitrary;
use waypoint_app::{App, AppAction, AppEvent};
use waypoint_core::{HomeConfig, ImageryScene, Lookup, LookupError, PlaceId, TransportType};

use crate::sim_services::SimServices;

/// Queries operations pick from. Includes one blank query.
pub const QUERIES: &[&str] = &["coffee", "market", "station", "front st", "tea", "  "];

/// A single user or network operation.
#[derive(Debug, Clone, Copy, Arbitrary)]
pub enum Operation {
    /// Submit one of [`QUERIES`], by index modulo length.
    Search {
        /// Query index.
        query: u8,
    },
    /// Tap a result by index. One index past the end taps an unknown id.
    Select {
        /// Result index.
        index: u8,
    },
    /// Select the next visible result.
    SelectNext,
    /// Select the previous visible result.
    SelectPrevious,
    /// Close the detail panel.
    ClearSelection,
    /// Ask for directions to the selection.
    RequestDirections,
    /// Switch between walking and driving.
    SetTransport {
        /// Walking if set, driving otherwise.
        walking: bool,
    },
    /// Leave route overlay mode.
    DismissRoute,
    /// Hand the selection to external navigation.
    OpenExternally,
    /// Resolve one in-flight lookup.
    Resolve {
        /// Which pending lookup, modulo count.
        index: u8,
        /// 0-1 found, 2 empty, 3 failed (modulo 4).
        outcome: u8,
    },
    /// Resolve every in-flight lookup successfully, oldest first.
    ResolveAll,
}

/// Synchronous App driver with manually resolved lookups.
#[derive(Debug)]
pub struct FlowSimulation {
    app: App,
    services: SimServices,
    pending: Vec<AppAction>,
    opened: Vec<PlaceId>,
}

impl FlowSimulation {
    /// Start from a fresh app with reliable simulated services.
    pub fn new(config: HomeConfig, seed: u64) -> Self {
        Self {
            app: App::new(config),
            services: SimServices::reliable(seed),
            pending: Vec::new(),
            opened: Vec::new(),
        }
    }

    /// Apply one operation. Returns the actions the app emitted.
    pub fn apply(&mut self, op: Operation) -> Vec<AppAction> {
        match op {
            Operation::Search { query } => {
                let query = QUERIES[usize::from(query) % QUERIES.len()];
                self.dispatch(AppEvent::QuerySubmitted { query: query.to_owned() })
            },
            Operation::Select { index } => {
                let results = self.app.search().results();
                let index = usize::from(index) % (results.len() + 1);
                let place_id = results.get(index).map_or(PlaceId(0), |p| p.id);
                self.dispatch(AppEvent::PlaceSelected { place_id })
            },
            Operation::SelectNext => self.dispatch(AppEvent::SelectNext),
            Operation::SelectPrevious => self.dispatch(AppEvent::SelectPrevious),
            Operation::ClearSelection => self.dispatch(AppEvent::SelectionCleared),
            Operation::RequestDirections => self.dispatch(AppEvent::DirectionsRequested),
            Operation::SetTransport { walking } => {
                let transport =
                    if walking { TransportType::Walking } else { TransportType::Automobile };
                self.dispatch(AppEvent::TransportChanged { transport })
            },
            Operation::DismissRoute => self.dispatch(AppEvent::RouteDismissed),
            Operation::OpenExternally => self.dispatch(AppEvent::OpenExternallyRequested),
            Operation::Resolve { index, outcome } => {
                if self.pending.is_empty() {
                    return vec![];
                }
                let action = self.pending.remove(usize::from(index) % self.pending.len());
                let event = self.complete(action, outcome % 4);
                event.map_or_else(Vec::new, |event| self.dispatch(event))
            },
            Operation::ResolveAll => {
                let mut actions = Vec::new();
                while !self.pending.is_empty() {
                    let action = self.pending.remove(0);
                    if let Some(event) = self.complete(action, 0) {
                        actions.extend(self.dispatch(event));
                    }
                }
                actions
            },
        }
    }

    /// Feed an event to the app, holding any lookups it issues.
    pub fn dispatch(&mut self, event: AppEvent) -> Vec<AppAction> {
        let actions = self.app.handle(event);
        for action in &actions {
            match action {
                AppAction::OpenExternally { place } => self.opened.push(place.id),
                action if action.is_lookup() => self.pending.push(action.clone()),
                _ => {},
            }
        }
        actions
    }

    /// Build the completion event for a held lookup.
    fn complete(&self, action: AppAction, outcome: u8) -> Option<AppEvent> {
        let failure = || LookupError::Network("simulated outage".into());
        match action {
            AppAction::Search { generation, query, region } => {
                let outcome = match outcome {
                    2 => Lookup::Empty,
                    3 => Lookup::Failed(failure()),
                    _ => Lookup::from_list(Ok(self.services.search.matching(&query, region))),
                };
                Some(AppEvent::SearchCompleted { generation, outcome })
            },
            AppAction::FetchRoute { generation, from, to, transport } => {
                let outcome = match outcome {
                    2 => Lookup::Empty,
                    3 => Lookup::Failed(failure()),
                    _ => Lookup::first_of(Ok(self.services.directions.candidates(
                        from,
                        to.coordinate,
                        transport,
                    ))),
                };
                Some(AppEvent::RouteCompleted { generation, outcome })
            },
            AppAction::FetchPreview { generation, place } => {
                let outcome = match outcome {
                    2 => Lookup::Empty,
                    3 => Lookup::Failed(failure()),
                    _ => Lookup::Found(ImageryScene {
                        place_id: place.id,
                        caption: format!("Street-level view of {}", place.name),
                    }),
                };
                Some(AppEvent::PreviewCompleted { generation, outcome })
            },
            AppAction::OpenExternally { .. } | AppAction::Render | AppAction::Quit => None,
        }
    }

    /// Application state.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Number of lookups waiting to be resolved.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Places handed to external navigation, in order.
    pub fn opened(&self) -> &[PlaceId] {
        &self.opened
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_then_resolve_shows_results() {
        let mut sim = FlowSimulation::new(HomeConfig::default(), 1);
        let _ = sim.apply(Operation::Search { query: 0 });
        assert_eq!(sim.pending(), 1);

        let _ = sim.apply(Operation::ResolveAll);
        assert_eq!(sim.pending(), 0);
        assert_eq!(sim.app().search().results().len(), 3);
    }

    #[test]
    fn blank_query_issues_nothing() {
        let mut sim = FlowSimulation::new(HomeConfig::default(), 1);
        let actions = sim.apply(Operation::Search { query: 5 });
        assert!(actions.is_empty());
        assert_eq!(sim.pending(), 0);
    }

    #[test]
    fn directions_round_trip_enters_overlay() {
        let mut sim = FlowSimulation::new(HomeConfig::default(), 1);
        let _ = sim.apply(Operation::Search { query: 1 });
        let _ = sim.apply(Operation::ResolveAll);
        let _ = sim.apply(Operation::Select { index: 0 });
        let _ = sim.apply(Operation::RequestDirections);
        let _ = sim.apply(Operation::ResolveAll);

        assert!(sim.app().route().overlay_active());
        assert!(!sim.app().detail_visible());
    }

    #[test]
    fn open_externally_is_recorded() {
        let mut sim = FlowSimulation::new(HomeConfig::default(), 1);
        let _ = sim.apply(Operation::Search { query: 0 });
        let _ = sim.apply(Operation::ResolveAll);
        let _ = sim.apply(Operation::Select { index: 1 });
        let _ = sim.apply(Operation::OpenExternally);

        assert_eq!(sim.opened(), &[PlaceId(2)]);
    }
}
