//! Collaborator-to-Application translation layer.
//!
//! The [`Bridge`] owns the map-service collaborators and adapts them to the
//! application lifecycle.
//!
//! # Responsibilities
//!
//! - Converts lookup [`crate::AppAction`]s into self-contained futures that
//!   resolve to completion [`crate::AppEvent`]s tagged with the request's
//!   generation.
//! - Normalises raw collaborator results into [`Lookup`] values, keeping
//!   only the top-ranked route.
//! - Performs fire-and-forget handoffs synchronously.

use std::sync::Arc;

use futures::{FutureExt, future::BoxFuture};
use waypoint_core::{DirectionsService, ExternalNavigation, Lookup, PlaceSearch, PreviewImagery};

use crate::{AppAction, AppEvent};

/// A lookup in flight. Resolves to the completion event for the app.
pub type PendingLookup = BoxFuture<'static, AppEvent>;

/// Bridge between App actions and the map-service collaborators.
///
/// Generic over each collaborator so production and simulation share the
/// same translation code.
pub struct Bridge<S, D, I, N> {
    search: Arc<S>,
    directions: Arc<D>,
    imagery: Arc<I>,
    navigation: Arc<N>,
}

impl<S, D, I, N> Bridge<S, D, I, N>
where
    S: PlaceSearch,
    D: DirectionsService,
    I: PreviewImagery,
    N: ExternalNavigation,
{
    /// Create a bridge over the given collaborators.
    pub fn new(search: S, directions: D, imagery: I, navigation: N) -> Self {
        Self {
            search: Arc::new(search),
            directions: Arc::new(directions),
            imagery: Arc::new(imagery),
            navigation: Arc::new(navigation),
        }
    }

    /// Execute an App action.
    ///
    /// Lookup actions return the future to poll; everything else is handled
    /// immediately (or is not the bridge's concern) and returns `None`.
    pub fn process_app_action(&self, action: AppAction) -> Option<PendingLookup> {
        match action {
            AppAction::Search { generation, query, region } => {
                let search = Arc::clone(&self.search);
                tracing::info!(%generation, %query, "searching places");
                Some(
                    async move {
                        let result = search.search(&query, region).await;
                        AppEvent::SearchCompleted { generation, outcome: Lookup::from_list(result) }
                    }
                    .boxed(),
                )
            },
            AppAction::FetchRoute { generation, from, to, transport } => {
                let directions = Arc::clone(&self.directions);
                tracing::info!(%generation, destination = %to.id, "fetching directions");
                Some(
                    async move {
                        let result = directions.routes(from, &to, transport).await;
                        AppEvent::RouteCompleted { generation, outcome: Lookup::first_of(result) }
                    }
                    .boxed(),
                )
            },
            AppAction::FetchPreview { generation, place } => {
                let imagery = Arc::clone(&self.imagery);
                Some(
                    async move {
                        let result = imagery.scene(&place).await;
                        AppEvent::PreviewCompleted {
                            generation,
                            outcome: Lookup::from_option(result),
                        }
                    }
                    .boxed(),
                )
            },
            AppAction::OpenExternally { place } => {
                tracing::info!(place = %place.id, "opening externally");
                self.navigation.open(&place);
                None
            },
            AppAction::Render | AppAction::Quit => None,
        }
    }

    /// Search collaborator.
    pub fn search(&self) -> &S {
        &self.search
    }

    /// Directions collaborator.
    pub fn directions(&self) -> &D {
        &self.directions
    }

    /// Imagery collaborator.
    pub fn imagery(&self) -> &I {
        &self.imagery
    }

    /// Navigation collaborator.
    pub fn navigation(&self) -> &N {
        &self.navigation
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicU64, AtomicUsize, Ordering},
        time::Duration,
    };

    use waypoint_core::{
        Coordinate, HomeConfig, ImageryScene, LookupError, Place, PlaceId, Region, Route,
        TransportType,
    };

    use super::*;
    use crate::Generation;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn place(id: u64) -> Place {
        Place::new(PlaceId(id), format!("Place {id}"), "", coord(43.65, -79.39))
    }

    struct FixedSearch(Result<Vec<Place>, LookupError>);

    impl PlaceSearch for FixedSearch {
        async fn search(&self, _query: &str, _region: Region) -> Result<Vec<Place>, LookupError> {
            self.0.clone()
        }
    }

    struct RankedDirections;

    impl DirectionsService for RankedDirections {
        async fn routes(
            &self,
            from: Coordinate,
            to: &Place,
            transport: TransportType,
        ) -> Result<Vec<Route>, LookupError> {
            let fast = Route::new(vec![from, to.coordinate], Duration::from_secs(60), transport);
            let slow = Route::new(
                vec![from, coord(43.0, -79.0), to.coordinate],
                Duration::from_secs(600),
                transport,
            );
            Ok(fast.into_iter().chain(slow).collect())
        }
    }

    struct NoImagery;

    impl PreviewImagery for NoImagery {
        async fn scene(&self, _place: &Place) -> Result<Option<ImageryScene>, LookupError> {
            Ok(None)
        }
    }

    #[derive(Default)]
    struct CountingNavigation {
        opened: AtomicUsize,
        last: AtomicU64,
    }

    impl ExternalNavigation for CountingNavigation {
        fn open(&self, place: &Place) {
            self.opened.fetch_add(1, Ordering::SeqCst);
            self.last.store(place.id.0, Ordering::SeqCst);
        }
    }

    fn bridge(
        search: Result<Vec<Place>, LookupError>,
    ) -> Bridge<FixedSearch, RankedDirections, NoImagery, CountingNavigation> {
        Bridge::new(FixedSearch(search), RankedDirections, NoImagery, CountingNavigation::default())
    }

    #[tokio::test]
    async fn search_completion_carries_generation() {
        let bridge = bridge(Ok(vec![place(1), place(2)]));
        let region = HomeConfig::default().region();
        let pending = bridge.process_app_action(AppAction::Search {
            generation: Generation(7),
            query: "coffee".into(),
            region,
        });

        let event = pending.unwrap().await;
        assert_eq!(event, AppEvent::SearchCompleted {
            generation: Generation(7),
            outcome: Lookup::Found(vec![place(1), place(2)]),
        });
    }

    #[tokio::test]
    async fn empty_search_is_empty_not_failed() {
        let bridge = bridge(Ok(Vec::new()));
        let region = HomeConfig::default().region();
        let event = bridge
            .process_app_action(AppAction::Search {
                generation: Generation(1),
                query: "nothing".into(),
                region,
            })
            .unwrap()
            .await;

        assert!(matches!(event, AppEvent::SearchCompleted { outcome: Lookup::Empty, .. }));
    }

    #[tokio::test]
    async fn route_keeps_top_ranked_candidate() {
        let bridge = bridge(Ok(Vec::new()));
        let event = bridge
            .process_app_action(AppAction::FetchRoute {
                generation: Generation(3),
                from: HomeConfig::default().home(),
                to: place(1),
                transport: TransportType::Walking,
            })
            .unwrap()
            .await;

        let (generation, route) = match event {
            AppEvent::RouteCompleted { generation, outcome: Lookup::Found(route) } => {
                (generation, route)
            },
            other => unreachable!("expected a found route, got {other:?}"),
        };
        assert_eq!(generation, Generation(3));
        assert_eq!(route.points().len(), 2);
        assert_eq!(route.transport(), TransportType::Walking);
    }

    #[tokio::test]
    async fn missing_imagery_is_empty() {
        let bridge = bridge(Ok(Vec::new()));
        let event = bridge
            .process_app_action(AppAction::FetchPreview {
                generation: Generation(1),
                place: place(1),
            })
            .unwrap()
            .await;

        assert!(matches!(event, AppEvent::PreviewCompleted { outcome: Lookup::Empty, .. }));
    }

    #[test]
    fn open_externally_is_immediate() {
        let bridge = bridge(Ok(Vec::new()));
        assert!(bridge.process_app_action(AppAction::OpenExternally { place: place(5) }).is_none());
        assert_eq!(bridge.navigation().opened.load(Ordering::SeqCst), 1);
        assert_eq!(PlaceId(bridge.navigation().last.load(Ordering::SeqCst)), PlaceId(5));
    }

    #[test]
    fn render_and_quit_are_not_bridge_actions() {
        let bridge = bridge(Ok(Vec::new()));
        assert!(bridge.process_app_action(AppAction::Render).is_none());
        assert!(bridge.process_app_action(AppAction::Quit).is_none());
    }
}
