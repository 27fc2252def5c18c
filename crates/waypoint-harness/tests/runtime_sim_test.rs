//! End-to-end tests running the production Runtime against simulation.
//!
//! # Test Strategy
//!
//! Each test scripts what a user does at the keyboard:
//! 1. Type a query and press Enter
//! 2. Move through results, open the panel, ask for directions
//! 3. Let the runtime resolve lookups through the simulated services
//! 4. Inspect the final App and the recorded renders
//!
//! # Oracle Pattern
//!
//! Tests end with oracle checks that verify:
//! - The final App state matches the expected screen
//! - Every render satisfied the standard invariants

use waypoint_app::{App, KeyInput, MarkerKind, Runtime};
use waypoint_core::{HomeConfig, PlaceId};
use waypoint_harness::{InvariantRegistry, SimDriver, SimDriverError, SimHandle, SimServices};

/// Run the script queued on a fresh driver against `services`.
async fn run(services: SimServices, script: impl FnOnce(&SimHandle)) -> (App, SimHandle) {
    let driver = SimDriver::new().with_invariants(InvariantRegistry::standard());
    let handle = driver.handle();
    script(&handle);

    let runtime = Runtime::new(driver, App::new(HomeConfig::default()), services.into_bridge());
    let app = runtime.run().await.expect("invariants hold on every render");
    (app, handle)
}

#[tokio::test]
async fn typed_search_shows_results() {
    let (app, handle) = run(SimServices::reliable(42), |h| h.submit("coffee")).await;

    // Oracle: three coffee places inside the home region, panel closed
    let ids: Vec<_> = app.search().results().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![PlaceId(1), PlaceId(2), PlaceId(3)]);
    assert!(!app.detail_visible());

    let last = handle.last_render().expect("rendered");
    assert_eq!(last.query, "coffee");
    assert_eq!(last.features.place_ids().count(), 3);
    assert_eq!(last.status.as_deref(), Some("3 results for \"coffee\""));
}

#[tokio::test]
async fn selecting_opens_panel_with_preview() {
    let (app, _) = run(SimServices::reliable(42), |h| {
        h.submit("coffee");
        h.inject_key(KeyInput::Down);
    })
    .await;

    assert_eq!(app.search().selection().map(|p| p.id), Some(PlaceId(1)));
    assert!(app.detail_visible());
    assert!(matches!(app.preview(), waypoint_app::PreviewState::Ready(_)));
}

#[tokio::test]
async fn directions_enter_overlay_mode() {
    let (app, handle) = run(SimServices::reliable(42), |h| {
        h.submit("coffee");
        h.inject_key(KeyInput::Down);
        h.inject_key(KeyInput::Down);
        h.inject_key(KeyInput::Char('d'));
    })
    .await;

    // Oracle: overlay on the second result, panel closed, route framed
    assert!(app.route().overlay_active());
    assert_eq!(app.route().destination().map(|p| p.id), Some(PlaceId(2)));
    assert!(!app.detail_visible());

    let last = handle.last_render().expect("rendered");
    let places: Vec<_> = last.features.place_ids().collect();
    assert_eq!(places, vec![PlaceId(2)]);
    assert_eq!(last.features.markers[0].kind, MarkerKind::Home);
    assert!(last.features.polyline.is_some_and(|line| line.len() == 24));
}

#[tokio::test]
async fn escape_leaves_overlay() {
    let (app, _) = run(SimServices::reliable(42), |h| {
        h.submit("market");
        h.inject_key(KeyInput::Tab);
        h.inject_key(KeyInput::Char('d'));
        h.inject_key(KeyInput::Esc);
    })
    .await;

    assert!(!app.route().overlay_active());
    assert_eq!(app.search().results().len(), 2);
    assert!(app.visible_features().polyline.is_none());
}

#[tokio::test]
async fn walking_directions_use_walking_transport() {
    let (app, _) = run(SimServices::reliable(7), |h| {
        h.submit("station");
        h.inject_key(KeyInput::Down);
        h.inject_key(KeyInput::Char('w'));
        h.inject_key(KeyInput::Char('d'));
    })
    .await;

    let route = app.route().route().expect("route shown");
    assert_eq!(route.transport(), waypoint_core::TransportType::Walking);
    assert!(app.status_message().is_some_and(|m| m.starts_with("Walking to Union Station")));
}

#[tokio::test]
async fn open_in_maps_hands_off_selection() {
    let services = SimServices::reliable(42);
    let navigation = services.navigation.clone();
    let (app, _) = run(services, |h| {
        h.submit("coffee");
        h.inject_key(KeyInput::Up);
        h.inject_key(KeyInput::Char('o'));
    })
    .await;

    assert_eq!(navigation.opened(), vec![PlaceId(3)]);
    assert_eq!(app.status_message(), Some("Opened Balzac's Coffee in Maps"));
}

#[tokio::test]
async fn outage_degrades_to_empty_results() {
    let (app, handle) = run(SimServices::new(1, 1.0), |h| h.submit("coffee")).await;

    assert!(app.search().results().is_empty());
    assert_eq!(
        app.status_message(),
        Some("Search failed: network error: simulated search outage")
    );
    assert_eq!(handle.last_render().expect("rendered").features.markers.len(), 1);
}

#[tokio::test]
async fn invariant_violation_stops_the_runtime() {
    use waypoint_harness::{AppSnapshot, Invariant, InvariantKind, InvariantResult, Violation};

    /// Deliberately wrong: claims results must never appear.
    struct NoResults;

    impl Invariant for NoResults {
        fn kind(&self) -> InvariantKind {
            InvariantKind::VisibleMarkersMatchMode
        }

        fn check(&self, state: &AppSnapshot) -> InvariantResult {
            if state.results.is_empty() {
                Ok(())
            } else {
                Err(Violation { invariant: self.kind(), message: "results shown".into() })
            }
        }
    }

    let mut registry = InvariantRegistry::new();
    registry.add(NoResults);
    let driver = SimDriver::new().with_invariants(registry);
    driver.handle().submit("coffee");

    let runtime = Runtime::new(
        driver,
        App::new(HomeConfig::default()),
        SimServices::reliable(1).into_bridge(),
    );
    let result = runtime.run().await;
    assert!(matches!(result, Err(SimDriverError::InvariantViolated { .. })));
}
