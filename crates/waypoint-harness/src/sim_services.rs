//! Simulated map-service collaborators.
//!
//! Every collaborator resolves immediately and deterministically from a seed.
//! A shared [`FaultInjector`] decides which lookups fail, so a run with the
//! same seed and failure rate replays the same failures in the same order.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    collections::HashSet,
    f64::consts::PI,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use waypoint_app::Bridge;
use waypoint_core::{
    Coordinate, DirectionsService, ExternalNavigation, ImageryScene, LookupError, Place, PlaceId,
    PlaceSearch, PreviewImagery, Region, Route, TransportType,
};

use crate::catalogue::Catalogue;

/// Default number of points in a simulated route.
pub const DEFAULT_ROUTE_POINTS: usize = 24;

/// Average driving speed in m/s.
const DRIVING_SPEED: f64 = 11.0;

/// Average walking speed in m/s.
const WALKING_SPEED: f64 = 1.4;

/// Maximum lateral jitter applied to interior route points, in degrees.
const JITTER_DEGREES: f64 = 0.0004;

/// How far the alternative route bows away from the direct one, in degrees.
const DETOUR_DEGREES: f64 = 0.01;

/// Seeded source of failures and geometry noise.
#[derive(Debug)]
pub struct FaultInjector {
    rng: Mutex<ChaCha8Rng>,
    failure_rate: f64,
}

impl FaultInjector {
    /// Create an injector. `failure_rate` is clamped to `0.0..=1.0`.
    pub fn new(seed: u64, failure_rate: f64) -> Self {
        let failure_rate = if failure_rate.is_nan() { 0.0 } else { failure_rate.clamp(0.0, 1.0) };
        Self { rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)), failure_rate }
    }

    /// Injector that never fails.
    pub fn reliable(seed: u64) -> Self {
        Self::new(seed, 0.0)
    }

    /// Probability that a lookup fails.
    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }

    /// Decide whether the next lookup against `service` fails.
    pub fn roll(&self, service: &'static str) -> Result<(), LookupError> {
        if self.failure_rate <= 0.0 {
            return Ok(());
        }
        if self.with_rng(|rng| rng.gen_bool(self.failure_rate)) {
            tracing::debug!(service, "injecting lookup failure");
            return Err(LookupError::Network(format!("simulated {service} outage")));
        }
        Ok(())
    }

    /// Uniform noise in `-magnitude..=magnitude`.
    pub fn jitter(&self, magnitude: f64) -> f64 {
        let magnitude = magnitude.abs();
        self.with_rng(|rng| rng.gen_range(-magnitude..=magnitude))
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut ChaCha8Rng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }
}

/// Substring search over a fixed place list.
#[derive(Debug)]
pub struct SimPlaceSearch {
    places: Vec<Place>,
    faults: Arc<FaultInjector>,
}

impl SimPlaceSearch {
    /// Search over `places`.
    pub fn new(places: Vec<Place>, faults: Arc<FaultInjector>) -> Self {
        Self { places, faults }
    }

    /// Places whose name or subtitle contains `query` (case-insensitive) and
    /// that lie inside `region`, in catalogue order.
    pub fn matching(&self, query: &str, region: Region) -> Vec<Place> {
        let needle = query.trim().to_lowercase();
        let bounds = region.bounds();
        self.places
            .iter()
            .filter(|place| {
                place.name.to_lowercase().contains(&needle)
                    || place.subtitle.to_lowercase().contains(&needle)
            })
            .filter(|place| bounds.contains(place.coordinate))
            .cloned()
            .collect()
    }
}

impl PlaceSearch for SimPlaceSearch {
    async fn search(&self, query: &str, region: Region) -> Result<Vec<Place>, LookupError> {
        if query.trim().is_empty() {
            return Err(LookupError::InvalidRequest("empty query".into()));
        }
        self.faults.roll("search")?;
        Ok(self.matching(query, region))
    }
}

/// Interpolated routes with seeded jitter.
///
/// Returns two candidates, ranked: a direct path and a longer detour.
#[derive(Debug)]
pub struct SimDirections {
    points: usize,
    faults: Arc<FaultInjector>,
}

impl SimDirections {
    /// Routes with `points` coordinates each (at least two).
    pub fn new(points: usize, faults: Arc<FaultInjector>) -> Self {
        Self { points: points.max(2), faults }
    }

    /// Ranked candidates from `from` to `to`. Empty when the two coincide.
    pub fn candidates(
        &self,
        from: Coordinate,
        to: Coordinate,
        transport: TransportType,
    ) -> Vec<Route> {
        if from.distance_to(to) < 1.0 {
            return Vec::new();
        }

        [0.0, DETOUR_DEGREES]
            .into_iter()
            .filter_map(|bow| {
                let path = self.path(from, to, bow);
                let meters: f64 = path.windows(2).map(|w| w[0].distance_to(w[1])).sum();
                Route::new(path, travel_time(meters, transport), transport)
            })
            .collect()
    }

    fn path(&self, from: Coordinate, to: Coordinate, bow: f64) -> Vec<Coordinate> {
        let last = self.points - 1;
        (0..self.points)
            .map(|i| {
                let t = i as f64 / last as f64;
                let base = from.lerp(to, t);
                if i == 0 || i == last {
                    return base;
                }
                let lat = base.lat() + bow * (t * PI).sin() + self.faults.jitter(JITTER_DEGREES);
                let lon = base.lon() + self.faults.jitter(JITTER_DEGREES);
                Coordinate::new(lat, lon).unwrap_or(base)
            })
            .collect()
    }
}

fn travel_time(meters: f64, transport: TransportType) -> Duration {
    let speed = match transport {
        TransportType::Automobile => DRIVING_SPEED,
        TransportType::Walking => WALKING_SPEED,
    };
    Duration::from_secs_f64(meters / speed)
}

impl DirectionsService for SimDirections {
    async fn routes(
        &self,
        from: Coordinate,
        to: &Place,
        transport: TransportType,
    ) -> Result<Vec<Route>, LookupError> {
        self.faults.roll("directions")?;
        Ok(self.candidates(from, to.coordinate, transport))
    }
}

/// Preview imagery for a fixed set of places.
#[derive(Debug)]
pub struct SimImagery {
    covered: HashSet<PlaceId>,
    faults: Arc<FaultInjector>,
}

impl SimImagery {
    /// Imagery exists only for the `covered` places.
    pub fn new(covered: impl IntoIterator<Item = PlaceId>, faults: Arc<FaultInjector>) -> Self {
        Self { covered: covered.into_iter().collect(), faults }
    }
}

impl PreviewImagery for SimImagery {
    async fn scene(&self, place: &Place) -> Result<Option<ImageryScene>, LookupError> {
        self.faults.roll("imagery")?;
        Ok(self.covered.contains(&place.id).then(|| ImageryScene {
            place_id: place.id,
            caption: format!("Street-level view of {}", place.name),
        }))
    }
}

/// Records handoffs instead of opening anything.
///
/// Clones share the same log, so a test can keep one while the bridge owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct SimNavigation {
    opened: Arc<Mutex<Vec<PlaceId>>>,
}

impl SimNavigation {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places handed off so far, in order.
    pub fn opened(&self) -> Vec<PlaceId> {
        self.opened.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl ExternalNavigation for SimNavigation {
    fn open(&self, place: &Place) {
        tracing::info!(place = %place.id, name = %place.name, "simulated handoff");
        self.opened.lock().unwrap_or_else(PoisonError::into_inner).push(place.id);
    }
}

/// The full set of simulated collaborators over the built-in catalogue.
#[derive(Debug)]
pub struct SimServices {
    /// Place search.
    pub search: SimPlaceSearch,
    /// Directions.
    pub directions: SimDirections,
    /// Preview imagery.
    pub imagery: SimImagery,
    /// External navigation.
    pub navigation: SimNavigation,
}

impl SimServices {
    /// Build collaborators over the built-in catalogue, sharing one seeded
    /// fault injector.
    pub fn new(seed: u64, failure_rate: f64) -> Self {
        Self::from_catalogue(&Catalogue::toronto(), seed, failure_rate)
    }

    /// Build collaborators over `catalogue`.
    pub fn from_catalogue(catalogue: &Catalogue, seed: u64, failure_rate: f64) -> Self {
        let faults = Arc::new(FaultInjector::new(seed, failure_rate));
        Self {
            search: SimPlaceSearch::new(catalogue.places().to_vec(), Arc::clone(&faults)),
            directions: SimDirections::new(DEFAULT_ROUTE_POINTS, Arc::clone(&faults)),
            imagery: SimImagery::new(catalogue.imagery().iter().copied(), faults),
            navigation: SimNavigation::new(),
        }
    }

    /// Collaborators that never fail.
    pub fn reliable(seed: u64) -> Self {
        Self::new(seed, 0.0)
    }

    /// Use `points` coordinates per route (at least two).
    #[must_use]
    pub fn with_route_points(mut self, points: usize) -> Self {
        self.directions = SimDirections::new(points, Arc::clone(&self.directions.faults));
        self
    }

    /// Bridge over these collaborators.
    pub fn into_bridge(self) -> Bridge<SimPlaceSearch, SimDirections, SimImagery, SimNavigation> {
        Bridge::new(self.search, self.directions, self.imagery, self.navigation)
    }

    /// Bridge over these collaborators with a different navigation handoff.
    pub fn bridge_with<N: ExternalNavigation>(
        self,
        navigation: N,
    ) -> Bridge<SimPlaceSearch, SimDirections, SimImagery, N> {
        Bridge::new(self.search, self.directions, self.imagery, navigation)
    }
}

#[cfg(test)]
mod tests {
    use waypoint_core::HomeConfig;

    use super::*;
    use crate::catalogue::catalogue;

    fn reliable() -> Arc<FaultInjector> {
        Arc::new(FaultInjector::reliable(7))
    }

    #[tokio::test]
    async fn search_filters_by_text_and_region() {
        let search = SimPlaceSearch::new(catalogue(), reliable());
        let places = search.search("coffee", HomeConfig::default().region()).await.unwrap();

        let ids: Vec<_> = places.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PlaceId(1), PlaceId(2), PlaceId(3)]);
    }

    #[tokio::test]
    async fn blank_query_is_invalid() {
        let search = SimPlaceSearch::new(catalogue(), reliable());
        let result = search.search("  ", HomeConfig::default().region()).await;
        assert!(matches!(result, Err(LookupError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn directions_are_ranked_and_anchored() {
        let directions = SimDirections::new(42, reliable());
        let home = HomeConfig::default().home();
        let target = catalogue()[3].clone();

        let routes = directions.routes(home, &target, TransportType::Automobile).await.unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].points().len(), 42);
        assert_eq!(routes[0].points()[0], home);
        assert_eq!(routes[0].points()[41], target.coordinate);
        assert!(routes[0].distance_meters() < routes[1].distance_meters());
    }

    #[test]
    fn walking_takes_longer_than_driving() {
        let directions = SimDirections::new(8, reliable());
        let home = HomeConfig::default().home();
        let to = catalogue()[6].coordinate;

        let walking = directions.candidates(home, to, TransportType::Walking);
        let driving = directions.candidates(home, to, TransportType::Automobile);
        assert!(walking[0].expected_travel_time() > driving[0].expected_travel_time());
    }

    #[test]
    fn no_route_to_the_same_spot() {
        let directions = SimDirections::new(8, reliable());
        let home = HomeConfig::default().home();
        assert!(directions.candidates(home, home, TransportType::Walking).is_empty());
    }

    #[test]
    fn same_seed_same_geometry() {
        let home = HomeConfig::default().home();
        let to = catalogue()[0].coordinate;
        let a = SimDirections::new(16, Arc::new(FaultInjector::reliable(3)));
        let b = SimDirections::new(16, Arc::new(FaultInjector::reliable(3)));

        assert_eq!(
            a.candidates(home, to, TransportType::Automobile),
            b.candidates(home, to, TransportType::Automobile)
        );
    }

    #[test]
    fn failure_rate_extremes() {
        let always = FaultInjector::new(1, 1.0);
        let never = FaultInjector::new(1, 0.0);
        assert!(always.roll("search").is_err());
        assert!(never.roll("search").is_ok());
        assert_eq!(FaultInjector::new(1, 4.0).failure_rate(), 1.0);
    }

    #[tokio::test]
    async fn imagery_only_for_covered_places() {
        let places = catalogue();
        let imagery = SimImagery::new([places[0].id], reliable());

        assert!(imagery.scene(&places[0]).await.unwrap().is_some());
        assert!(imagery.scene(&places[1]).await.unwrap().is_none());
    }

    #[test]
    fn navigation_clones_share_log() {
        let navigation = SimNavigation::new();
        let handle = navigation.clone();
        navigation.open(&catalogue()[1]);
        assert_eq!(handle.opened(), vec![PlaceId(2)]);
    }

    #[tokio::test]
    async fn services_answer_from_loaded_catalogue() {
        let catalogue = Catalogue::from_toml(
            "[[place]]\nid = 40\nname = \"Queen's Park\"\nimagery = true\n\
             coordinate = { lat = 43.6625, lon = -79.3920 }\n",
        )
        .unwrap();
        let services = SimServices::from_catalogue(&catalogue, 5, 0.0);
        let region = HomeConfig::default().region();

        assert!(services.search.search("coffee", region).await.unwrap().is_empty());
        let parks = services.search.search("park", region).await.unwrap();
        assert_eq!(parks.len(), 1);
        assert_eq!(parks[0].id, PlaceId(40));
        assert!(services.imagery.scene(&parks[0]).await.unwrap().is_some());
    }
}
