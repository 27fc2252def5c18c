//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: search and route state machines
//! - [`Bridge`]: map-service collaborators
//! - [`Driver`]: platform-specific input and rendering
//!
//! It is the single dispatcher: every state change happens in
//! [`App::handle`] on this task, in the order events arrive. Lookups run
//! concurrently as futures; their completions are fed back as events and the
//! app's generation checks discard the superseded ones.

use futures::{StreamExt, stream::FuturesUnordered};
use waypoint_core::{DirectionsService, ExternalNavigation, PlaceSearch, PreviewImagery};

use crate::{App, AppAction, AppEvent, Bridge, Driver, bridge::PendingLookup};

/// Generic runtime that orchestrates App, Bridge, and Driver.
///
/// # Type Parameters
///
/// - `R`: Platform-specific I/O driver
/// - `S`, `D`, `I`, `N`: map-service collaborators held by the bridge
pub struct Runtime<R, S, D, I, N>
where
    R: Driver,
{
    driver: R,
    app: App,
    bridge: Bridge<S, D, I, N>,
    in_flight: FuturesUnordered<PendingLookup>,
}

impl<R, S, D, I, N> Runtime<R, S, D, I, N>
where
    R: Driver,
    S: PlaceSearch,
    D: DirectionsService,
    I: PreviewImagery,
    N: ExternalNavigation,
{
    /// Create a new runtime.
    pub fn new(driver: R, app: App, bridge: Bridge<S, D, I, N>) -> Self {
        Self { driver, app, bridge, in_flight: FuturesUnordered::new() }
    }

    /// Run the main event loop until the app asks to quit.
    ///
    /// Each cycle waits for whichever comes first: a lookup completion or a
    /// batch of driver input. Completions that are already available win, so
    /// a scripted driver observes lookups resolving in request order.
    ///
    /// Returns the final application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails to poll input or render.
    pub async fn run(mut self) -> Result<App, R::Error> {
        self.driver.render(&self.app)?;

        loop {
            let events = tokio::select! {
                biased;

                Some(event) = self.in_flight.next(), if !self.in_flight.is_empty() => vec![event],
                polled = self.driver.poll_events(&self.app) => polled?,
            };

            if self.process_events(events)? {
                break;
            }
        }

        if !self.in_flight.is_empty() {
            tracing::debug!(pending = self.in_flight.len(), "abandoning in-flight lookups");
        }
        self.driver.stop();
        Ok(self.app)
    }

    /// Feed events to the App and execute the resulting actions.
    ///
    /// Returns `true` if the application should quit.
    fn process_events(&mut self, events: Vec<AppEvent>) -> Result<bool, R::Error> {
        let mut needs_render = false;

        for event in events {
            for action in self.app.handle(event) {
                match action {
                    AppAction::Render => needs_render = true,
                    AppAction::Quit => return Ok(true),
                    AppAction::Search { .. }
                    | AppAction::FetchRoute { .. }
                    | AppAction::FetchPreview { .. }
                    | AppAction::OpenExternally { .. } => {
                        if let Some(pending) = self.bridge.process_app_action(action) {
                            self.in_flight.push(pending);
                        }
                    },
                }
            }
        }

        if needs_render {
            self.driver.render(&self.app)?;
        }
        Ok(false)
    }

    /// Number of lookups still in flight.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Get a reference to the App.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a reference to the Bridge.
    pub fn bridge(&self) -> &Bridge<S, D, I, N> {
        &self.bridge
    }
}
