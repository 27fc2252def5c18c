//! Driver trait for abstracting frontend I/O.
//!
//! The [`Driver`] trait decouples the application runtime from a specific
//! frontend. Each frontend implements the trait to collect user input and
//! draw the map, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::future::Future;

use crate::{App, AppEvent};

/// Abstracts frontend I/O for the application runtime.
///
/// The driver plays the map-renderer role: [`Driver::render`] draws
/// [`App::visible_features`] and the panels, and marker taps come back from
/// [`Driver::poll_events`] as [`AppEvent::PlaceSelected`].
///
/// # Implementations
///
/// - **TUI**: crossterm for keyboard events, ratatui canvas for the map
/// - **Simulation**: scripted event queue, renders recorded for assertions
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next batch of input events.
    ///
    /// May return an empty batch (for example on a periodic tick). The app is
    /// passed so input can be interpreted in context (panel open or closed).
    fn poll_events(
        &mut self,
        app: &App,
    ) -> impl Future<Output = Result<Vec<AppEvent>, Self::Error>> + Send;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Release frontend resources.
    fn stop(&mut self);
}
