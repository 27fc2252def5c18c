//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as the terminal driver but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`waypoint_app::Runtime`] orchestration code runs in both production and
//! simulation.
//!
//! Input is a script of key presses and events. Every render is recorded and
//! optionally checked against an [`InvariantRegistry`]. When the script runs
//! out the driver asks the app to quit.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, PoisonError},
};

use waypoint_app::{App, AppEvent, Camera, Driver, InputState, KeyInput, VisibleFeatures};

use crate::invariants::{AppSnapshot, InvariantRegistry, Violation};

/// Error type for simulation driver.
#[derive(Debug, thiserror::Error)]
pub enum SimDriverError {
    /// A render broke one or more invariants.
    #[error("{} invariant violation(s) at render {render}: {violations:?}", .violations.len())]
    InvariantViolated {
        /// Zero-based index of the offending render.
        render: usize,
        /// Everything that failed.
        violations: Vec<Violation>,
    },
}

/// What the user saw at one render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRecord {
    /// Map contents.
    pub features: VisibleFeatures,
    /// Whether the detail panel was shown.
    pub detail_visible: bool,
    /// Viewport framing.
    pub camera: Camera,
    /// Status line.
    pub status: Option<String>,
    /// Search box text.
    pub query: String,
}

#[derive(Debug, Clone)]
enum Step {
    Key(KeyInput),
    Event(AppEvent),
}

/// Shared state for input injection and render capture.
///
/// This allows injection and inspection from outside the runtime.
#[derive(Debug, Default)]
struct SharedState {
    script: VecDeque<Step>,
    renders: Vec<RenderRecord>,
}

/// Handle onto a driver's script and render log.
///
/// Stays usable after the driver has been moved into a runtime.
#[derive(Debug, Clone, Default)]
pub struct SimHandle {
    state: Arc<Mutex<SharedState>>,
}

impl SimHandle {
    fn with_state<T>(&self, f: impl FnOnce(&mut SharedState) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    /// Queue an `AppEvent`.
    pub fn inject_event(&self, event: AppEvent) {
        self.with_state(|s| s.script.push_back(Step::Event(event)));
    }

    /// Queue a key press.
    pub fn inject_key(&self, key: KeyInput) {
        self.with_state(|s| s.script.push_back(Step::Key(key)));
    }

    /// Queue one key press per character of `text`.
    pub fn type_text(&self, text: &str) {
        self.with_state(|s| s.script.extend(text.chars().map(|c| Step::Key(KeyInput::Char(c)))));
    }

    /// Type `text` into the search box and press Enter.
    pub fn submit(&self, text: &str) {
        self.type_text(text);
        self.inject_key(KeyInput::Enter);
    }

    /// Check if there is scripted input left.
    pub fn has_pending(&self) -> bool {
        self.with_state(|s| !s.script.is_empty())
    }

    /// All renders so far.
    pub fn renders(&self) -> Vec<RenderRecord> {
        self.with_state(|s| s.renders.clone())
    }

    /// The most recent render.
    pub fn last_render(&self) -> Option<RenderRecord> {
        self.with_state(|s| s.renders.last().cloned())
    }
}

/// Simulation driver for deterministic testing.
///
/// Implements [`Driver`] trait so the same [`waypoint_app::Runtime`]
/// orchestration code runs in both the terminal frontend and simulation
/// tests.
#[derive(Debug, Default)]
pub struct SimDriver {
    handle: SimHandle,
    input: InputState,
    invariants: Option<InvariantRegistry>,
}

impl SimDriver {
    /// Create a new simulation driver with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable invariant checking on every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self
    }

    /// Handle for scripting input and reading renders.
    pub fn handle(&self) -> SimHandle {
        self.handle.clone()
    }

    /// Search box state.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    fn next_step(&self) -> Option<Step> {
        self.handle.with_state(|s| s.script.pop_front())
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_events(&mut self, app: &App) -> Result<Vec<AppEvent>, Self::Error> {
        match self.next_step() {
            Some(Step::Key(key)) => Ok(self.input.handle_key(key, app)),
            Some(Step::Event(event)) => Ok(vec![event]),
            None => {
                tracing::debug!("script exhausted, quitting");
                Ok(vec![AppEvent::QuitRequested])
            },
        }
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        let record = RenderRecord {
            features: app.visible_features(),
            detail_visible: app.detail_visible(),
            camera: app.camera(),
            status: app.status_message().map(str::to_owned),
            query: self.input.buffer().to_owned(),
        };
        let render = self.handle.with_state(|s| {
            s.renders.push(record);
            s.renders.len() - 1
        });

        if let Some(registry) = &self.invariants
            && let Err(violations) = registry.check_all(&AppSnapshot::from_app(app))
        {
            return Err(SimDriverError::InvariantViolated { render, violations });
        }
        Ok(())
    }

    fn stop(&mut self) {}
}
