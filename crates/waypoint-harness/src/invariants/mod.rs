//! Invariant checking for deterministic simulation testing.
//!
//! Invariants are properties that must always hold during execution.
//! Unlike example-based tests that check specific scenarios, invariants
//! verify behavioral properties across all possible event orderings.
//!
//! # Architecture
//!
//! The invariant system extracts observable state from the App into an
//! [`AppSnapshot`], then runs registered [`Invariant`] checks against it.
//!
//! # Usage
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! let snapshot = AppSnapshot::from_app(&app);
//! registry.check_all(&snapshot)?;
//! ```

mod checks;
mod snapshot;

use std::fmt;

pub use checks::{
    CameraFramesRoute, HomeMarkerFirst, OverlayRequiresRoute, PanelMatchesSelection,
    SelectionInResults, VisibleMarkersMatchMode,
};
pub use snapshot::AppSnapshot;

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Identifies an invariant in violation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvariantKind {
    /// Overlay mode requires a route and a listed destination.
    OverlayRequiresRoute,
    /// Detail panel is shown exactly when a place is selected.
    PanelMatchesSelection,
    /// The selection is one of the results.
    SelectionInResults,
    /// One home marker, drawn first.
    HomeMarkerFirst,
    /// Markers and polyline follow the overlay mode.
    VisibleMarkersMatchMode,
    /// Camera frames the route in overlay mode.
    CameraFramesRoute,
}

impl fmt::Display for InvariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OverlayRequiresRoute => "overlay_requires_route",
            Self::PanelMatchesSelection => "panel_matches_selection",
            Self::SelectionInResults => "selection_in_results",
            Self::HomeMarkerFirst => "home_marker_first",
            Self::VisibleMarkersMatchMode => "visible_markers_match_mode",
            Self::CameraFramesRoute => "camera_frames_route",
        };
        f.write_str(name)
    }
}

/// Invariant violation with context.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{invariant}: {message}")]
pub struct Violation {
    /// Which invariant was violated.
    pub invariant: InvariantKind,
    /// Description of what went wrong.
    pub message: String,
}

/// An invariant that can be checked against application state.
///
/// Invariants are behavioral properties that must always hold.
/// They capture WHAT must be true, not specific test scenarios.
pub trait Invariant: Send + Sync {
    /// Invariant identity for error reporting.
    fn kind(&self) -> InvariantKind;

    /// Check the invariant against the current state.
    ///
    /// Returns `Ok(())` if the invariant holds, or a [`Violation`]
    /// describing what went wrong.
    fn check(&self, state: &AppSnapshot) -> InvariantResult;
}

/// Registry of invariants to check.
///
/// Collects multiple invariants and runs them all against a snapshot.
/// Use [`InvariantRegistry::standard()`] for the flow invariants.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InvariantRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.invariants.iter().map(|inv| inv.kind())).finish()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with the standard flow invariants.
    ///
    /// Includes:
    /// - [`OverlayRequiresRoute`]: overlay implies a route and a listed destination
    /// - [`PanelMatchesSelection`]: panel shown iff a place is selected
    /// - [`SelectionInResults`]: the selection is a current result
    /// - [`HomeMarkerFirst`]: one home marker, first
    /// - [`VisibleMarkersMatchMode`]: markers and polyline follow the mode
    /// - [`CameraFramesRoute`]: camera frames the route in overlay mode
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(OverlayRequiresRoute);
        registry.add(PanelMatchesSelection);
        registry.add(SelectionInResults);
        registry.add(HomeMarkerFirst);
        registry.add(VisibleMarkersMatchMode);
        registry.add(CameraFramesRoute);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants against the given state.
    ///
    /// Returns `Ok(())` if all invariants hold, or all violations found.
    pub fn check_all(&self, state: &AppSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Check all invariants, panicking on the first failing batch.
    ///
    /// Use this in tests where you want immediate failure with context.
    #[allow(clippy::panic, reason = "Test assertion helper")]
    pub fn assert_all(&self, state: &AppSnapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("Invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}
