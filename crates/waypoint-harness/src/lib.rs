//! Deterministic simulation harness for Waypoint.
//!
//! Seeded, in-process implementations of the map-service collaborators and a
//! scripted [`Driver`](waypoint_app::Driver) so the production
//! [`Runtime`](waypoint_app::Runtime) runs unchanged in tests.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the flow
//! invariants.
//!
//! # Operations
//!
//! [`Operation`] is an `arbitrary`-derived user action used by the fuzzer and
//! the property tests to drive an [`App`](waypoint_app::App) through random
//! sequences, completing lookups in random order.

pub mod catalogue;
pub mod invariants;
pub mod operation;
pub mod sim_driver;
pub mod sim_services;

pub use catalogue::{Catalogue, CatalogueEntry, CatalogueError, TORONTO, catalogue};
pub use invariants::{
    AppSnapshot, CameraFramesRoute, HomeMarkerFirst, Invariant, InvariantKind, InvariantRegistry,
    InvariantResult, OverlayRequiresRoute, PanelMatchesSelection, SelectionInResults,
    VisibleMarkersMatchMode, Violation,
};
pub use operation::{FlowSimulation, Operation};
pub use sim_driver::{RenderRecord, SimDriver, SimDriverError, SimHandle};
pub use sim_services::{
    FaultInjector, SimDirections, SimImagery, SimNavigation, SimPlaceSearch, SimServices,
};
