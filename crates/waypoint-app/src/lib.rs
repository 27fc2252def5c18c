//! Application layer for Waypoint
//!
//! Pure state machines and a generic runtime for the place-search and
//! route-overlay interaction flow, enabling deterministic simulation testing
//! with the same code that runs in production.
//!
//! # Components
//!
//! - [`SearchFlow`]: query, results and selection
//! - [`RouteFlow`]: directions, destination and overlay mode
//! - [`App`]: composes both flows with the preview panel and camera
//! - [`visible_features`]: the pure "what does the map show" derivation
//! - [`Bridge`]: executes lookup actions against the collaborators
//! - [`Driver`]: trait for platform-specific input and rendering
//! - [`Runtime`]: generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod bridge;
mod driver;
mod event;
mod features;
mod input;
mod route;
mod runtime;
mod search;
mod state;

pub use action::AppAction;
pub use app::App;
pub use bridge::{Bridge, PendingLookup};
pub use driver::Driver;
pub use event::AppEvent;
pub use features::{HOME_LABEL, Marker, MarkerKind, VisibleFeatures, visible_features};
pub use input::{InputState, KeyInput};
pub use route::{RouteFlow, RouteResolution};
pub use runtime::Runtime;
pub use search::SearchFlow;
pub use state::{Camera, Generation, PreviewState, RoutePhase, SearchPhase};
