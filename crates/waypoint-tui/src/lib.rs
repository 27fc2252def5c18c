//! Terminal UI for Waypoint
//!
//! A thin shell over [`waypoint_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`waypoint_app::Runtime`].
//!
//! This crate only handles terminal rendering, the command line and the
//! "Open in Maps" handoff.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cli;
pub mod handoff;
pub mod terminal;
pub mod ui;

pub use cli::{Args, CliError};
pub use handoff::{MapsLink, maps_url};
pub use terminal::{TerminalDriver, TerminalError};
pub use waypoint_app::{App, AppEvent, Bridge, Driver, InputState, KeyInput, Runtime};
