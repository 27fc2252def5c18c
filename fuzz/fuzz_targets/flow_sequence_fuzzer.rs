//! Fuzz target for search and route flow sequencing
//!
//! # Strategy
//!
//! - Arbitrary user operations: search, select, directions, dismiss, handoff
//! - Lookups held back and resolved in arbitrary order with arbitrary
//!   outcomes (found, empty, failed), or never resolved at all
//! - Arbitrary home location and search span
//!
//! # Invariants
//!
//! - Detail panel visible iff a place is selected
//! - Overlay mode implies a stored route and destination
//! - Visible markers follow the overlay mode, home marker first
//! - Camera frames the route exactly while in overlay mode
//! - NEVER panic

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use waypoint_core::HomeConfig;
use waypoint_harness::{AppSnapshot, FlowSimulation, InvariantRegistry, Operation};

#[derive(Debug, Arbitrary)]
struct FlowInput {
    seed: u64,
    lat: i16,
    lon: i16,
    span_km: u8,
    operations: Vec<Operation>,
}

fuzz_target!(|input: FlowInput| {
    // Invalid homes fall back to the default.
    let lat = f64::from(input.lat) / 360.0;
    let lon = f64::from(input.lon) / 180.0;
    let span = f64::from(input.span_km.max(1)) * 1000.0;
    let config = HomeConfig::new(lat, lon, span).unwrap_or_default();

    let registry = InvariantRegistry::standard();
    let mut sim = FlowSimulation::new(config, input.seed);

    for (step, op) in input.operations.into_iter().take(256).enumerate() {
        let _ = sim.apply(op);
        let context = format!("after step {step} ({op:?})");
        registry.assert_all(&AppSnapshot::from_app(sim.app()), &context);
    }
});
