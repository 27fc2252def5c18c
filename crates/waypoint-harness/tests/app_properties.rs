//! Property-based tests for the App state machine.
//!
//! Tests verify that invariants hold under arbitrary operation sequences,
//! including lookups resolving out of order, failing, or never resolving.

use proptest::prelude::*;
use waypoint_app::{AppAction, AppEvent, Generation};
use waypoint_core::{HomeConfig, Lookup};
use waypoint_harness::{AppSnapshot, FlowSimulation, InvariantRegistry, Operation};

/// Generate random operations, biased towards resolving lookups.
fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => any::<u8>().prop_map(|query| Operation::Search { query }),
        3 => any::<u8>().prop_map(|index| Operation::Select { index }),
        1 => Just(Operation::SelectNext),
        1 => Just(Operation::SelectPrevious),
        1 => Just(Operation::ClearSelection),
        2 => Just(Operation::RequestDirections),
        1 => any::<bool>().prop_map(|walking| Operation::SetTransport { walking }),
        1 => Just(Operation::DismissRoute),
        1 => Just(Operation::OpenExternally),
        4 => (any::<u8>(), any::<u8>())
            .prop_map(|(index, outcome)| Operation::Resolve { index, outcome }),
        1 => Just(Operation::ResolveAll),
    ]
}

proptest! {
    /// Invariants hold after every operation.
    #[test]
    fn invariants_hold_under_arbitrary_operations(
        seed in any::<u64>(),
        ops in prop::collection::vec(operation_strategy(), 1..80),
    ) {
        let registry = InvariantRegistry::standard();
        let mut sim = FlowSimulation::new(HomeConfig::default(), seed);

        for (step, op) in ops.into_iter().enumerate() {
            let _ = sim.apply(op);
            let context = format!("after step {step} ({op:?})");
            registry.assert_all(&AppSnapshot::from_app(sim.app()), &context);
        }
    }

    /// Deriving the visible features twice gives the same answer.
    #[test]
    fn visible_features_are_idempotent(
        ops in prop::collection::vec(operation_strategy(), 0..60),
    ) {
        let mut sim = FlowSimulation::new(HomeConfig::default(), 9);
        for op in ops {
            let _ = sim.apply(op);
        }
        prop_assert_eq!(sim.app().visible_features(), sim.app().visible_features());
    }

    /// A completion for a generation that was never issued changes nothing.
    #[test]
    fn unknown_completions_are_ignored(
        ops in prop::collection::vec(operation_strategy(), 0..40),
        generation in 1_000u64..2_000,
    ) {
        let mut sim = FlowSimulation::new(HomeConfig::default(), 3);
        for op in ops {
            let _ = sim.apply(op);
        }
        let before = AppSnapshot::from_app(sim.app());

        let actions = sim.dispatch(AppEvent::RouteCompleted {
            generation: Generation(generation),
            outcome: Lookup::Empty,
        });
        prop_assert!(actions.is_empty());
        let actions = sim.dispatch(AppEvent::SearchCompleted {
            generation: Generation(generation),
            outcome: Lookup::Empty,
        });
        prop_assert!(actions.is_empty());

        prop_assert_eq!(before, AppSnapshot::from_app(sim.app()));
    }

    /// Overlay mode only ends through a new query or a dismissal, never by
    /// closing the detail panel.
    #[test]
    fn closing_panel_never_ends_overlay(
        ops in prop::collection::vec(operation_strategy(), 0..60),
    ) {
        let mut sim = FlowSimulation::new(HomeConfig::default(), 5);
        for op in ops {
            let _ = sim.apply(op);
        }
        let overlay = sim.app().route().overlay_active();
        let _ = sim.apply(Operation::ClearSelection);
        prop_assert_eq!(overlay, sim.app().route().overlay_active());
    }

    /// Quit is never emitted without a quit request.
    #[test]
    fn quit_is_only_emitted_on_request(
        ops in prop::collection::vec(operation_strategy(), 0..60),
    ) {
        let mut sim = FlowSimulation::new(HomeConfig::default(), 11);
        for op in ops {
            let actions = sim.apply(op);
            prop_assert!(!actions.contains(&AppAction::Quit));
        }
    }
}
