//! Fuzz target for keyboard handling
//!
//! # Strategy
//!
//! - Arbitrary key presses, including multi-byte characters, routed through
//!   the search box into the App
//! - Searches resolve immediately with the simulated catalogue
//!
//! # Invariants
//!
//! - Search box cursor never passes the end of the buffer
//! - App invariants hold after every key
//! - Quit is only emitted for Esc
//! - NEVER panic on any key sequence

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use waypoint_app::{AppAction, InputState, KeyInput};
use waypoint_core::HomeConfig;
use waypoint_harness::{AppSnapshot, FlowSimulation, InvariantRegistry, Operation};

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Esc,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

impl From<Key> for KeyInput {
    fn from(key: Key) -> Self {
        match key {
            Key::Char(c) => Self::Char(c),
            Key::Enter => Self::Enter,
            Key::Backspace => Self::Backspace,
            Key::Delete => Self::Delete,
            Key::Tab => Self::Tab,
            Key::Esc => Self::Esc,
            Key::Left => Self::Left,
            Key::Right => Self::Right,
            Key::Up => Self::Up,
            Key::Down => Self::Down,
            Key::Home => Self::Home,
            Key::End => Self::End,
        }
    }
}

fuzz_target!(|keys: Vec<Key>| {
    let registry = InvariantRegistry::standard();
    let mut sim = FlowSimulation::new(HomeConfig::default(), 0);
    let mut input = InputState::new();

    for key in keys.into_iter().take(512) {
        let events = input.handle_key(key.into(), sim.app());
        assert!(input.cursor() <= input.buffer().chars().count());

        for event in events {
            let actions = sim.dispatch(event);
            if actions.contains(&AppAction::Quit) {
                assert!(matches!(key, Key::Esc));
                return;
            }
        }
        let _ = sim.apply(Operation::ResolveAll);
        registry.assert_all(&AppSnapshot::from_app(sim.app()), &format!("after {key:?}"));
    }
});
