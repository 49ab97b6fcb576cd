//! Property-based tests for the tick algorithm.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated tables and input sequences.

use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use tickfsm::{
    predicate, Combinator, Engine, ManualClock, Millis, Signal, StateActions, StateId, Tick,
};

const STATES: u32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Call {
    Enter(u32),
    Exit(u32),
}

/// One generated row: source, dest, and an optional event `input == value`.
#[derive(Clone, Debug)]
struct Row {
    source: u32,
    dest: u32,
    on_input: Option<i32>,
}

prop_compose! {
    fn arbitrary_row()(
        source in 0..STATES,
        dest in 0..STATES,
        on_input in prop::option::of(0..3i32),
    ) -> Row {
        Row { source, dest, on_input }
    }
}

fn arbitrary_combinator() -> impl Strategy<Value = Combinator> {
    prop_oneof![Just(Combinator::And), Just(Combinator::Or)]
}

fn reference_guard(
    combinator: Combinator,
    events: &[(i32, i32)],
    timeout: Option<Millis>,
    elapsed: Millis,
) -> bool {
    if events.is_empty() && timeout.is_none() {
        return true;
    }
    let identity = combinator == Combinator::And;
    let apply = |a: bool, b: bool| match combinator {
        Combinator::And => a && b,
        Combinator::Or => a || b,
    };
    let events_hold = events
        .iter()
        .fold(identity, |acc, &(value, compare)| apply(acc, value == compare));
    let timed_out = timeout.map_or(identity, |t| elapsed >= t);
    apply(events_hold, timed_out)
}

proptest! {
    #[test]
    fn enter_follows_exit_by_exactly_one_tick(
        rows in prop::collection::vec(arbitrary_row(), 0..12),
        inputs in prop::collection::vec(0..3i32, 1..40),
    ) {
        let input = Signal::new(0);
        let calls: Rc<RefCell<Vec<Call>>> = Rc::default();
        let mut engine = Engine::new(0u32);

        for state in 0..STATES {
            let (enter, exit) = (Rc::clone(&calls), Rc::clone(&calls));
            engine.register_state_actions(
                state,
                StateActions::new()
                    .on_enter(move || enter.borrow_mut().push(Call::Enter(state)))
                    .on_exit(move || exit.borrow_mut().push(Call::Exit(state))),
            ).unwrap();
        }
        for row in &rows {
            let t = engine.add_transition(row.source, row.dest).unwrap();
            if let Some(value) = row.on_input {
                engine.add_event(t, &input, value, predicate::eq).unwrap();
            }
        }

        let mut pending_enter = Some(StateId::new(0));
        for value in inputs {
            input.set(value);
            let tick = engine.run();
            let tick_calls: Vec<Call> = calls.borrow_mut().drain(..).collect();

            let entered: Vec<u32> = tick_calls.iter().filter_map(|c| match c {
                Call::Enter(s) => Some(*s),
                _ => None,
            }).collect();
            let exited: Vec<u32> = tick_calls.iter().filter_map(|c| match c {
                Call::Exit(s) => Some(*s),
                _ => None,
            }).collect();

            let expected_enter: Vec<u32> =
                pending_enter.take().map(|s| s.get()).into_iter().collect();
            prop_assert_eq!(entered, expected_enter);

            match tick {
                Tick::Transitioned { from, to } => {
                    prop_assert_ne!(from, to);
                    prop_assert_eq!(exited, vec![from.get()]);
                    prop_assert_eq!(engine.current_state(), to);
                    pending_enter = Some(to);
                }
                Tick::SelfLoop { state } => {
                    prop_assert!(exited.is_empty());
                    prop_assert_eq!(engine.current_state(), state);
                }
                Tick::Stayed => prop_assert!(exited.is_empty()),
            }
        }
    }

    #[test]
    fn first_satisfied_row_wins(
        timeouts in prop::collection::vec(0..100u64, 1..8),
        jump in 0..120u64,
    ) {
        let clock = ManualClock::new();
        let mut engine = Engine::with_clock(0u32, clock.clone());
        for (i, timeout) in timeouts.iter().enumerate() {
            let t = engine.add_transition(0u32, i as u32 + 1).unwrap();
            engine.add_timeout(t, *timeout).unwrap();
        }

        clock.set(0);
        let first = engine.run();
        let expected_at_zero = timeouts.iter().position(|&t| t == 0);
        if let Some(i) = expected_at_zero {
            prop_assert_eq!(
                first,
                Tick::Transitioned { from: StateId::new(0), to: StateId::new(i as u32 + 1) }
            );
            return Ok(());
        }

        clock.set(jump);
        let tick = engine.run();
        match timeouts.iter().position(|&t| jump >= t) {
            Some(i) => prop_assert_eq!(
                tick,
                Tick::Transitioned { from: StateId::new(0), to: StateId::new(i as u32 + 1) }
            ),
            None => prop_assert_eq!(tick, Tick::Stayed),
        }
    }

    #[test]
    fn guard_matches_reference_fold(
        combinator in arbitrary_combinator(),
        events in prop::collection::vec((0..3i32, 0..3i32), 0..4),
        timeout in prop::option::of(0..50u64),
        elapsed in 0..100u64,
    ) {
        let clock = ManualClock::new();
        let mut engine = Engine::with_clock(0u32, clock);
        let t = engine.add_transition(0u32, 1u32).unwrap();
        engine.set_combinator(t, combinator).unwrap();

        let signals: Vec<Signal> = events.iter().map(|&(value, _)| Signal::new(value)).collect();
        for (signal, &(_, compare)) in signals.iter().zip(&events) {
            engine.add_event(t, signal, compare, predicate::eq).unwrap();
        }
        if let Some(ms) = timeout {
            engine.add_timeout(t, ms).unwrap();
        }

        let row = &engine.transitions()[t.index()];
        prop_assert_eq!(
            row.can_fire(StateId::new(0), Some(elapsed), 0),
            reference_guard(combinator, &events, timeout, elapsed)
        );
    }

    #[test]
    fn no_clock_never_fires_a_timeout(
        combinator in arbitrary_combinator(),
        timeout in 0..1_000u64,
        now in prop::option::of(0..2_000u64),
    ) {
        let mut engine = Engine::with_clock(0u32, ManualClock::new());
        let t = engine.add_transition(0u32, 1u32).unwrap();
        engine.set_combinator(t, combinator).unwrap();
        engine.add_timeout(t, timeout).unwrap();

        let fires = engine.transitions()[0].can_fire(StateId::new(0), now, 0);
        match now {
            None => prop_assert!(!fires),
            Some(now) => prop_assert_eq!(fires, now >= timeout),
        }
    }
}
