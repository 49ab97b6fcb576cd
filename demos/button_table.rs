//! Multi-function button decoded by a tickfsm engine.
//!
//! Shared by the `multi_function_button` demo and the gesture tests. The
//! input is active low: a pressed button reads 0.

use serde::Deserialize;
use std::rc::Rc;
use tickfsm::{predicate, state_ids, BuildError, Clock, Engine, Signal, StateActions};

state_ids! {
    pub enum ButtonState {
        Idle,
        Debounce,
        Pressed,
        Released,
        Single,
        Double,
        Long,
    }
}

const PRESSED: i32 = 0;
const RELEASED: i32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    Single,
    Double,
    Long,
}

/// Timing of the gesture decoder, in milliseconds.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ButtonTimings {
    pub tick_ms: u64,
    pub debounce_ms: u64,
    /// How long after a release a second press counts as a double click
    pub double_click_ms: u64,
    pub long_press_ms: u64,
}

impl Default for ButtonTimings {
    fn default() -> Self {
        Self {
            tick_ms: 10,
            debounce_ms: 40,
            double_click_ms: 100,
            long_press_ms: 3_000,
        }
    }
}

/// Build the gesture engine.
///
/// `read_level` samples the raw input (`true` = high = released) and is
/// called from the update action of every state that watches the pin.
/// `on_gesture` is called once per recognised gesture.
pub fn button_engine<C, I, G>(
    clock: C,
    timings: &ButtonTimings,
    read_level: I,
    on_gesture: G,
) -> Result<Engine, BuildError>
where
    C: Clock + 'static,
    I: Fn() -> bool + 'static,
    G: Fn(Gesture) + 'static,
{
    use ButtonState::*;

    let level = Signal::new(RELEASED);
    let read_level = Rc::new(read_level);
    let on_gesture = Rc::new(on_gesture);
    let mut engine = Engine::with_clock(Idle, clock);

    engine
        .transition(Idle, Debounce)
        .when(&level, PRESSED, predicate::eq)
        .add()?;
    engine
        .transition(Debounce, Idle)
        .when(&level, RELEASED, predicate::eq)
        .after(timings.debounce_ms)
        .add()?;
    engine
        .transition(Debounce, Pressed)
        .when(&level, PRESSED, predicate::eq)
        .after(timings.debounce_ms)
        .add()?;
    engine
        .transition(Pressed, Released)
        .when(&level, RELEASED, predicate::eq)
        .add()?;
    engine
        .transition(Released, Single)
        .after(timings.double_click_ms)
        .add()?;
    engine
        .transition(Released, Double)
        .when(&level, PRESSED, predicate::eq)
        .add()?;
    engine.transition(Single, Idle).add()?;
    engine
        .transition(Double, Idle)
        .when(&level, RELEASED, predicate::eq)
        .add()?;
    engine
        .transition(Pressed, Long)
        .after(timings.long_press_ms)
        .add()?;
    engine
        .transition(Long, Idle)
        .when(&level, RELEASED, predicate::eq)
        .add()?;

    let sample = || {
        let level = level.clone();
        let read_level = Rc::clone(&read_level);
        move || level.set_level(read_level())
    };
    let report = |gesture: Gesture| {
        let on_gesture = Rc::clone(&on_gesture);
        move || on_gesture(gesture)
    };

    for state in [Idle, Debounce, Pressed, Released] {
        engine.register_state_actions(state, StateActions::new().on_update(sample()))?;
    }
    engine.register_state_actions(
        Single,
        StateActions::new().on_enter(report(Gesture::Single)),
    )?;
    engine.register_state_actions(
        Double,
        StateActions::new()
            .on_enter(report(Gesture::Double))
            .on_update(sample()),
    )?;
    engine.register_state_actions(
        Long,
        StateActions::new()
            .on_enter(report(Gesture::Long))
            .on_update(sample()),
    )?;

    Ok(engine)
}
