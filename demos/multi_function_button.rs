//! Multi-function button: single, double and long click detection.
//!
//! The pin is simulated from a scripted press pattern so the demo runs
//! anywhere; on hardware, `read_level` would sample the GPIO instead and
//! the clock would be a `MonotonicClock`.
//!
//! Run with `RUST_LOG=debug` to see every transition. Timings can be
//! overridden with `BUTTON_TIMINGS='{"long_press_ms": 1500}'`.

mod button_table;

use button_table::{button_engine, ButtonState, ButtonTimings, Gesture};
use tickfsm::{Clock, ManualClock, Millis};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Intervals (start, end) during which the button is held down.
const SCRIPT: &[(Millis, Millis)] = &[
    // bounce, ignored
    (100, 120),
    // single click
    (500, 650),
    // double click
    (1_500, 1_600),
    (1_650, 1_750),
    // long press
    (2_500, 6_000),
];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let timings = match std::env::var("BUTTON_TIMINGS") {
        Ok(json) => match serde_json::from_str::<ButtonTimings>(&json) {
            Ok(timings) => timings,
            Err(e) => {
                error!(error = %e, "invalid BUTTON_TIMINGS");
                std::process::exit(2);
            }
        },
        Err(_) => ButtonTimings::default(),
    };

    let clock = ManualClock::new();
    let pin_clock = clock.clone();
    let read_level = move || {
        let now = pin_clock.now_ms();
        !SCRIPT.iter().any(|&(start, end)| (start..end).contains(&now))
    };
    let on_gesture = |gesture: Gesture| match gesture {
        Gesture::Single => info!("Single click!"),
        Gesture::Double => info!("Double click!"),
        Gesture::Long => info!("Long click!"),
    };

    let mut engine = match button_engine(clock.clone(), &timings, read_level, on_gesture) {
        Ok(engine) => engine,
        Err(e) => {
            error!(error = %e, code = e.error_code(), "failed to build button table");
            std::process::exit(1);
        }
    };
    info!(
        transitions = engine.transition_count(),
        tick_ms = timings.tick_ms,
        "button engine ready"
    );

    let end = SCRIPT.last().map_or(0, |&(_, end)| end) + 500;
    let mut now = 0;
    while now <= end {
        clock.set(now);
        engine.run();
        now += timings.tick_ms.max(1);
    }

    let state = ButtonState::from_state_id(engine.current_state()).map_or("?", |s| s.name());
    info!(state, fired = engine.history().len(), "simulation finished");
}
