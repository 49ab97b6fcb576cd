//! tickfsm: a table-driven finite state machine for cooperative loops
//!
//! The engine is built once from a table of guarded transitions and
//! per-state callbacks, then advanced by calling [`Engine::run`] at a fixed
//! cadence (every 10 ms, say). It never blocks and never spawns anything;
//! time comes from an injected millisecond [`Clock`] and inputs come from
//! [`Signal`] cells the application updates between ticks.
//!
//! # Core Concepts
//!
//! - **Transition**: an edge between two states, guarded by events and/or a
//!   timeout combined with AND or OR
//! - **Event**: a predicate comparing a signal's value with a constant
//! - **State actions**: enter, update and exit callbacks per state
//! - **Tick**: one call to [`Engine::run`]; fires at most one transition
//!
//! # Example
//!
//! ```rust
//! use tickfsm::{predicate, state_ids, Engine, ManualClock, Signal, StateActions};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! state_ids! {
//!     enum Button {
//!         Idle,
//!         Held,
//!     }
//! }
//!
//! let clock = ManualClock::new();
//! let level = Signal::new(1);
//! let long_presses = Rc::new(Cell::new(0));
//!
//! let mut engine = Engine::with_clock(Button::Idle, clock.clone());
//! engine
//!     .transition(Button::Idle, Button::Held)
//!     .when(&level, 0, predicate::eq)
//!     .after(3_000)
//!     .add()
//!     .unwrap();
//! engine
//!     .transition(Button::Held, Button::Idle)
//!     .when(&level, 1, predicate::eq)
//!     .add()
//!     .unwrap();
//!
//! let counter = Rc::clone(&long_presses);
//! engine
//!     .register_state_actions(
//!         Button::Held,
//!         StateActions::new().on_enter(move || counter.set(counter.get() + 1)),
//!     )
//!     .unwrap();
//!
//! engine.run();
//! level.set(0);
//! clock.set(3_000);
//! engine.run(); // exits Idle
//! engine.run(); // enters Held
//! assert_eq!(long_presses.get(), 1);
//! ```

pub mod builder;
pub mod clock;
pub mod config;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use builder::{BuildError, EngineBuilder, ErrorKind, TransitionBuilder};
pub use clock::{Clock, ManualClock, Millis, MonotonicClock};
pub use config::EngineConfig;
pub use crate::core::{
    predicate, Combinator, Event, Guard, Signal, StateId, TransitionHistory, TransitionRecord,
};
pub use engine::{
    ActionTable, Engine, EngineSnapshot, EventInfo, StateActions, Tick, Transition,
    TransitionHandle, TransitionInfo,
};
