//! Core value types of the engine.
//!
//! This module contains the pieces the tick algorithm is built from:
//! - State identifiers
//! - Signals, events and guards
//! - The bounded transition history
//!
//! Nothing here owns callbacks or a clock; those live in the engine.

mod guard;
mod history;
mod signal;
mod state;

pub use guard::{predicate, Combinator, Event, Guard, Predicate};
pub use history::{TransitionHistory, TransitionRecord};
pub use signal::Signal;
pub use state::StateId;
