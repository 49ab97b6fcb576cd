//! The tick-driven engine.
//!
//! - **Transitions**: guarded rows evaluated in insertion order
//! - **Actions**: enter/update/exit callbacks keyed by state
//! - **Engine**: owns both tables, the clock, and the current state
//! - **Snapshots**: serializable views for diagnostics

mod actions;
mod machine;
mod snapshot;
mod transition;

pub use actions::{ActionTable, StateActions};
pub use machine::{Engine, Tick};
pub use snapshot::{EngineSnapshot, EventInfo, TransitionInfo};
pub use transition::{Action, Transition, TransitionHandle};
