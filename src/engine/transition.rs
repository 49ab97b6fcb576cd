//! Rows of the transition table.

use crate::core::{Combinator, Guard, StateId};
use crate::clock::Millis;
use std::fmt;
use uuid::Uuid;

/// Zero-argument callback run by the engine.
pub type Action = Box<dyn FnMut()>;

/// Reference to a transition inside one particular engine.
///
/// Handles are returned by the builder operations and stay valid for the
/// engine's whole lifetime; the table is append-only. A handle presented
/// to a different engine is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransitionHandle {
    engine: Uuid,
    index: usize,
}

impl TransitionHandle {
    pub(crate) fn new(engine: Uuid, index: usize) -> Self {
        Self { engine, index }
    }

    pub(crate) fn engine(&self) -> Uuid {
        self.engine
    }

    /// Position of the transition in evaluation order.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// A guarded edge between two states.
pub struct Transition {
    pub(crate) source: StateId,
    pub(crate) dest: StateId,
    pub(crate) guard: Guard,
    pub(crate) action: Option<Action>,
}

impl Transition {
    /// Unconditional transition with no action.
    pub fn new(source: StateId, dest: StateId) -> Self {
        Self {
            source,
            dest,
            guard: Guard::new(),
            action: None,
        }
    }

    pub fn source(&self) -> StateId {
        self.source
    }

    pub fn dest(&self) -> StateId {
        self.dest
    }

    pub fn guard(&self) -> &Guard {
        &self.guard
    }

    pub fn combinator(&self) -> Combinator {
        self.guard.combinator
    }

    pub fn timeout_ms(&self) -> Option<Millis> {
        self.guard.timeout_ms
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.dest
    }

    /// Whether this row can fire while `current` is the active state.
    pub fn can_fire(&self, current: StateId, now: Option<Millis>, entered_at: Millis) -> bool {
        self.source == current && self.guard.is_satisfied(now, entered_at)
    }

    pub(crate) fn fire(&mut self) {
        if let Some(action) = self.action.as_mut() {
            action();
        }
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("source", &self.source)
            .field("dest", &self.dest)
            .field("guard", &self.guard)
            .field("has_action", &self.has_action())
            .finish()
    }
}
