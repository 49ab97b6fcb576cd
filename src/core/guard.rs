//! Transition guards: events, combinators and timeouts.
//!
//! A guard folds its events with the combinator, starting from the
//! combinator's identity (`true` for AND, `false` for OR), then combines
//! the result with the timeout check the same way. A guard with neither
//! events nor timeout is unconditional and always passes.

use super::signal::Signal;
use crate::clock::Millis;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison between an observed signal value and a constant.
pub type Predicate = Box<dyn Fn(i32, i32) -> bool>;

/// How a transition's events and timeout are combined.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combinator {
    #[default]
    And,
    Or,
}

impl Combinator {
    /// Result used when an operand set is empty.
    pub fn identity(self) -> bool {
        matches!(self, Combinator::And)
    }

    pub fn fold(self, acc: bool, value: bool) -> bool {
        match self {
            Combinator::And => acc & value,
            Combinator::Or => acc | value,
        }
    }
}

/// Common comparators for [`Event`] predicates.
pub mod predicate {
    pub fn eq(observed: i32, compare: i32) -> bool {
        observed == compare
    }

    pub fn ne(observed: i32, compare: i32) -> bool {
        observed != compare
    }

    pub fn lt(observed: i32, compare: i32) -> bool {
        observed < compare
    }

    pub fn le(observed: i32, compare: i32) -> bool {
        observed <= compare
    }

    pub fn gt(observed: i32, compare: i32) -> bool {
        observed > compare
    }

    pub fn ge(observed: i32, compare: i32) -> bool {
        observed >= compare
    }
}

/// A single boolean condition on a [`Signal`].
///
/// # Example
///
/// ```rust
/// use tickfsm::{predicate, Event, Signal};
///
/// let level = Signal::new(1);
/// let released = Event::new(&level, 1, predicate::eq);
/// assert!(released.check());
///
/// level.set(0);
/// assert!(!released.check());
/// ```
pub struct Event {
    signal: Signal,
    compare: i32,
    predicate: Predicate,
}

impl Event {
    pub fn new<F>(signal: &Signal, compare: i32, predicate: F) -> Self
    where
        F: Fn(i32, i32) -> bool + 'static,
    {
        Event {
            signal: signal.clone(),
            compare,
            predicate: Box::new(predicate),
        }
    }

    pub fn compare(&self) -> i32 {
        self.compare
    }

    pub fn signal(&self) -> &Signal {
        &self.signal
    }

    /// Evaluate the predicate against the signal's current value.
    pub fn check(&self) -> bool {
        (self.predicate)(self.signal.get(), self.compare)
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("signal", &self.signal)
            .field("compare", &self.compare)
            .finish_non_exhaustive()
    }
}

/// The full condition attached to a transition.
#[derive(Debug, Default)]
pub struct Guard {
    pub(crate) combinator: Combinator,
    pub(crate) events: Vec<Event>,
    pub(crate) timeout_ms: Option<Millis>,
}

impl Guard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn combinator(&self) -> Combinator {
        self.combinator
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn timeout_ms(&self) -> Option<Millis> {
        self.timeout_ms
    }

    /// No events and no timeout.
    pub fn is_unconditional(&self) -> bool {
        self.events.is_empty() && self.timeout_ms.is_none()
    }

    /// Fold of all events, or the combinator identity when there are none.
    pub fn events_hold(&self) -> bool {
        self.events
            .iter()
            .fold(self.combinator.identity(), |acc, event| {
                self.combinator.fold(acc, event.check())
            })
    }

    /// Timeout check. Without a time source (`now == None`) a timeout can
    /// never elapse.
    pub fn timeout_elapsed(&self, now: Option<Millis>, entered_at: Millis) -> bool {
        match (self.timeout_ms, now) {
            (None, _) => self.combinator.identity(),
            (Some(_), None) => false,
            (Some(timeout), Some(now)) => now.saturating_sub(entered_at) >= timeout,
        }
    }

    /// Whether the guard is satisfied at `now` for a state entered at
    /// `entered_at`.
    pub fn is_satisfied(&self, now: Option<Millis>, entered_at: Millis) -> bool {
        if self.is_unconditional() {
            return true;
        }
        self.combinator.fold(
            self.events_hold(),
            self.timeout_elapsed(now, entered_at),
        )
    }
}
