//! Millisecond time sources.
//!
//! The engine only ever asks a clock for "now" once per tick. Any
//! `Fn() -> Millis` closure is a clock; [`ManualClock`] and
//! [`MonotonicClock`] cover simulations and real loops.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Milliseconds on the engine's time base.
pub type Millis = u64;

/// Monotonically non-decreasing millisecond counter.
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

impl<F> Clock for F
where
    F: Fn() -> Millis,
{
    fn now_ms(&self) -> Millis {
        self()
    }
}

/// Clock whose value is set by hand.
///
/// Clones share the same reading, so a test can hand one clone to the
/// engine and keep another to move time forward.
///
/// # Example
///
/// ```rust
/// use tickfsm::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let engine_side = clock.clone();
/// clock.advance(10);
/// clock.advance(5);
/// assert_eq!(engine_side.now_ms(), 15);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock(Rc<Cell<Millis>>);

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(ms: Millis) -> Self {
        ManualClock(Rc::new(Cell::new(ms)))
    }

    pub fn set(&self, ms: Millis) {
        self.0.set(ms);
    }

    pub fn advance(&self, ms: Millis) {
        self.0.set(self.0.get().saturating_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.0.get()
    }
}

/// Milliseconds elapsed since construction, from `std::time::Instant`.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> Millis {
        Millis::try_from(self.origin.elapsed().as_millis()).unwrap_or(Millis::MAX)
    }
}
