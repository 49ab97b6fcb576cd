//! Fluent construction of a single transition.

use crate::builder::error::BuildError;
use crate::clock::Millis;
use crate::core::{Combinator, Event, Signal, StateId};
use crate::engine::{Action, Engine, Transition, TransitionHandle};
use tracing::warn;

/// Collects one transition's guard and action, then appends it to the
/// engine on [`add`](Self::add).
///
/// The first invalid setting is remembered and reported by `add`; in that
/// case nothing is appended.
///
/// # Example
///
/// ```rust
/// use tickfsm::{predicate, Engine, ManualClock, Signal};
///
/// let level = Signal::new(1);
/// let mut engine = Engine::with_clock(0u32, ManualClock::new());
///
/// let handle = engine
///     .transition(0u32, 1u32)
///     .any()
///     .when(&level, 0, predicate::eq)
///     .after(3_000)
///     .then(|| println!("left idle"))
///     .add()
///     .unwrap();
/// assert_eq!(handle.index(), 0);
/// ```
pub struct TransitionBuilder<'a> {
    engine: &'a mut Engine,
    transition: Transition,
    error: Option<BuildError>,
}

impl<'a> TransitionBuilder<'a> {
    pub(crate) fn new(engine: &'a mut Engine, source: StateId, dest: StateId) -> Self {
        Self {
            engine,
            transition: Transition::new(source, dest),
            error: None,
        }
    }

    /// Require every event and the timeout (the default).
    pub fn all(mut self) -> Self {
        self.transition.guard.combinator = Combinator::And;
        self
    }

    /// Accept any event or the timeout.
    pub fn any(mut self) -> Self {
        self.transition.guard.combinator = Combinator::Or;
        self
    }

    pub fn combinator(mut self, combinator: Combinator) -> Self {
        self.transition.guard.combinator = combinator;
        self
    }

    /// Add an event on `signal`.
    pub fn when<F>(mut self, signal: &Signal, compare: i32, predicate: F) -> Self
    where
        F: Fn(i32, i32) -> bool + 'static,
    {
        self.transition
            .guard
            .events
            .push(Event::new(signal, compare, predicate));
        self
    }

    /// Add a timeout. Requires the engine to have a clock.
    pub fn after(mut self, timeout_ms: Millis) -> Self {
        if self.engine.has_clock() {
            self.transition.guard.timeout_ms = Some(timeout_ms);
        } else if self.error.is_none() {
            warn!(timeout_ms, "timeout ignored: engine has no clock");
            self.error = Some(BuildError::MissingClock {
                index: self.engine.transition_count(),
                timeout_ms,
            });
        }
        self
    }

    /// Callback run each time the transition fires.
    pub fn then<F: FnMut() + 'static>(mut self, action: F) -> Self {
        self.transition.action = Some(Box::new(action) as Action);
        self
    }

    /// Append the transition.
    pub fn add(self) -> Result<TransitionHandle, BuildError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.engine.push_transition(self.transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::core::predicate;
    use crate::engine::Tick;

    #[test]
    fn fluent_api_builds_transition() {
        let level = Signal::new(0);
        let mut engine = Engine::with_clock(0u32, ManualClock::new());
        let handle = engine
            .transition(0u32, 1u32)
            .any()
            .when(&level, 1, predicate::eq)
            .after(50)
            .then(|| {})
            .add()
            .unwrap();

        let t = &engine.transitions()[handle.index()];
        assert_eq!(t.source(), StateId::new(0));
        assert_eq!(t.dest(), StateId::new(1));
        assert_eq!(t.combinator(), Combinator::Or);
        assert_eq!(t.guard().events().len(), 1);
        assert_eq!(t.timeout_ms(), Some(50));
        assert!(t.has_action());
    }

    #[test]
    fn defaults_to_unconditional_and() {
        let mut engine = Engine::new(0u32);
        engine.transition(0u32, 1u32).add().unwrap();

        let t = &engine.transitions()[0];
        assert_eq!(t.combinator(), Combinator::And);
        assert!(t.guard().is_unconditional());
        assert_eq!(
            engine.run(),
            Tick::Transitioned {
                from: StateId::new(0),
                to: StateId::new(1),
            }
        );
    }

    #[test]
    fn timeout_without_clock_appends_nothing() {
        let mut engine = Engine::new(0u32);
        let result = engine.transition(0u32, 1u32).after(10).add();

        assert!(matches!(
            result,
            Err(BuildError::MissingClock {
                index: 0,
                timeout_ms: 10
            })
        ));
        assert_eq!(engine.transition_count(), 0);
    }

    #[test]
    fn all_overrides_earlier_any() {
        let mut engine = Engine::new(0u32);
        engine.transition(0u32, 1u32).any().all().add().unwrap();
        assert_eq!(engine.transitions()[0].combinator(), Combinator::And);
    }
}
