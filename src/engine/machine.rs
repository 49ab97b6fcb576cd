//! The engine: transition table, action table and the tick algorithm.

use super::actions::{ActionTable, StateActions};
use super::snapshot::{EngineSnapshot, EventInfo, TransitionInfo};
use super::transition::{Transition, TransitionHandle};
use crate::builder::{BuildError, EngineBuilder, TransitionBuilder};
use crate::clock::{Clock, Millis};
use crate::config::DEFAULT_HISTORY_CAPACITY;
use crate::core::{Combinator, Event, Signal, StateId, TransitionHistory, TransitionRecord};
use std::fmt;
use tracing::{debug, trace, warn};
use uuid::Uuid;

/// Outcome of one [`Engine::run`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// No transition fired.
    Stayed,

    /// A transition back into the same state fired. Its action ran; the
    /// state was neither exited nor re-entered.
    SelfLoop { state: StateId },

    /// `from` was exited this tick; `to` is entered on the next one.
    Transitioned { from: StateId, to: StateId },
}

impl Tick {
    pub fn changed_state(&self) -> bool {
        matches!(self, Tick::Transitioned { .. })
    }
}

/// Table-driven finite state machine advanced by [`Engine::run`].
///
/// Tables are built once, then the engine is ticked from a control loop.
/// Every tick first runs the enter action (first tick in a state only) and
/// the update action, then fires at most one transition: the
/// first row, in insertion order, whose source is the current state and
/// whose guard holds. Leaving a state runs its exit action on the same
/// tick; the destination's enter action runs on the next tick.
///
/// # Example
///
/// ```rust
/// use tickfsm::{predicate, Engine, ManualClock, Signal, StateActions, Tick};
///
/// let clock = ManualClock::new();
/// let button = Signal::new(1);
/// let mut engine = Engine::with_clock(0u32, clock.clone());
///
/// // 0 -> 1 once the input has read low for 40 ms
/// let t = engine.add_transition(0u32, 1u32).unwrap();
/// engine.add_event(t, &button, 0, predicate::eq).unwrap();
/// engine.add_timeout(t, 40).unwrap();
///
/// assert_eq!(engine.run(), Tick::Stayed);
/// button.set(0);
/// clock.set(40);
/// assert_eq!(
///     engine.run(),
///     Tick::Transitioned { from: 0u32.into(), to: 1u32.into() }
/// );
/// ```
pub struct Engine {
    id: Uuid,
    current: StateId,
    previous: Option<StateId>,
    entered_at: Millis,
    transitions: Vec<Transition>,
    actions: ActionTable,
    clock: Option<Box<dyn Clock>>,
    history: TransitionHistory,
}

impl Engine {
    /// Engine without a clock. Timeouts cannot be added to it.
    pub fn new(initial: impl Into<StateId>) -> Self {
        Self::from_parts(initial.into(), None, DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_clock<C>(initial: impl Into<StateId>, clock: C) -> Self
    where
        C: Clock + 'static,
    {
        Self::from_parts(initial.into(), Some(Box::new(clock)), DEFAULT_HISTORY_CAPACITY)
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub(crate) fn from_parts(
        initial: StateId,
        clock: Option<Box<dyn Clock>>,
        history_capacity: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            current: initial,
            previous: None,
            entered_at: 0,
            transitions: Vec::new(),
            actions: ActionTable::new(),
            clock,
            history: TransitionHistory::with_capacity(history_capacity),
        }
    }

    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// State left by the last transition, or `None` before the first tick.
    pub fn previous_state(&self) -> Option<StateId> {
        self.previous
    }

    /// Clock reading when the current state was entered.
    pub fn entered_at(&self) -> Millis {
        self.entered_at
    }

    pub fn has_clock(&self) -> bool {
        self.clock.is_some()
    }

    pub fn now_ms(&self) -> Option<Millis> {
        self.clock.as_ref().map(|c| c.now_ms())
    }

    /// Time spent in the current state so far, if there is a clock.
    pub fn elapsed_ms(&self) -> Option<Millis> {
        self.now_ms().map(|now| now.saturating_sub(self.entered_at))
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn actions(&self) -> &ActionTable {
        &self.actions
    }

    pub fn history(&self) -> &TransitionHistory {
        &self.history
    }

    /// Whether `handle` was issued by this engine.
    pub fn owns(&self, handle: TransitionHandle) -> bool {
        handle.engine() == self.id
    }

    /// Append an unconditional transition with no action.
    ///
    /// Self transitions (`source == dest`) are allowed; they run their
    /// action without exiting or re-entering the state.
    pub fn add_transition(
        &mut self,
        source: impl Into<StateId>,
        dest: impl Into<StateId>,
    ) -> Result<TransitionHandle, BuildError> {
        self.push_transition(Transition::new(source.into(), dest.into()))
    }

    /// Start a fluent transition definition. Nothing is added until
    /// [`TransitionBuilder::add`] succeeds.
    pub fn transition(
        &mut self,
        source: impl Into<StateId>,
        dest: impl Into<StateId>,
    ) -> TransitionBuilder<'_> {
        TransitionBuilder::new(self, source.into(), dest.into())
    }

    pub(crate) fn push_transition(
        &mut self,
        transition: Transition,
    ) -> Result<TransitionHandle, BuildError> {
        self.transitions
            .try_reserve(1)
            .map_err(|_| BuildError::OutOfMemory { table: "transition" })?;
        let index = self.transitions.len();
        trace!(
            transition = index,
            from = %transition.source,
            to = %transition.dest,
            "transition added"
        );
        self.transitions.push(transition);
        Ok(TransitionHandle::new(self.id, index))
    }

    /// How the transition's events and timeout are combined. Defaults to AND.
    pub fn set_combinator(
        &mut self,
        handle: TransitionHandle,
        combinator: Combinator,
    ) -> Result<(), BuildError> {
        self.resolve(handle)?.guard.combinator = combinator;
        Ok(())
    }

    /// Append an event comparing `signal` against `compare`.
    pub fn add_event<F>(
        &mut self,
        handle: TransitionHandle,
        signal: &Signal,
        compare: i32,
        predicate: F,
    ) -> Result<(), BuildError>
    where
        F: Fn(i32, i32) -> bool + 'static,
    {
        let events = &mut self.resolve(handle)?.guard.events;
        events
            .try_reserve(1)
            .map_err(|_| BuildError::OutOfMemory { table: "event" })?;
        events.push(Event::new(signal, compare, predicate));
        Ok(())
    }

    /// Require `timeout_ms` in the source state before the transition
    /// fires. Fails without a clock, leaving the transition unchanged.
    pub fn add_timeout(
        &mut self,
        handle: TransitionHandle,
        timeout_ms: Millis,
    ) -> Result<(), BuildError> {
        let has_clock = self.has_clock();
        let transition = self.resolve(handle)?;
        if !has_clock {
            warn!(
                transition = handle.index(),
                timeout_ms, "timeout ignored: engine has no clock"
            );
            return Err(BuildError::MissingClock {
                index: handle.index(),
                timeout_ms,
            });
        }
        transition.guard.timeout_ms = Some(timeout_ms);
        Ok(())
    }

    /// Callback run each time the transition fires.
    pub fn register_transition_action<F>(
        &mut self,
        handle: TransitionHandle,
        action: F,
    ) -> Result<(), BuildError>
    where
        F: FnMut() + 'static,
    {
        self.resolve(handle)?.action = Some(Box::new(action));
        Ok(())
    }

    /// Install or replace the enter/update/exit callbacks of `state`.
    pub fn register_state_actions(
        &mut self,
        state: impl Into<StateId>,
        actions: StateActions,
    ) -> Result<(), BuildError> {
        self.actions.register(state.into(), actions)
    }

    fn resolve(&mut self, handle: TransitionHandle) -> Result<&mut Transition, BuildError> {
        if !self.owns(handle) {
            return Err(BuildError::ForeignHandle {
                index: handle.index(),
            });
        }
        let len = self.transitions.len();
        self.transitions
            .get_mut(handle.index())
            .ok_or(BuildError::HandleOutOfRange {
                index: handle.index(),
                len,
            })
    }

    /// Advance the machine by one tick.
    pub fn run(&mut self) -> Tick {
        let now = self.now_ms();
        let current = self.current;

        if self.previous != Some(current) {
            trace!(state = %current, "enter");
            self.actions.enter(current);
            self.entered_at = now.unwrap_or(0);
            self.previous = Some(current);
        }
        self.actions.update(current);

        let entered_at = self.entered_at;
        let Some((index, transition)) = self
            .transitions
            .iter_mut()
            .enumerate()
            .find(|(_, t)| t.can_fire(current, now, entered_at))
        else {
            return Tick::Stayed;
        };

        transition.fire();
        let next = transition.dest;
        self.history.record(TransitionRecord {
            from: current,
            to: next,
            at_ms: now.unwrap_or(0),
        });

        if next == current {
            trace!(state = %current, transition = index, "self transition");
            return Tick::SelfLoop { state: current };
        }

        debug!(from = %current, to = %next, transition = index, "transition taken");
        self.actions.exit(current);
        self.previous = Some(current);
        self.current = next;
        Tick::Transitioned {
            from: current,
            to: next,
        }
    }

    /// Serializable view of the runtime state and transition table.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            current_state: self.current,
            previous_state: self.previous,
            entered_at: self.entered_at,
            has_clock: self.has_clock(),
            transitions: self
                .transitions
                .iter()
                .map(|t| TransitionInfo {
                    source: t.source,
                    dest: t.dest,
                    combinator: t.combinator(),
                    events: t
                        .guard
                        .events()
                        .iter()
                        .map(|e| EventInfo {
                            compare: e.compare(),
                            observed: e.signal().get(),
                        })
                        .collect(),
                    timeout_ms: t.timeout_ms(),
                    has_action: t.has_action(),
                })
                .collect(),
        }
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("current", &self.current)
            .field("previous", &self.previous)
            .field("entered_at", &self.entered_at)
            .field("transitions", &self.transitions.len())
            .field("action_slots", &self.actions.len())
            .field("has_clock", &self.has_clock())
            .finish()
    }
}
