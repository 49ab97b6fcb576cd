//! Per-state enter/update/exit callbacks.

use super::transition::Action;
use crate::builder::BuildError;
use crate::core::StateId;
use std::fmt;

/// Callbacks for one state. Any of the three may be absent.
///
/// # Example
///
/// ```rust
/// use tickfsm::{Engine, StateActions};
///
/// let mut engine = Engine::new(0u32);
/// engine
///     .register_state_actions(
///         0u32,
///         StateActions::new()
///             .on_enter(|| println!("enter"))
///             .on_exit(|| println!("exit")),
///     )
///     .unwrap();
/// ```
#[derive(Default)]
pub struct StateActions {
    enter: Option<Action>,
    update: Option<Action>,
    exit: Option<Action>,
}

impl StateActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run on the first tick spent in the state.
    pub fn on_enter<F: FnMut() + 'static>(mut self, f: F) -> Self {
        self.enter = Some(Box::new(f));
        self
    }

    /// Run on every tick spent in the state, after `enter` on the first.
    pub fn on_update<F: FnMut() + 'static>(mut self, f: F) -> Self {
        self.update = Some(Box::new(f));
        self
    }

    /// Run on the tick a transition leaves the state.
    pub fn on_exit<F: FnMut() + 'static>(mut self, f: F) -> Self {
        self.exit = Some(Box::new(f));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.enter.is_none() && self.update.is_none() && self.exit.is_none()
    }
}

impl fmt::Debug for StateActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateActions")
            .field("enter", &self.enter.is_some())
            .field("update", &self.update.is_some())
            .field("exit", &self.exit.is_some())
            .finish()
    }
}

/// Sparse table of [`StateActions`] indexed by state id.
///
/// Grows to cover the highest id ever registered and never shrinks.
#[derive(Debug, Default)]
pub struct ActionTable {
    slots: Vec<StateActions>,
}

impl ActionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots, i.e. one past the highest registered id.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Install or replace the callbacks for `state`.
    pub fn register(&mut self, state: StateId, actions: StateActions) -> Result<(), BuildError> {
        let index = state.index();
        if index >= self.slots.len() {
            let needed = index + 1 - self.slots.len();
            self.slots
                .try_reserve(needed)
                .map_err(|_| BuildError::OutOfMemory { table: "action" })?;
            self.slots.resize_with(index + 1, StateActions::default);
        }
        self.slots[index] = actions;
        Ok(())
    }

    pub fn get(&self, state: StateId) -> Option<&StateActions> {
        self.slots.get(state.index())
    }

    pub fn enter(&mut self, state: StateId) {
        if let Some(f) = self.slot_mut(state).and_then(|s| s.enter.as_mut()) {
            f();
        }
    }

    pub fn update(&mut self, state: StateId) {
        if let Some(f) = self.slot_mut(state).and_then(|s| s.update.as_mut()) {
            f();
        }
    }

    pub fn exit(&mut self, state: StateId) {
        if let Some(f) = self.slot_mut(state).and_then(|s| s.exit.as_mut()) {
            f();
        }
    }

    fn slot_mut(&mut self, state: StateId) -> Option<&mut StateActions> {
        self.slots.get_mut(state.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn FnMut()>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let make = move |tag: &'static str| {
            let sink = Rc::clone(&sink);
            Box::new(move || sink.borrow_mut().push(tag)) as Box<dyn FnMut()>
        };
        (log, make)
    }

    #[test]
    fn table_grows_to_highest_registered_state() {
        let mut table = ActionTable::new();
        table
            .register(StateId::new(5), StateActions::new().on_enter(|| {}))
            .unwrap();
        assert_eq!(table.len(), 6);

        table.register(StateId::new(2), StateActions::new()).unwrap();
        assert_eq!(table.len(), 6);
        assert!(table.get(StateId::new(3)).unwrap().is_empty());
        assert!(table.get(StateId::new(9)).is_none());
    }

    #[test]
    fn callbacks_dispatch_to_their_state() {
        let (log, make) = recorder();
        let mut table = ActionTable::new();
        let mut actions = StateActions::new();
        actions.enter = Some(make("enter"));
        actions.update = Some(make("update"));
        actions.exit = Some(make("exit"));
        table.register(StateId::new(1), actions).unwrap();

        table.enter(StateId::new(1));
        table.update(StateId::new(1));
        table.exit(StateId::new(1));
        table.enter(StateId::new(0));

        assert_eq!(*log.borrow(), vec!["enter", "update", "exit"]);
    }

    #[test]
    fn unregistered_states_are_skipped() {
        let mut table = ActionTable::new();
        table.enter(StateId::new(42));
        table.update(StateId::new(42));
        table.exit(StateId::new(42));
        assert!(table.is_empty());
    }

    #[test]
    fn register_replaces_whole_slot() {
        let (log, make) = recorder();
        let mut table = ActionTable::new();
        let mut first = StateActions::new();
        first.enter = Some(make("first-enter"));
        first.exit = Some(make("first-exit"));
        table.register(StateId::new(0), first).unwrap();

        let mut second = StateActions::new();
        second.enter = Some(make("second-enter"));
        table.register(StateId::new(0), second).unwrap();

        table.enter(StateId::new(0));
        table.exit(StateId::new(0));
        assert_eq!(*log.borrow(), vec!["second-enter"]);
    }
}
