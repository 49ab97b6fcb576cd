//! Builder for constructing engines.

use crate::builder::error::BuildError;
use crate::clock::Clock;
use crate::config::{EngineConfig, DEFAULT_HISTORY_CAPACITY};
use crate::core::StateId;
use crate::engine::Engine;

/// Builder for constructing engines with a fluent API.
pub struct EngineBuilder {
    initial: Option<StateId>,
    clock: Option<Box<dyn Clock>>,
    history_capacity: usize,
}

impl EngineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            clock: None,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<StateId>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Set the time source. Without one, timeouts cannot be added.
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Apply every setting from `config`.
    pub fn config(self, config: &EngineConfig) -> Self {
        self.initial(config.initial_state)
            .history_capacity(config.history_capacity)
    }

    /// Build the engine.
    /// Returns an error if the initial state is missing.
    pub fn build(self) -> Result<Engine, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        Ok(Engine::from_parts(initial, self.clock, self.history_capacity))
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[test]
    fn builder_validates_required_fields() {
        let result = EngineBuilder::new().build();
        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn fluent_api_builds_engine() {
        let engine = EngineBuilder::new()
            .initial(2u32)
            .clock(ManualClock::starting_at(7))
            .history_capacity(4)
            .build()
            .unwrap();

        assert_eq!(engine.current_state(), StateId::new(2));
        assert!(engine.has_clock());
        assert_eq!(engine.now_ms(), Some(7));
        assert_eq!(engine.history().capacity(), 4);
    }

    #[test]
    fn config_supplies_initial_state_and_history() {
        let config = EngineConfig {
            initial_state: StateId::new(5),
            history_capacity: 0,
        };
        let engine = EngineBuilder::new().config(&config).build().unwrap();

        assert_eq!(engine.current_state(), StateId::new(5));
        assert!(!engine.has_clock());
        assert_eq!(engine.history().capacity(), 0);
    }
}
