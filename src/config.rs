//! Engine configuration.
//!
//! Only plain data lives here. Clocks and callbacks are code and are
//! supplied through [`EngineBuilder`](crate::EngineBuilder).

use crate::builder::BuildError;
use crate::core::StateId;
use serde::{Deserialize, Serialize};

/// Number of fired transitions kept for diagnostics by default.
pub const DEFAULT_HISTORY_CAPACITY: usize = 32;

/// Serializable engine settings.
///
/// # Example
///
/// ```rust
/// use tickfsm::{EngineConfig, StateId};
///
/// let config = EngineConfig::from_json(r#"{ "initial_state": 2 }"#).unwrap();
/// assert_eq!(config.initial_state, StateId::new(2));
/// assert_eq!(config.history_capacity, 32);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub initial_state: StateId,
    /// Fired transitions to remember; 0 disables the history.
    pub history_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_state: StateId::new(0),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        Ok(serde_json::from_str(json)?)
    }
}
