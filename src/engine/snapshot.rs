//! Read-only, serializable views of an engine.

use crate::clock::Millis;
use crate::core::{Combinator, StateId};
use serde::{Deserialize, Serialize};

/// One event of a transition as seen at snapshot time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    pub compare: i32,
    /// Signal value when the snapshot was taken
    pub observed: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionInfo {
    pub source: StateId,
    pub dest: StateId,
    pub combinator: Combinator,
    pub events: Vec<EventInfo>,
    pub timeout_ms: Option<Millis>,
    pub has_action: bool,
}

impl TransitionInfo {
    pub fn is_unconditional(&self) -> bool {
        self.events.is_empty() && self.timeout_ms.is_none()
    }
}

/// Runtime state plus the transition table in evaluation order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub current_state: StateId,
    pub previous_state: Option<StateId>,
    pub entered_at: Millis,
    pub has_clock: bool,
    pub transitions: Vec<TransitionInfo>,
}

impl EngineSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
