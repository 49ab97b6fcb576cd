//! Bounded record of fired transitions.
//!
//! The engine appends one [`TransitionRecord`] each time a transition fires,
//! keeping only the most recent `capacity` entries. It is a debugging aid;
//! nothing in the tick algorithm reads it back.

use super::state::StateId;
use crate::clock::Millis;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One fired transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Source state
    pub from: StateId,
    /// Destination state (equal to `from` for self transitions)
    pub to: StateId,
    /// Clock reading of the tick that fired it (0 without a clock)
    pub at_ms: Millis,
}

/// Ring buffer of the most recent transitions, oldest first.
///
/// # Example
///
/// ```rust
/// use tickfsm::{StateId, TransitionHistory, TransitionRecord};
///
/// let mut history = TransitionHistory::with_capacity(2);
/// for (i, at_ms) in [0u64, 10, 25].into_iter().enumerate() {
///     history.record(TransitionRecord {
///         from: StateId::new(i as u32),
///         to: StateId::new(i as u32 + 1),
///         at_ms,
///     });
/// }
///
/// // Only the last two survive.
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.path(), vec![StateId::new(1), StateId::new(2), StateId::new(3)]);
/// assert_eq!(history.span_ms(), Some(15));
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransitionHistory {
    capacity: usize,
    records: VecDeque<TransitionRecord>,
}

impl TransitionHistory {
    /// History that keeps at most `capacity` records. Zero disables
    /// recording entirely.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&mut self, record: TransitionRecord) {
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn records(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    /// States traversed: the source of the oldest retained record followed
    /// by the destination of every record.
    pub fn path(&self) -> Vec<StateId> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from);
        }
        path.extend(self.records.iter().map(|r| r.to));
        path
    }

    /// Milliseconds between the oldest and newest retained record.
    pub fn span_ms(&self) -> Option<Millis> {
        match (self.records.front(), self.records.back()) {
            (Some(first), Some(last)) => Some(last.at_ms.saturating_sub(first.at_ms)),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
