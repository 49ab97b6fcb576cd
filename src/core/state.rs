//! State identifiers.
//!
//! States are plain non-negative integers. The engine never needs the full
//! set of states up front; any id can be used as a transition endpoint or
//! given actions at any time during construction.

use crate::builder::BuildError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a state.
///
/// Application enums usually convert into `StateId` through the
/// [`state_ids!`](crate::state_ids) macro, but raw integers work too.
///
/// # Example
///
/// ```rust
/// use tickfsm::StateId;
///
/// let idle = StateId::from(0u32);
/// assert_eq!(idle.index(), 0);
///
/// // Signed values coming from C-style tables are checked.
/// assert!(StateId::try_from(-1i32).is_err());
/// assert_eq!(StateId::try_from(3i32).unwrap(), StateId::new(3));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(u32);

impl StateId {
    pub const fn new(id: u32) -> Self {
        StateId(id)
    }

    /// Raw integer value.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Position of this state in the action table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

impl From<u32> for StateId {
    fn from(id: u32) -> Self {
        StateId(id)
    }
}

impl From<u16> for StateId {
    fn from(id: u16) -> Self {
        StateId(u32::from(id))
    }
}

impl From<u8> for StateId {
    fn from(id: u8) -> Self {
        StateId(u32::from(id))
    }
}

impl TryFrom<i64> for StateId {
    type Error = BuildError;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        u32::try_from(id)
            .map(StateId)
            .map_err(|_| BuildError::NegativeState { id })
    }
}

impl TryFrom<i32> for StateId {
    type Error = BuildError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        StateId::try_from(i64::from(id))
    }
}

impl TryFrom<usize> for StateId {
    type Error = BuildError;

    fn try_from(id: usize) -> Result<Self, Self::Error> {
        u32::try_from(id)
            .map(StateId)
            .map_err(|_| BuildError::OperationFailed(format!("state id {id} exceeds u32 range")))
    }
}
