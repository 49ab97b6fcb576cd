//! Errors raised while building an engine's tables.

use thiserror::Error;

/// Broad category of a [`BuildError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad argument: foreign handle, negative state, missing clock, bad config.
    InvalidParameter,
    /// Growing a table failed to allocate.
    OutOfMemory,
    /// Anything else.
    OperationFailed,
}

/// Errors that can occur when building engines and transitions.
///
/// A failed call leaves the tables exactly as they were before it.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("State id must be non-negative and fit in 32 bits, got {id}")]
    NegativeState { id: i64 },

    #[error("Transition handle #{index} belongs to a different engine")]
    ForeignHandle { index: usize },

    #[error("Transition handle #{index} is out of range ({len} transitions)")]
    HandleOutOfRange { index: usize, len: usize },

    #[error("Cannot add a {timeout_ms} ms timeout to transition #{index}: engine has no clock")]
    MissingClock { index: usize, timeout_ms: u64 },

    #[error("Out of memory growing the {table} table")]
    OutOfMemory { table: &'static str },

    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl BuildError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BuildError::MissingInitialState
            | BuildError::NegativeState { .. }
            | BuildError::ForeignHandle { .. }
            | BuildError::MissingClock { .. }
            | BuildError::InvalidConfig(_) => ErrorKind::InvalidParameter,
            BuildError::OutOfMemory { .. } => ErrorKind::OutOfMemory,
            BuildError::HandleOutOfRange { .. } | BuildError::OperationFailed(_) => {
                ErrorKind::OperationFailed
            }
        }
    }

    /// Stable identifier for logs and FFI shims.
    pub fn error_code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::InvalidParameter => "INVALID_PARAMETER",
            ErrorKind::OutOfMemory => "OUT_OF_MEMORY",
            ErrorKind::OperationFailed => "OPERATION_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            BuildError::ForeignHandle { index: 0 }.kind(),
            ErrorKind::InvalidParameter
        );
        assert_eq!(
            BuildError::MissingClock {
                index: 1,
                timeout_ms: 5
            }
            .kind(),
            ErrorKind::InvalidParameter
        );
        assert_eq!(
            BuildError::OutOfMemory { table: "action" }.kind(),
            ErrorKind::OutOfMemory
        );
        assert_eq!(
            BuildError::HandleOutOfRange { index: 9, len: 2 }.kind(),
            ErrorKind::OperationFailed
        );
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(
            BuildError::NegativeState { id: -3 }.error_code(),
            "INVALID_PARAMETER"
        );
        assert_eq!(
            BuildError::OutOfMemory { table: "transition" }.error_code(),
            "OUT_OF_MEMORY"
        );
    }

    #[test]
    fn messages_name_the_offending_value() {
        let err = BuildError::MissingClock {
            index: 2,
            timeout_ms: 100,
        };
        assert_eq!(
            err.to_string(),
            "Cannot add a 100 ms timeout to transition #2: engine has no clock"
        );
    }
}
