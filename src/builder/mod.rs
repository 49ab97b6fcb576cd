//! Builder API for engine and table construction.
//!
//! Two styles are available. The engine's own methods mirror a classic C
//! table API (`add_transition`, `add_event`, `add_timeout`, ...) and work
//! on [`TransitionHandle`](crate::TransitionHandle)s. The fluent
//! [`TransitionBuilder`] defines a whole row in one expression.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::{BuildError, ErrorKind};
pub use machine::EngineBuilder;
pub use transition::TransitionBuilder;
