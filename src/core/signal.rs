//! Shared integer cells read by transition events.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// An integer owned by the application and observed by the engine.
///
/// Cloning a `Signal` yields another handle to the same cell. The
/// application keeps one handle and writes it between ticks (or from an
/// update callback); each event keeps its own handle and only reads it.
///
/// # Example
///
/// ```rust
/// use tickfsm::Signal;
///
/// let level = Signal::new(1);
/// let observed = level.clone();
/// level.set(0);
/// assert_eq!(observed.get(), 0);
/// ```
#[derive(Clone, Default)]
pub struct Signal(Rc<Cell<i32>>);

impl Signal {
    pub fn new(value: i32) -> Self {
        Signal(Rc::new(Cell::new(value)))
    }

    pub fn get(&self) -> i32 {
        self.0.get()
    }

    pub fn set(&self, value: i32) {
        self.0.set(value);
    }

    /// Store a boolean level as 0/1.
    pub fn set_level(&self, high: bool) {
        self.0.set(i32::from(high));
    }

    /// Whether two handles refer to the same cell.
    pub fn same_cell(&self, other: &Signal) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Signal").field(&self.get()).finish()
    }
}
