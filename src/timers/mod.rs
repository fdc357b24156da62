//! Hierarchical wall clock timers for solver diagnostics.

mod timers;
pub use timers::*;
