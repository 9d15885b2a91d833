//! Stage implementations. Each consumes the previous stage's output and
//! returns its result together with its statistics.

pub mod interpretation;
pub mod mining;
pub mod preprocessing;
pub mod selection;
pub mod transformation;
