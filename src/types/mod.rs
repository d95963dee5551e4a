//! Shared data structures for the early-warning pipeline
//!
//! - telemetry: raw rig samples in, derived feature rows out
//! - evaluation: model results in, impact summary out

mod evaluation;
mod telemetry;

pub use evaluation::*;
pub use telemetry::*;
