//! Step-wise Sieve of Eratosthenes
//!
//! This module is the algorithmic core of the visualizer:
//! - [`table`]: per-number state ([`CellState`]) and provenance
//! - [`engine`]: the resumable [`StepEngine`] producing one [`Action`] at a time
//! - [`controller`]: the [`RunController`] state machine driving the engine
//!
//! # Execution Model
//!
//! Everything runs on one thread.  Each call to `step` or `tick` applies at
//! most one action, so the table is fully consistent whenever it is read.
//! Once the engine reports exhaustion the controller sweeps the remaining
//! Unknown cells to Prime in a single finalization pass.

pub mod controller;
pub mod engine;
pub mod table;

pub use controller::{interval_for_speed, Advance, RunController, RunState, StepObserver};
pub use engine::{Action, Highlight, StepEngine};
pub use table::{Cell, CellState, CellTable};
