//! # Introduction
//!
//! sievetty animates the Sieve of Eratosthenes one micro-step at a time.
//! Every step either declares a base prime or marks a single multiple
//! composite, and the terminal grid is redrawn after each one.
//!
//! ## Pipeline
//!
//! ```text
//! RunController → StepEngine → CellTable → RenderModel → TUI → (FrameRecorder)
//! ```
//!
//! 1. [`sieve`] — the cell table, the resumable step engine and the
//!    play/pause/step/reset state machine.
//! 2. [`render`] — grid geometry with adaptive cell sizing and the per-cell
//!    visual state derived from the table plus the current highlight.
//! 3. [`capture`] — numbered text dumps of each rendered frame.
//! 4. [`config`] — parameter bounds and defaults.
//! 5. [`ui`] — ratatui-based TUI; not part of the stable library API.

pub mod capture;
pub mod config;
pub mod render;
pub mod sieve;
pub mod ui;
