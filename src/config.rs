//! Visualizer parameters and their bounds
//!
//! Values arriving from the command line or from in-app key presses are
//! clamped here before they reach the sieve core, so the core never sees an
//! out-of-range `N` or speed level.

use std::path::PathBuf;

/// Smallest `N` accepted from the user
pub const MIN_LIMIT: usize = 10;

/// Largest `N` accepted from the user
pub const MAX_LIMIT: usize = 5000;

/// `N` used when none is given
pub const DEFAULT_LIMIT: usize = 200;

/// Slowest speed level
pub const MIN_SPEED: u8 = 1;

/// Fastest speed level
pub const MAX_SPEED: u8 = 20;

/// Speed level used when none is given
pub const DEFAULT_SPEED: u8 = 10;

/// Tick interval at the slowest speed level (ms)
pub const SLOWEST_INTERVAL_MS: f64 = 900.0;

/// Total interval range covered by the speed slider (ms)
pub const INTERVAL_SPAN_MS: f64 = 850.0;

/// No tick is ever scheduled faster than this (ms)
pub const MIN_INTERVAL_MS: u64 = 30;

/// Runtime configuration for a visualizer session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SieveConfig {
    /// Upper bound `N` of the sieve
    pub limit: usize,
    /// Auto-play speed level in `[MIN_SPEED, MAX_SPEED]`
    pub speed: u8,
    /// Directory that receives captured frames, if recording is enabled
    pub record_dir: Option<PathBuf>,
}

impl SieveConfig {
    pub fn new(limit: usize, speed: u8, record_dir: Option<PathBuf>) -> Self {
        SieveConfig {
            limit: Self::clamp_limit(limit),
            speed: Self::clamp_speed(speed),
            record_dir,
        }
    }

    /// Clamp a requested `N` into the accepted range
    pub fn clamp_limit(limit: usize) -> usize {
        limit.clamp(MIN_LIMIT, MAX_LIMIT)
    }

    /// Clamp a requested speed level into the accepted range
    pub fn clamp_speed(speed: u8) -> u8 {
        speed.clamp(MIN_SPEED, MAX_SPEED)
    }
}

impl Default for SieveConfig {
    fn default() -> Self {
        SieveConfig {
            limit: DEFAULT_LIMIT,
            speed: DEFAULT_SPEED,
            record_dir: None,
        }
    }
}
