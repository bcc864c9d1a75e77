//! Play / pause / step / reset state machine
//!
//! The [`RunController`] owns the cell table, the step engine bound to it and
//! the highlight overlay.  Manual steps and timer ticks both funnel into the
//! same single-action advance; the current [`RunState`] decides which of the
//! two entry points is accepted:
//!
//! ```text
//! Idle/Paused --start--> Running        Running --pause--> Paused
//! Idle/Paused --step---> Paused|Done    Running --tick---> Running|Done
//! any ---------reset---> Idle
//! ```
//!
//! After every completed advance (including finalization) the controller
//! notifies a [`StepObserver`], which is how frame capture hooks in.

use super::engine::{Action, Highlight, StepEngine};
use super::table::CellTable;
use crate::config::{SieveConfig, INTERVAL_SPAN_MS, MIN_INTERVAL_MS, SLOWEST_INTERVAL_MS};
use rustc_hash::FxHashMap;
use std::time::Duration;
use tracing::{debug, info};

/// Lifecycle of a visualizer session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Freshly reset, nothing applied yet
    Idle,
    /// Auto-advancing on timer ticks
    Running,
    /// Timer stopped, engine not exhausted
    Paused,
    /// Engine exhausted and finalization applied
    Done,
}

impl RunState {
    pub fn label(self) -> &'static str {
        match self {
            RunState::Idle => "READY",
            RunState::Running => "PLAYING",
            RunState::Paused => "PAUSED",
            RunState::Done => "DONE",
        }
    }
}

/// Result of a step or tick request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// One action was applied
    Applied(Action),
    /// The engine was exhausted; remaining cells were finalized
    Finalized { promoted: usize },
    /// The request is not valid in the current state
    Ignored,
}

/// Receives a signal after every completed advance
pub trait StepObserver {
    fn step_completed(&mut self, advance: &Advance);
}

/// Observer that discards every signal
impl StepObserver for () {
    fn step_completed(&mut self, _advance: &Advance) {}
}

/// Map a speed level in `[1, 20]` to the auto-play tick interval
pub fn interval_for_speed(level: u8) -> Duration {
    let level = SieveConfig::clamp_speed(level);
    let interval = SLOWEST_INTERVAL_MS - f64::from(level - 1) * (INTERVAL_SPAN_MS / 19.0);
    let millis = (interval.round() as u64).max(MIN_INTERVAL_MS);
    Duration::from_millis(millis)
}

/// Drives one step engine over one cell table
#[derive(Debug)]
pub struct RunController {
    table: CellTable,
    engine: StepEngine,
    highlight: Highlight,
    state: RunState,
    speed: u8,
    steps_taken: usize,
    message: String,
    /// Composites first marked by each base prime
    strikes: FxHashMap<usize, usize>,
}

impl RunController {
    /// Create a controller for limit `N` at the given speed level
    pub fn new(limit: usize, speed: u8) -> Self {
        let mut controller = RunController {
            table: CellTable::new(limit),
            engine: StepEngine::new(limit),
            highlight: Highlight::default(),
            state: RunState::Idle,
            speed: SieveConfig::clamp_speed(speed),
            steps_taken: 0,
            message: String::new(),
            strikes: FxHashMap::default(),
        };
        controller.reset();
        controller
    }

    pub fn from_config(config: &SieveConfig) -> Self {
        Self::new(config.limit, config.speed)
    }

    /// Discard the engine and table and start over at the current limit
    pub fn reset(&mut self) {
        let limit = self.table.limit();
        self.reset_with(limit);
    }

    /// Discard the engine and table and start over at a new limit.
    ///
    /// A limit below 2 has nothing to visualize and is immediately Done.
    pub fn reset_with(&mut self, limit: usize) {
        self.table.reset(limit);
        self.engine = StepEngine::new(limit);
        self.highlight.clear();
        self.steps_taken = 0;
        self.strikes.clear();

        if limit < 2 {
            self.state = RunState::Done;
            self.message = "Nothing to visualize (N < 2).".to_string();
        } else {
            self.state = RunState::Idle;
            self.message = "Ready. Press space or →.".to_string();
        }
        info!(limit, "sieve reset");
    }

    /// Begin auto-play.  Returns whether the state changed.
    pub fn start(&mut self) -> bool {
        match self.state {
            RunState::Idle | RunState::Paused => {
                self.state = RunState::Running;
                self.message = "Running...".to_string();
                info!(speed = self.speed, "auto-play started");
                true
            }
            RunState::Running | RunState::Done => false,
        }
    }

    /// Stop auto-play.  Returns whether the state changed.
    pub fn pause(&mut self) -> bool {
        if self.state != RunState::Running {
            return false;
        }
        self.state = RunState::Paused;
        self.message = "Paused.".to_string();
        info!(steps = self.steps_taken, "auto-play paused");
        true
    }

    /// Start if stopped, pause if running
    pub fn toggle(&mut self) -> bool {
        if self.state == RunState::Running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Advance exactly one action while Idle or Paused
    pub fn step(&mut self, observer: &mut dyn StepObserver) -> Advance {
        match self.state {
            RunState::Idle | RunState::Paused => {
                self.state = RunState::Paused;
                self.advance(observer)
            }
            RunState::Running | RunState::Done => Advance::Ignored,
        }
    }

    /// Advance exactly one action on a timer tick while Running
    pub fn tick(&mut self, observer: &mut dyn StepObserver) -> Advance {
        if self.state != RunState::Running {
            return Advance::Ignored;
        }
        self.advance(observer)
    }

    fn advance(&mut self, observer: &mut dyn StepObserver) -> Advance {
        let advance = match self.engine.next_action(&self.table) {
            Some(action) => {
                let changed = action.apply(&mut self.table, &mut self.highlight);
                match action {
                    Action::DeclareBase { p } => {
                        self.strikes.entry(p).or_insert(0);
                    }
                    Action::MarkComposite { p, .. } if changed => {
                        *self.strikes.entry(p).or_insert(0) += 1;
                    }
                    _ => {}
                }
                self.steps_taken += 1;
                self.message = action.describe(&self.table);
                debug!(step = self.steps_taken, ?action, changed, "applied action");
                Advance::Applied(action)
            }
            None => {
                let promoted = self.table.finalize();
                self.highlight.clear();
                self.state = RunState::Done;
                self.message = "Done. All remaining unmarked numbers are Prime.".to_string();
                info!(
                    limit = self.table.limit(),
                    primes = self.table.prime_count(),
                    steps = self.steps_taken,
                    "sieve finished"
                );
                Advance::Finalized { promoted }
            }
        };

        observer.step_completed(&advance);
        advance
    }

    /// Set the speed level, clamped to `[1, 20]`
    pub fn set_speed(&mut self, level: u8) {
        self.speed = SieveConfig::clamp_speed(level);
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    /// Auto-play cadence for the current speed level
    pub fn tick_interval(&self) -> Duration {
        interval_for_speed(self.speed)
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn table(&self) -> &CellTable {
        &self.table
    }

    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Actions applied since the last reset (finalization not counted)
    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn limit(&self) -> usize {
        self.table.limit()
    }

    /// `(base, composites first marked by it)` for every declared base, ascending
    pub fn strikes_by_base(&self) -> Vec<(usize, usize)> {
        let mut bases: Vec<(usize, usize)> = self
            .strikes
            .iter()
            .map(|(&base, &count)| (base, count))
            .collect();
        bases.sort_unstable();
        bases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_mapping_endpoints() {
        assert_eq!(interval_for_speed(1), Duration::from_millis(900));
        assert_eq!(interval_for_speed(10), Duration::from_millis(497));
        assert_eq!(interval_for_speed(20), Duration::from_millis(50));
        assert_eq!(interval_for_speed(0), Duration::from_millis(900));
        assert_eq!(interval_for_speed(255), Duration::from_millis(50));
    }

    #[test]
    fn test_set_speed_clamps_like_config() {
        let mut controller = RunController::new(10, 10);
        for level in [0, 1, 7, 20, 21, 255] {
            controller.set_speed(level);
            assert_eq!(controller.speed(), SieveConfig::clamp_speed(level));
        }
        assert_eq!(controller.speed(), 20);
    }

    #[test]
    fn test_step_ignored_while_running() {
        let mut controller = RunController::new(10, 10);
        assert!(controller.start());
        assert_eq!(controller.step(&mut ()), Advance::Ignored);
        assert_eq!(controller.steps_taken(), 0);
    }

    #[test]
    fn test_tick_ignored_unless_running() {
        let mut controller = RunController::new(10, 10);
        assert_eq!(controller.tick(&mut ()), Advance::Ignored);
        controller.step(&mut ());
        assert_eq!(controller.state(), RunState::Paused);
        assert_eq!(controller.tick(&mut ()), Advance::Ignored);
    }

    #[test]
    fn test_start_is_no_op_when_done() {
        let mut controller = RunController::new(3, 10);
        while controller.state() != RunState::Done {
            controller.step(&mut ());
        }
        assert!(!controller.start());
        assert!(!controller.toggle());
        assert_eq!(controller.state(), RunState::Done);
    }

    #[test]
    fn test_tiny_limit_is_done_immediately() {
        let controller = RunController::new(1, 10);
        assert_eq!(controller.state(), RunState::Done);
        assert_eq!(controller.table().prime_count(), 0);
    }

    #[test]
    fn test_strikes_by_base() {
        let mut controller = RunController::new(10, 10);
        while controller.state() != RunState::Done {
            controller.step(&mut ());
        }
        assert_eq!(controller.strikes_by_base(), vec![(2, 4), (3, 1)]);
    }
}
