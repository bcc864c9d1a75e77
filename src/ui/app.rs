//! Main TUI application state and logic

use crate::capture::FrameRecorder;
use crate::config::SieveConfig;
use crate::render::{GridLayout, RenderModel};
use crate::sieve::{Advance, RunController, RunState, StepObserver};
use crate::ui::panes::{self, Projection, StatusRenderData};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Width of the base prime pane
const BASES_PANE_WIDTH: u16 = 26;

/// Longest wait for a key event between redraws
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Collects step-completed signals until the next redraw
#[derive(Debug, Default)]
pub struct FrameSignal {
    /// A step completed and its frame has not been captured yet
    pub pending: bool,
    /// The completed step was finalization
    pub finished: bool,
}

impl StepObserver for FrameSignal {
    fn step_completed(&mut self, advance: &Advance) {
        self.pending = true;
        if matches!(advance, Advance::Finalized { .. }) {
            self.finished = true;
        }
    }
}

/// The main application state
pub struct App {
    /// Sieve state machine
    pub controller: RunController,

    /// Adaptive grid fitter; its cell size persists across redraws
    pub layout: GridLayout,

    /// Frame recorder, if `--record` was given
    pub recorder: Option<FrameRecorder>,

    /// Step-completed signals awaiting capture
    pub signal: FrameSignal,

    /// Scroll offset of the base prime pane
    pub bases_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Last time a tick advanced the sieve in play mode
    pub last_tick: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app from a validated configuration
    pub fn new(config: &SieveConfig) -> Self {
        App {
            controller: RunController::from_config(config),
            layout: GridLayout::default(),
            recorder: config.record_dir.as_ref().map(FrameRecorder::new),
            signal: FrameSignal::default(),
            bases_scroll: 0,
            should_quit: false,
            last_tick: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            let completed = terminal.draw(|f| self.render(f))?;
            self.capture_pending(completed.buffer);

            if self.should_quit {
                break;
            }

            // Handle auto-play mode; at most one advance per redraw
            let interval = self.controller.tick_interval();
            if self.controller.state() == RunState::Running
                && self.last_tick.elapsed() >= interval
            {
                self.last_tick = Instant::now();
                self.tick();
                continue;
            }

            let timeout = if self.controller.state() == RunState::Running {
                interval
                    .saturating_sub(self.last_tick.elapsed())
                    .min(POLL_INTERVAL)
            } else {
                POLL_INTERVAL
            };

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        if let Some(recorder) = self.recorder.as_mut() {
            recorder.end_session();
        }
        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Grid and base pane on top, info line and status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(BASES_PANE_WIDTH)])
            .split(main_chunks[0]);

        let limit = self.controller.limit();
        let inner = panes::grid_block(limit).inner(columns[0]);
        let projection = Projection::new(limit, inner, self.layout.params());
        let model = self.build_model(&projection);
        panes::render_grid_pane(frame, columns[0], &model, &projection);

        panes::render_bases_pane(
            frame,
            columns[1],
            &self.controller.strikes_by_base(),
            self.controller.highlight().current_p,
            &mut self.bases_scroll,
        );

        let status = StatusRenderData {
            message: self.controller.message(),
            limit: self.controller.limit(),
            prime_count: model.prime_count,
            steps_taken: self.controller.steps_taken(),
            state: self.controller.state(),
            speed: self.controller.speed(),
            interval_ms: self.controller.tick_interval().as_millis(),
            recording: self.recorder.as_ref().is_some_and(|r| r.is_recording()),
        };
        panes::render_info_line(frame, main_chunks[1], &status);
        panes::render_status_bar(frame, main_chunks[2], &status);
    }

    /// Fit the grid to the pane and derive this frame's visual cells
    fn build_model(&mut self, projection: &Projection) -> RenderModel {
        let geometry = self.layout.fit(self.controller.limit(), projection.viewport());
        RenderModel::build(
            self.controller.table(),
            self.controller.highlight(),
            geometry,
        )
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    if self.controller.toggle() {
                        self.last_tick = Instant::now();
                    }
                }
            }
            KeyCode::Right | KeyCode::Char('n') => {
                self.controller.pause();
                self.step();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.reset(self.controller.limit());
            }
            KeyCode::Up => self.adjust_limit(1),
            KeyCode::Down => self.adjust_limit(-1),
            KeyCode::PageUp => self.adjust_limit(100),
            KeyCode::PageDown => self.adjust_limit(-100),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.controller
                    .set_speed(self.controller.speed().saturating_add(1));
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                self.controller
                    .set_speed(self.controller.speed().saturating_sub(1));
            }
            _ => {}
        }
    }

    /// Change N by `delta` (clamped) and reset if it changed
    fn adjust_limit(&mut self, delta: isize) {
        let current = self.controller.limit();
        let requested = current.saturating_add_signed(delta);
        let limit = SieveConfig::clamp_limit(requested);
        if limit != current {
            self.reset(limit);
        }
    }

    /// Reset the sieve and stop any recording session
    pub fn reset(&mut self, limit: usize) {
        self.controller.reset_with(limit);
        self.signal = FrameSignal::default();
        self.bases_scroll = 0;
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.end_session();
        }
    }

    /// Advance one action manually
    pub fn step(&mut self) -> Advance {
        self.ensure_recording();
        let advance = self.controller.step(&mut self.signal);
        self.after_advance(advance);
        advance
    }

    /// Advance one action on a timer tick
    pub fn tick(&mut self) -> Advance {
        self.ensure_recording();
        let advance = self.controller.tick(&mut self.signal);
        self.after_advance(advance);
        advance
    }

    fn after_advance(&mut self, advance: Advance) {
        if advance != Advance::Ignored {
            // Keep the newest base in view
            self.bases_scroll = usize::MAX;
        }
    }

    /// Start a recording session on the first advance after a reset
    fn ensure_recording(&mut self) {
        if self.controller.state() == RunState::Done {
            return;
        }
        if let Some(recorder) = self.recorder.as_mut() {
            if !recorder.is_recording() {
                if let Err(e) = recorder.begin_session() {
                    warn!(error = %e, "could not start recording session");
                }
            }
        }
    }

    /// Write the frame for the last completed step, if one is pending.
    ///
    /// Failures are logged and the frame is skipped.
    pub fn capture_pending(&mut self, buffer: &Buffer) {
        if !self.signal.pending {
            return;
        }
        let finished = self.signal.finished;
        self.signal = FrameSignal::default();

        let Some(recorder) = self.recorder.as_mut() else {
            return;
        };
        if !recorder.is_recording() {
            return;
        }
        match recorder.capture(buffer) {
            Ok(path) => debug!(path = %path.display(), "captured frame"),
            Err(e) => warn!(error = %e, "skipping frame"),
        }
        if finished {
            recorder.end_session();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::buffer_to_text;
    use ratatui::backend::TestBackend;

    fn app_with_limit(limit: usize) -> App {
        App::new(&SieveConfig::new(limit, 10, None))
    }

    /// Run to Done, then redraw often enough for the fit to settle
    fn settled_text(app: &mut App, width: u16, height: u16) -> String {
        while app.controller.state() != RunState::Done {
            app.step();
        }
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut text = String::new();
        for _ in 0..10 {
            let completed = terminal.draw(|f| app.render(f)).unwrap();
            text = buffer_to_text(completed.buffer);
        }
        text
    }

    #[test]
    fn test_floor_size_cells_show_whole_numbers() {
        let mut app = App::new(&SieveConfig::default());
        let text = settled_text(&mut app, 80, 24);
        assert_eq!(app.layout.cell_size(), 14);

        let same_line = |a: &str, b: &str| text.lines().any(|l| l.contains(a) && l.contains(b));
        assert!(same_line("100", "101"), "{text}");
        assert!(same_line("199", "200"), "{text}");
        // 21 sits in a four-column cell, wide enough for its provenance
        assert!(text.contains("21×3"), "{text}");
    }

    #[test]
    fn test_shrunk_cells_show_provenance() {
        let mut app = app_with_limit(60);
        let text = settled_text(&mut app, 80, 24);
        assert_eq!(app.layout.cell_size(), 16);

        // one-row cells put it after the number, two-row cells underneath
        assert!(text.contains("4×2"), "{text}");
        assert!(text.contains("49"), "{text}");
        assert!(text.contains("×7"), "{text}");
    }

    #[test]
    fn test_step_pauses_running_controller() {
        let mut app = app_with_limit(20);
        app.controller.start();
        app.handle_key_event(KeyEvent::from(KeyCode::Right));
        assert_eq!(app.controller.state(), RunState::Paused);
        assert_eq!(app.controller.steps_taken(), 1);
    }

    #[test]
    fn test_adjust_limit_clamps_and_resets() {
        let mut app = app_with_limit(10);
        app.step();
        app.handle_key_event(KeyEvent::from(KeyCode::Down));
        assert_eq!(app.controller.limit(), 10);
        assert_eq!(app.controller.steps_taken(), 1);

        app.handle_key_event(KeyEvent::from(KeyCode::PageUp));
        assert_eq!(app.controller.limit(), 110);
        assert_eq!(app.controller.state(), RunState::Idle);
        assert_eq!(app.controller.steps_taken(), 0);
    }

    #[test]
    fn test_speed_keys_clamp() {
        let mut app = App::new(&SieveConfig::new(10, 20, None));
        app.handle_key_event(KeyEvent::from(KeyCode::Char('+')));
        assert_eq!(app.controller.speed(), 20);
        app.handle_key_event(KeyEvent::from(KeyCode::Char('-')));
        assert_eq!(app.controller.speed(), 19);
    }

    #[test]
    fn test_records_one_frame_per_step() {
        let dir = tempfile::tempdir().unwrap();
        let config = SieveConfig::new(10, 10, Some(dir.path().to_path_buf()));
        let mut app = App::new(&config);
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();

        while app.controller.state() != RunState::Done {
            app.step();
            let completed = terminal.draw(|f| app.render(f)).unwrap();
            app.capture_pending(completed.buffer);
        }

        // 8 actions for N = 10 plus the finalization frame
        let recorder = app.recorder.as_ref().unwrap();
        assert_eq!(recorder.frames_written(), 9);
        assert!(!recorder.is_recording());
        assert!(dir.path().join("frame_00008.txt").exists());
        let last = std::fs::read_to_string(dir.path().join("frame_00008.txt")).unwrap();
        assert!(last.contains("primes found so far: 4"));
    }

    #[test]
    fn test_capture_failure_does_not_touch_sieve() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();
        let config = SieveConfig::new(10, 10, Some(blocker));
        let mut app = App::new(&config);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        app.step();
        let completed = terminal.draw(|f| app.render(f)).unwrap();
        app.capture_pending(completed.buffer);

        assert_eq!(app.controller.steps_taken(), 1);
        assert_eq!(app.controller.state(), RunState::Paused);
    }
}
