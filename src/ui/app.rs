//! Main TUI application state and logic

use crate::highlight::HighlightMapper;
use crate::playback::{PlaybackController, PlaybackState, RealtimeScheduler};
use crate::snapshot::Trace;
use crate::ui::panes::{self, StatusRenderData};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Longest the event loop waits for a key before pumping the timer again
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Speed change per `+`/`-` press, in milliseconds
const SPEED_STEP_MS: u64 = 50;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Code,
    State,
    Steps,
}

impl FocusedPane {
    /// Move focus to the next pane (code -> state -> steps)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Code => FocusedPane::State,
            FocusedPane::State => FocusedPane::Steps,
            FocusedPane::Steps => FocusedPane::Code,
        }
    }
}

/// The main application state
pub struct App {
    pub controller: PlaybackController<RealtimeScheduler>,
    pub mapper: HighlightMapper,

    pub focused_pane: FocusedPane,
    pub state_scroll: usize,
    pub steps_scroll: usize,

    pub should_quit: bool,
    pub status_message: String,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app that plays back `trace`
    pub fn new(trace: Trace, speed_ms: u64) -> Self {
        let mapper = HighlightMapper::for_family(trace.family());
        let mut controller = PlaybackController::new(RealtimeScheduler::default());
        controller.set_speed(speed_ms);
        controller.start(trace);

        App {
            controller,
            mapper,
            focused_pane: FocusedPane::Code,
            state_scroll: 0,
            steps_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or_else(Instant::now),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.controller.pump() > 0 {
                self.steps_scroll = usize::MAX;
                self.status_message = match self.controller.state() {
                    PlaybackState::Finished => "Playback complete".to_string(),
                    _ => "Playing...".to_string(),
                };
            }

            // Wake up in time for the next tick, but never sleep past a key press
            let timeout = self
                .controller
                .scheduler()
                .time_until_next_tick()
                .map_or(POLL_INTERVAL, |due| due.min(POLL_INTERVAL));
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        self.controller.stop();
        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[0]);

        // Left column: Pseudocode (top) | Steps (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[0]);

        let snapshot = self.controller.current_snapshot();

        panes::render_code_pane(
            frame,
            left_rows[0],
            self.mapper.listing(),
            snapshot.and_then(|s| self.mapper.lookup(s.action)),
            self.focused_pane == FocusedPane::Code,
        );

        let played = self
            .controller
            .trace()
            .map_or(&[][..], |t| &t.snapshots()[..=self.controller.position()]);
        panes::render_narration_pane(
            frame,
            left_rows[1],
            played,
            self.focused_pane == FocusedPane::Steps,
            &mut self.steps_scroll,
        );

        let lines = snapshot
            .map(|s| panes::state_lines(&s.state, &s.counters))
            .unwrap_or_default();
        panes::render_state_pane(
            frame,
            columns[1],
            lines,
            self.focused_pane == FocusedPane::State,
            &mut self.state_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            StatusRenderData {
                message: &self.status_message,
                position: self.controller.position(),
                total: self.controller.trace().map_or(0, Trace::len),
                progress_percent: self.controller.progress_percent(),
                state: self.controller.state(),
                speed: self.controller.speed(),
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                let n = c.to_digit(10).map_or(1, |d| d as usize);
                self.controller.pause();
                let before = self.controller.position();
                self.controller.seek(before + n);
                let stepped = self.controller.position() - before;
                self.status_message = format!("Stepped forward {} step(s)", stepped);
                self.steps_scroll = usize::MAX;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.controller.pause();
                self.step_backward();
            }
            KeyCode::Right => {
                self.controller.pause();
                self.step_forward();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::State => self.state_scroll = self.state_scroll.saturating_sub(1),
                FocusedPane::Steps => self.steps_scroll = self.steps_scroll.saturating_sub(1),
                FocusedPane::Code => {}
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::State => self.state_scroll = self.state_scroll.saturating_add(1),
                FocusedPane::Steps => self.steps_scroll = self.steps_scroll.saturating_add(1),
                FocusedPane::Code => {}
            },
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let ms = self.speed_ms().saturating_sub(SPEED_STEP_MS);
                self.controller.set_speed(ms);
                self.status_message = format!("Speed {}ms per step", self.speed_ms());
            }
            KeyCode::Char('-') => {
                let ms = self.speed_ms().saturating_add(SPEED_STEP_MS);
                self.controller.set_speed(ms);
                self.status_message = format!("Speed {}ms per step", self.speed_ms());
            }
            KeyCode::Char(' ') => {
                // Toggle playback (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.toggle_play();
                }
            }
            KeyCode::Enter => {
                self.controller.seek(usize::MAX);
                self.status_message = "Jumped to end".to_string();
                self.steps_scroll = usize::MAX;
            }
            KeyCode::Backspace | KeyCode::Char('r') => {
                self.controller.reset();
                self.status_message = "Jumped to start".to_string();
                self.steps_scroll = 0;
            }
            _ => {}
        }
    }

    fn speed_ms(&self) -> u64 {
        self.controller.speed().as_millis() as u64
    }

    fn toggle_play(&mut self) {
        match self.controller.state() {
            PlaybackState::Playing => {
                self.controller.pause();
                self.status_message = "Paused".to_string();
            }
            PlaybackState::Finished => {
                self.status_message = "At the end, press ⌫ to replay".to_string();
            }
            PlaybackState::Idle | PlaybackState::Paused => {
                self.controller.play();
                self.status_message = "Playing...".to_string();
            }
        }
    }

    fn step_forward(&mut self) {
        let before = self.controller.position();
        if self.controller.state() == PlaybackState::Idle {
            // Manual stepping from the start leaves idle
            self.controller.seek(before + 1);
        } else {
            self.controller.step_forward();
        }

        self.status_message = if self.controller.position() > before {
            "Stepped forward".to_string()
        } else {
            "Cannot step forward: at the last step".to_string()
        };
        self.steps_scroll = usize::MAX;
    }

    fn step_backward(&mut self) {
        let before = self.controller.position();
        self.controller.step_backward();
        self.status_message = if self.controller.position() < before {
            "Stepped backward".to_string()
        } else {
            "Cannot step backward: at the first step".to_string()
        };
        self.steps_scroll = usize::MAX;
    }
}
