// Playback state machine over a recorded trace

use crate::constants::{DEFAULT_SPEED_MS, MAX_SPEED_MS, MIN_SPEED_MS};
use crate::playback::scheduler::{Scheduler, TimerHandle};
use crate::snapshot::{Snapshot, Trace};
use std::time::Duration;

/// Transport state of the playback session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// At the start, nothing played yet
    Idle,
    Playing,
    Paused,
    /// At the last snapshot; `reset` is needed to play again
    Finished,
}

#[derive(Debug)]
struct Session {
    trace: Trace,
    position: usize,
    state: PlaybackState,
}

impl Session {
    fn last(&self) -> usize {
        self.trace.len() - 1
    }
}

/// Replays a [`Trace`] under transport controls.
///
/// The controller is the only writer of the playback position. While playing
/// it owns one armed timer on its [`Scheduler`]; the host calls [`pump`] from
/// its event loop to deliver due ticks. Leaving the playing state always
/// cancels the timer before returning, so a tick can never land on a paused,
/// reset, or replaced session.
///
/// [`pump`]: PlaybackController::pump
#[derive(Debug)]
pub struct PlaybackController<S: Scheduler> {
    scheduler: S,
    session: Option<Session>,
    speed: Duration,
    timer: Option<TimerHandle>,
}

fn clamp_speed(ms: u64) -> Duration {
    Duration::from_millis(ms.clamp(MIN_SPEED_MS, MAX_SPEED_MS))
}

impl<S: Scheduler> PlaybackController<S> {
    pub fn new(scheduler: S) -> Self {
        PlaybackController {
            scheduler,
            session: None,
            speed: clamp_speed(DEFAULT_SPEED_MS),
            timer: None,
        }
    }

    // ========== Transport ==========

    /// Bind a new trace, replacing any current session
    pub fn start(&mut self, trace: Trace) {
        self.cancel_timer();
        tracing::debug!(family = %trace.family(), snapshots = trace.len(), "playback session started");
        self.session = Some(Session {
            trace,
            position: 0,
            state: PlaybackState::Idle,
        });
    }

    /// Idle or paused to playing. Finished sessions need a `reset` first.
    pub fn play(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !matches!(session.state, PlaybackState::Idle | PlaybackState::Paused) {
            return;
        }
        session.state = PlaybackState::Playing;
        self.timer = Some(self.scheduler.arm(self.speed));
        tracing::debug!(position = session.position, "playing");
    }

    pub fn pause(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.state != PlaybackState::Playing {
            return;
        }
        session.state = PlaybackState::Paused;
        self.cancel_timer();
        tracing::debug!(position = self.position(), "paused");
    }

    /// Advance one snapshot. A no-op while idle.
    ///
    /// While playing the timer keeps running; reaching the end finishes the
    /// session and stops it.
    pub fn step_forward(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.state == PlaybackState::Idle {
            return;
        }
        session.position = (session.position + 1).min(session.last());
        if session.position == session.last() {
            self.finish();
        }
    }

    /// Move back one snapshot. A no-op while idle or at the start.
    ///
    /// Playing continues from the earlier position; a finished session
    /// becomes paused.
    pub fn step_backward(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.state == PlaybackState::Idle || session.position == 0 {
            return;
        }
        session.position -= 1;
        if session.state == PlaybackState::Finished {
            session.state = PlaybackState::Paused;
        }
    }

    /// Jump to `position` (clamped to the trace).
    ///
    /// From idle this leaves the session paused at the new position. Seeking
    /// to the last snapshot finishes the session.
    pub fn seek(&mut self, position: usize) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.position = position.min(session.last());
        if session.position == session.last() {
            self.finish();
        } else if matches!(session.state, PlaybackState::Idle | PlaybackState::Finished) {
            session.state = PlaybackState::Paused;
        }
    }

    /// Set the delay between automatic steps.
    ///
    /// A tick that is already scheduled keeps its deadline.
    pub fn set_speed(&mut self, ms: u64) {
        self.speed = clamp_speed(ms);
        if let Some(timer) = self.timer {
            self.scheduler.set_interval(timer, self.speed);
        }
    }

    /// Back to idle at the first snapshot, from any state
    pub fn reset(&mut self) {
        self.cancel_timer();
        if let Some(session) = self.session.as_mut() {
            session.position = 0;
            session.state = PlaybackState::Idle;
            tracing::debug!("playback reset");
        }
    }

    /// Tear down the session
    pub fn stop(&mut self) {
        self.cancel_timer();
        self.session = None;
    }

    /// Deliver due timer ticks. Returns how many advanced the position.
    pub fn pump(&mut self) -> usize {
        let mut advanced = 0;
        while let Some(timer) = self.timer {
            if !self.scheduler.poll_tick(timer) {
                break;
            }
            let Some(session) = self.session.as_mut() else {
                self.cancel_timer();
                break;
            };
            if session.position < session.last() {
                session.position += 1;
                advanced += 1;
            } else {
                self.finish();
            }
        }
        advanced
    }

    // ========== Observers ==========

    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        self.session
            .as_ref()
            .and_then(|s| s.trace.get(s.position))
    }

    pub fn position(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.position)
    }

    /// `(position + 1) / len * 100`, or 0 without a session
    pub fn progress_percent(&self) -> f64 {
        self.session.as_ref().map_or(0.0, |s| {
            (s.position + 1) as f64 / s.trace.len() as f64 * 100.0
        })
    }

    pub fn state(&self) -> PlaybackState {
        self.session
            .as_ref()
            .map_or(PlaybackState::Idle, |s| s.state)
    }

    pub fn is_playing(&self) -> bool {
        self.state() == PlaybackState::Playing
    }

    pub fn speed(&self) -> Duration {
        self.speed
    }

    pub fn trace(&self) -> Option<&Trace> {
        self.session.as_ref().map(|s| &s.trace)
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    // ========== Internals ==========

    fn finish(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.state = PlaybackState::Finished;
        }
        self.cancel_timer();
        tracing::debug!("playback finished");
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            self.scheduler.cancel(timer);
        }
    }
}

impl<S: Scheduler> Drop for PlaybackController<S> {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
